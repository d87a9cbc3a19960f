//! Shortcut functions over the join and reduce primitives
//!
//! Binary shortcuts join two tensors with a [`BinaryOp`]; comparison shortcuts
//! yield 1.0 where the comparison holds and 0.0 elsewhere. Reduce shortcuts
//! aggregate over the named dimensions, or over all dimensions for an empty
//! list.

use crate::executor::{join, reduce, Aggregator, BinaryOp};
use tensa_core::{Tensor, TensorResult};

/// Join two tensors with a binary operator
pub fn binary(op: BinaryOp, left: &Tensor, right: &Tensor) -> TensorResult<Tensor> {
    join(left, right, |x, y| op.apply(x, y))
}

pub fn multiply(left: &Tensor, right: &Tensor) -> TensorResult<Tensor> {
    binary(BinaryOp::Mul, left, right)
}

pub fn add(left: &Tensor, right: &Tensor) -> TensorResult<Tensor> {
    binary(BinaryOp::Add, left, right)
}

pub fn divide(left: &Tensor, right: &Tensor) -> TensorResult<Tensor> {
    binary(BinaryOp::Div, left, right)
}

pub fn subtract(left: &Tensor, right: &Tensor) -> TensorResult<Tensor> {
    binary(BinaryOp::Sub, left, right)
}

/// Cellwise maximum
pub fn max(left: &Tensor, right: &Tensor) -> TensorResult<Tensor> {
    binary(BinaryOp::Maximum, left, right)
}

/// Cellwise minimum
pub fn min(left: &Tensor, right: &Tensor) -> TensorResult<Tensor> {
    binary(BinaryOp::Minimum, left, right)
}

pub fn atan2(left: &Tensor, right: &Tensor) -> TensorResult<Tensor> {
    binary(BinaryOp::Atan2, left, right)
}

pub fn larger(left: &Tensor, right: &Tensor) -> TensorResult<Tensor> {
    binary(BinaryOp::Larger, left, right)
}

pub fn larger_or_equal(left: &Tensor, right: &Tensor) -> TensorResult<Tensor> {
    binary(BinaryOp::LargerOrEqual, left, right)
}

pub fn smaller(left: &Tensor, right: &Tensor) -> TensorResult<Tensor> {
    binary(BinaryOp::Smaller, left, right)
}

pub fn smaller_or_equal(left: &Tensor, right: &Tensor) -> TensorResult<Tensor> {
    binary(BinaryOp::SmallerOrEqual, left, right)
}

pub fn equal(left: &Tensor, right: &Tensor) -> TensorResult<Tensor> {
    binary(BinaryOp::Equal, left, right)
}

pub fn not_equal(left: &Tensor, right: &Tensor) -> TensorResult<Tensor> {
    binary(BinaryOp::NotEqual, left, right)
}

pub fn sum<S: AsRef<str>>(tensor: &Tensor, dimensions: &[S]) -> TensorResult<Tensor> {
    reduce(tensor, Aggregator::Sum, dimensions)
}

pub fn prod<S: AsRef<str>>(tensor: &Tensor, dimensions: &[S]) -> TensorResult<Tensor> {
    reduce(tensor, Aggregator::Prod, dimensions)
}

pub fn count<S: AsRef<str>>(tensor: &Tensor, dimensions: &[S]) -> TensorResult<Tensor> {
    reduce(tensor, Aggregator::Count, dimensions)
}

pub fn avg<S: AsRef<str>>(tensor: &Tensor, dimensions: &[S]) -> TensorResult<Tensor> {
    reduce(tensor, Aggregator::Avg, dimensions)
}

/// Largest value over the named dimensions
pub fn max_over<S: AsRef<str>>(tensor: &Tensor, dimensions: &[S]) -> TensorResult<Tensor> {
    reduce(tensor, Aggregator::Max, dimensions)
}

/// Smallest value over the named dimensions
pub fn min_over<S: AsRef<str>>(tensor: &Tensor, dimensions: &[S]) -> TensorResult<Tensor> {
    reduce(tensor, Aggregator::Min, dimensions)
}
