//! Method-style access to the tensor functions

use super::composite;
use super::join::join;
use super::map::map;
use super::reduce::reduce;
use super::rename::rename;
use super::types::Aggregator;
use crate::ops;
use tensa_core::{Tensor, TensorResult};

/// Tensor functions as methods on [`Tensor`].
///
/// Every method delegates to the free function of the same name, so
/// `a.join(&b, f)` is `join(&a, &b, f)`.
///
/// ```
/// use tensa_core::Tensor;
/// use tensa_exec::TensorFunctions;
///
/// let t: Tensor = "{{x:a,y:0}:2.0,{x:b,y:0}:3.0}".parse().unwrap();
/// let doubled = t.map(|v| v * 2.0);
/// let total = doubled.sum(&["x", "y"]).unwrap();
/// assert_eq!(total.as_double().unwrap(), 10.0);
/// ```
pub trait TensorFunctions {
    fn map<F>(&self, f: F) -> Tensor
    where
        F: Fn(f64) -> f64 + Send + Sync;

    fn reduce<S: AsRef<str>>(&self, aggregator: Aggregator, dimensions: &[S])
        -> TensorResult<Tensor>;

    fn join<F>(&self, other: &Tensor, f: F) -> TensorResult<Tensor>
    where
        F: Fn(f64, f64) -> f64;

    fn rename<S: AsRef<str>, T: AsRef<str>>(&self, from: &[S], to: &[T]) -> TensorResult<Tensor>;

    fn l1_normalize(&self, dimension: &str) -> TensorResult<Tensor>;

    fn l2_normalize(&self, dimension: &str) -> TensorResult<Tensor>;

    fn matmul(&self, other: &Tensor, dimension: &str) -> TensorResult<Tensor>;

    fn softmax(&self, dimension: &str) -> TensorResult<Tensor>;

    fn multiply(&self, other: &Tensor) -> TensorResult<Tensor>;

    fn add(&self, other: &Tensor) -> TensorResult<Tensor>;

    fn divide(&self, other: &Tensor) -> TensorResult<Tensor>;

    fn subtract(&self, other: &Tensor) -> TensorResult<Tensor>;

    fn max(&self, other: &Tensor) -> TensorResult<Tensor>;

    fn min(&self, other: &Tensor) -> TensorResult<Tensor>;

    fn atan2(&self, other: &Tensor) -> TensorResult<Tensor>;

    fn larger(&self, other: &Tensor) -> TensorResult<Tensor>;

    fn larger_or_equal(&self, other: &Tensor) -> TensorResult<Tensor>;

    fn smaller(&self, other: &Tensor) -> TensorResult<Tensor>;

    fn smaller_or_equal(&self, other: &Tensor) -> TensorResult<Tensor>;

    fn equal(&self, other: &Tensor) -> TensorResult<Tensor>;

    fn not_equal(&self, other: &Tensor) -> TensorResult<Tensor>;

    fn sum<S: AsRef<str>>(&self, dimensions: &[S]) -> TensorResult<Tensor>;

    fn prod<S: AsRef<str>>(&self, dimensions: &[S]) -> TensorResult<Tensor>;

    fn count<S: AsRef<str>>(&self, dimensions: &[S]) -> TensorResult<Tensor>;

    fn avg<S: AsRef<str>>(&self, dimensions: &[S]) -> TensorResult<Tensor>;

    fn max_over<S: AsRef<str>>(&self, dimensions: &[S]) -> TensorResult<Tensor>;

    fn min_over<S: AsRef<str>>(&self, dimensions: &[S]) -> TensorResult<Tensor>;
}

impl TensorFunctions for Tensor {
    fn map<F>(&self, f: F) -> Tensor
    where
        F: Fn(f64) -> f64 + Send + Sync,
    {
        map(self, f)
    }

    fn reduce<S: AsRef<str>>(
        &self,
        aggregator: Aggregator,
        dimensions: &[S],
    ) -> TensorResult<Tensor> {
        reduce(self, aggregator, dimensions)
    }

    fn join<F>(&self, other: &Tensor, f: F) -> TensorResult<Tensor>
    where
        F: Fn(f64, f64) -> f64,
    {
        join(self, other, f)
    }

    fn rename<S: AsRef<str>, T: AsRef<str>>(&self, from: &[S], to: &[T]) -> TensorResult<Tensor> {
        rename(self, from, to)
    }

    fn l1_normalize(&self, dimension: &str) -> TensorResult<Tensor> {
        composite::l1_normalize(self, dimension)
    }

    fn l2_normalize(&self, dimension: &str) -> TensorResult<Tensor> {
        composite::l2_normalize(self, dimension)
    }

    fn matmul(&self, other: &Tensor, dimension: &str) -> TensorResult<Tensor> {
        composite::matmul(self, other, dimension)
    }

    fn softmax(&self, dimension: &str) -> TensorResult<Tensor> {
        composite::softmax(self, dimension)
    }

    fn multiply(&self, other: &Tensor) -> TensorResult<Tensor> {
        ops::multiply(self, other)
    }

    fn add(&self, other: &Tensor) -> TensorResult<Tensor> {
        ops::add(self, other)
    }

    fn divide(&self, other: &Tensor) -> TensorResult<Tensor> {
        ops::divide(self, other)
    }

    fn subtract(&self, other: &Tensor) -> TensorResult<Tensor> {
        ops::subtract(self, other)
    }

    fn max(&self, other: &Tensor) -> TensorResult<Tensor> {
        ops::max(self, other)
    }

    fn min(&self, other: &Tensor) -> TensorResult<Tensor> {
        ops::min(self, other)
    }

    fn atan2(&self, other: &Tensor) -> TensorResult<Tensor> {
        ops::atan2(self, other)
    }

    fn larger(&self, other: &Tensor) -> TensorResult<Tensor> {
        ops::larger(self, other)
    }

    fn larger_or_equal(&self, other: &Tensor) -> TensorResult<Tensor> {
        ops::larger_or_equal(self, other)
    }

    fn smaller(&self, other: &Tensor) -> TensorResult<Tensor> {
        ops::smaller(self, other)
    }

    fn smaller_or_equal(&self, other: &Tensor) -> TensorResult<Tensor> {
        ops::smaller_or_equal(self, other)
    }

    fn equal(&self, other: &Tensor) -> TensorResult<Tensor> {
        ops::equal(self, other)
    }

    fn not_equal(&self, other: &Tensor) -> TensorResult<Tensor> {
        ops::not_equal(self, other)
    }

    fn sum<S: AsRef<str>>(&self, dimensions: &[S]) -> TensorResult<Tensor> {
        ops::sum(self, dimensions)
    }

    fn prod<S: AsRef<str>>(&self, dimensions: &[S]) -> TensorResult<Tensor> {
        ops::prod(self, dimensions)
    }

    fn count<S: AsRef<str>>(&self, dimensions: &[S]) -> TensorResult<Tensor> {
        ops::count(self, dimensions)
    }

    fn avg<S: AsRef<str>>(&self, dimensions: &[S]) -> TensorResult<Tensor> {
        ops::avg(self, dimensions)
    }

    fn max_over<S: AsRef<str>>(&self, dimensions: &[S]) -> TensorResult<Tensor> {
        ops::max_over(self, dimensions)
    }

    fn min_over<S: AsRef<str>>(&self, dimensions: &[S]) -> TensorResult<Tensor> {
        ops::min_over(self, dimensions)
    }
}
