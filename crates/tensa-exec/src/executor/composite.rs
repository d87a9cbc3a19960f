//! Composite functions built from the primitives.
//!
//! Each function here is a literal composition of [`map`], [`reduce`] and
//! [`join`]; none adds numeric behavior of its own.

use super::join::join;
use super::map::map;
use super::reduce::reduce;
use super::types::Aggregator;
use tensa_core::{Tensor, TensorResult};

/// Divide every cell by the sum of its slice along `dimension`.
///
/// A slice that sums to zero divides by zero, so its cells become NaN (or
/// infinite for nonzero cells of a slice whose values cancel out).
pub fn l1_normalize(tensor: &Tensor, dimension: &str) -> TensorResult<Tensor> {
    let sums = reduce(tensor, Aggregator::Sum, &[dimension])?;
    join(tensor, &sums, |x, sum| x / sum)
}

/// Divide every cell by the Euclidean norm of its slice along `dimension`
pub fn l2_normalize(tensor: &Tensor, dimension: &str) -> TensorResult<Tensor> {
    let squares = map(tensor, |x| x * x);
    let norms = map(
        &reduce(&squares, Aggregator::Sum, &[dimension])?,
        f64::sqrt,
    );
    join(tensor, &norms, |x, norm| x / norm)
}

/// Multiply two tensors and sum out the shared `dimension`
pub fn matmul(a: &Tensor, b: &Tensor, dimension: &str) -> TensorResult<Tensor> {
    let products = join(a, b, |x, y| x * y)?;
    reduce(&products, Aggregator::Sum, &[dimension])
}

/// Exponentiate and l1-normalize along `dimension`
pub fn softmax(tensor: &Tensor, dimension: &str) -> TensorResult<Tensor> {
    l1_normalize(&map(tensor, f64::exp), dimension)
}
