//! Elementwise map

use crate::hints::ExecHints;
use tensa_core::Tensor;

/// Apply a function to every defined cell.
///
/// The result has the input's type; undefined cells stay undefined.
///
/// # Examples
///
/// ```
/// use tensa_core::Tensor;
/// use tensa_exec::map;
///
/// let t: Tensor = "{{x:a}:1.0,{x:b}:4.0}".parse().unwrap();
/// assert_eq!(map(&t, f64::sqrt).to_string(), "{{x:a}:1.0,{x:b}:2.0}");
/// ```
pub fn map<F>(tensor: &Tensor, f: F) -> Tensor
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    map_with_hints(tensor, f, &ExecHints::default())
}

/// [`map`] with explicit execution hints
pub fn map_with_hints<F>(tensor: &Tensor, f: F, hints: &ExecHints) -> Tensor
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    if tensor.is_indexed() && hints.should_parallelize(tensor.len()) {
        #[cfg(feature = "parallel")]
        if let Some(mapped) = super::parallel::parallel_map(tensor, &f) {
            return mapped;
        }
    }
    tensor.map_values(f)
}
