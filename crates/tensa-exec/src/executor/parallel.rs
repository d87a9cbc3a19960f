//! Parallel execution utilities for tensor functions
//!
//! Dense cells are mapped with scirs2-core's parallel zip (backed by rayon).
//! Results are identical to the sequential path.

use scirs2_core::ndarray_ext::Zip;
use tensa_core::{IndexedStorage, Storage, Tensor};

/// Map every dense cell in parallel, `None` if the tensor has no dense array
pub(crate) fn parallel_map<F>(tensor: &Tensor, f: &F) -> Option<Tensor>
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    let array = match tensor.storage() {
        Storage::Indexed(storage) => storage.array()?,
        Storage::Mapped(_) => return None,
    };
    log::debug!(
        "mapping {} dense cells of {} in parallel",
        array.len(),
        tensor.tensor_type()
    );
    let mapped = Zip::from(array).par_map_collect(|&v| f(v));
    Tensor::from_indexed(tensor.tensor_type().clone(), IndexedStorage::from_array(mapped)).ok()
}
