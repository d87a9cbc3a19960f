//! Dimension renaming

use std::collections::HashMap;
use tensa_core::{IndexedStorage, Storage, Tensor, TensorBuilder, TensorResult, TensorType};

/// Rename dimensions positionally from `from` to `to`.
///
/// Cells keep their values; their labels move with the renamed dimensions,
/// which may change the canonical dimension order.
///
/// # Examples
///
/// ```
/// use tensa_core::Tensor;
/// use tensa_exec::rename;
///
/// let t: Tensor = "{{a:1,b:2}:5.0}".parse().unwrap();
/// let r = rename(&t, &["a"], &["c"]).unwrap();
/// assert_eq!(r.to_string(), "{{b:2,c:1}:5.0}");
/// ```
///
/// # Errors
///
/// [`TensorError::InvalidArgument`](tensa_core::TensorError::InvalidArgument)
/// for lists of unequal length or names not in the type, and
/// [`TensorError::TypeConstruction`](tensa_core::TensorError::TypeConstruction)
/// if the renamed type has duplicate names.
pub fn rename<S, T>(tensor: &Tensor, from: &[S], to: &[T]) -> TensorResult<Tensor>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let source_type = tensor.tensor_type();
    let result_type = source_type.renamed(from, to)?;

    let targets: HashMap<&str, &str> = to
        .iter()
        .map(|name| name.as_ref())
        .zip(from.iter().map(|name| name.as_ref()))
        .collect();
    // Source position of each result dimension
    let positions: Vec<usize> = result_type
        .dimension_names()
        .filter_map(|name| source_type.index_of(targets.get(name).copied().unwrap_or(name)))
        .collect();

    if let Some(renamed) = rename_dense(tensor, &result_type, &positions) {
        return Ok(renamed);
    }

    let mut builder = TensorBuilder::of(result_type);
    for (address, value) in tensor.iter() {
        builder.cell_at(address.project(&positions), value)?;
    }
    Ok(builder.build())
}

/// Rename a single dimension
pub fn rename_one(tensor: &Tensor, from: &str, to: &str) -> TensorResult<Tensor> {
    rename(tensor, &[from], &[to])
}

/// Permute the axes of dense storage to the renamed dimension order
fn rename_dense(tensor: &Tensor, result_type: &TensorType, positions: &[usize]) -> Option<Tensor> {
    let Storage::Indexed(storage) = tensor.storage() else {
        return None;
    };
    let array = storage.array()?;
    let permuted = array.clone().permuted_axes(positions.to_vec());
    Tensor::from_indexed(result_type.clone(), IndexedStorage::from_array(permuted)).ok()
}
