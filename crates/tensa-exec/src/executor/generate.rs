//! Dense tensor generation

use tensa_core::{IndexedStorage, Tensor, TensorError, TensorResult, TensorType};

/// Create a dense tensor by evaluating `f` at every address of the type.
///
/// `f` receives the ordinal labels in canonical dimension order. A
/// dimensionless type yields one cell with the value `f(&[])`.
///
/// # Examples
///
/// ```
/// use tensa_core::TensorType;
/// use tensa_exec::generate;
///
/// let ty = TensorType::indexed(&[("x", 2), ("y", 2)]).unwrap();
/// let t = generate(&ty, |i| (i[0] * 10 + i[1]) as f64).unwrap();
/// assert_eq!(t.to_string(), "{{x:0,y:0}:0.0,{x:0,y:1}:1.0,{x:1,y:0}:10.0,{x:1,y:1}:11.0}");
/// ```
///
/// # Errors
///
/// [`TensorError::InvalidArgument`] if a dimension is mapped or indexed
/// without a size, since its labels cannot be enumerated, or if its cells
/// cannot be allocated.
pub fn generate<F>(tensor_type: &TensorType, f: F) -> TensorResult<Tensor>
where
    F: Fn(&[usize]) -> f64,
{
    let sizes = tensor_type
        .dimensions()
        .iter()
        .map(|dimension| {
            dimension.size().ok_or_else(|| {
                TensorError::invalid_argument(format!(
                    "cannot generate over dimension '{}' of {}: only bound indexed dimensions have enumerable labels",
                    dimension.name(),
                    tensor_type
                ))
            })
        })
        .collect::<TensorResult<Vec<usize>>>()?;

    let total = IndexedStorage::checked_len(&sizes)?;
    let mut values = Vec::new();
    values.try_reserve_exact(total).map_err(|e| {
        TensorError::invalid_argument(format!("cannot allocate {}: {}", tensor_type, e))
    })?;
    let mut indices = vec![0usize; sizes.len()];
    for _ in 0..total {
        values.push(f(&indices));
        // Advance the row-major odometer
        for (index, &size) in indices.iter_mut().zip(&sizes).rev() {
            *index += 1;
            if *index < size {
                break;
            }
            *index = 0;
        }
    }

    let storage = IndexedStorage::from_shape_vec(&sizes, values)?;
    Tensor::from_indexed(tensor_type.clone(), storage)
}
