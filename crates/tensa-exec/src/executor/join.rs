//! Join of two tensors on their shared dimensions.
//!
//! The join is a hash join: one input (the build side) is grouped by its
//! labels in the shared dimensions, and every cell of the other input (the
//! probe side) is combined with the group of matching labels. Each input is
//! read once, so the cost is proportional to the input sizes plus the output
//! size. Inputs without shared dimensions fall into a single group, which
//! gives their cross product.

use crate::hints::{BuildSide, ExecHints};
use scirs2_core::ndarray_ext::Zip;
use std::collections::HashMap;
use tensa_core::{
    Address, IndexedStorage, Label, Storage, Tensor, TensorBuilder, TensorError, TensorResult,
    TensorType,
};

/// Combine the cells of two tensors wherever their shared dimensions agree.
///
/// The result type is the union of the input types. A result cell exists only
/// where both inputs have a cell; its value is `f(left, right)`.
///
/// # Examples
///
/// ```
/// use tensa_core::Tensor;
/// use tensa_exec::join;
///
/// let a: Tensor = "{{x:a}:2.0,{x:b}:4.0}".parse().unwrap();
/// let b: Tensor = "{{x:a}:3.0}".parse().unwrap();
/// assert_eq!(join(&a, &b, |x, y| x * y).unwrap().to_string(), "{{x:a}:6.0}");
/// ```
///
/// # Errors
///
/// [`TensorError::InvalidArgument`](tensa_core::TensorError::InvalidArgument)
/// if a shared dimension differs in kind, and
/// [`TensorError::TypeConstruction`](tensa_core::TensorError::TypeConstruction)
/// if the union would mix indexed and mapped dimensions.
pub fn join<F>(left: &Tensor, right: &Tensor, f: F) -> TensorResult<Tensor>
where
    F: Fn(f64, f64) -> f64,
{
    join_with_hints(left, right, f, &ExecHints::default())
}

/// [`join`] with explicit execution hints
pub fn join_with_hints<F>(
    left: &Tensor,
    right: &Tensor,
    f: F,
    hints: &ExecHints,
) -> TensorResult<Tensor>
where
    F: Fn(f64, f64) -> f64,
{
    let left_type = left.tensor_type();
    let right_type = right.tensor_type();
    let result_type = left_type.union(right_type)?;

    if let Some(joined) = join_same_shape(left, right, &result_type, &f) {
        return Ok(joined);
    }

    let shared: Vec<&str> = left_type
        .dimension_names()
        .filter(|name| right_type.index_of(name).is_some())
        .collect();
    let left_shared = positions(left_type, &shared);
    let right_shared = positions(right_type, &shared);
    let sources: Vec<Source> = result_type
        .dimension_names()
        .filter_map(|name| {
            left_type
                .index_of(name)
                .map(Source::Left)
                .or_else(|| right_type.index_of(name).map(Source::Right))
        })
        .collect();

    let build_left = match hints.build_side {
        BuildSide::Auto => left.len() <= right.len(),
        BuildSide::Left => true,
        BuildSide::Right => false,
    };
    let (build, probe, build_shared, probe_shared) = if build_left {
        (left, right, &left_shared, &right_shared)
    } else {
        (right, left, &right_shared, &left_shared)
    };
    log::debug!(
        "join {} with {} on [{}]: hashing {} side ({} cells), probing {} cells",
        left_type,
        right_type,
        shared.join(","),
        if build_left { "left" } else { "right" },
        build.len(),
        probe.len()
    );

    let mut table: HashMap<Address, Vec<(Address, f64)>> = HashMap::new();
    for (address, value) in build.iter() {
        table
            .entry(address.project(build_shared))
            .or_default()
            .push((address, value));
    }

    let mut builder = TensorBuilder::of(result_type);
    for (probe_address, probe_value) in probe.iter() {
        let Some(matches) = table.get(&probe_address.project(probe_shared)) else {
            continue;
        };
        for (build_address, build_value) in matches {
            let (left_address, left_value, right_address, right_value) = if build_left {
                (build_address, *build_value, &probe_address, probe_value)
            } else {
                (&probe_address, probe_value, build_address, *build_value)
            };
            let address = sources
                .iter()
                .map(|source| source.label(left_address, right_address).cloned())
                .collect::<Option<Address>>()
                .ok_or_else(|| {
                    TensorError::state(format!(
                        "address outside {} while joining with {}",
                        left_type, right_type
                    ))
                })?;
            builder.cell_at(address, f(left_value, right_value))?;
        }
    }
    Ok(builder.build())
}

/// Where a result dimension takes its label from
#[derive(Clone, Copy, Debug)]
enum Source {
    Left(usize),
    Right(usize),
}

impl Source {
    fn label<'a>(self, left: &'a Address, right: &'a Address) -> Option<&'a Label> {
        match self {
            Source::Left(position) => left.label(position),
            Source::Right(position) => right.label(position),
        }
    }
}

fn positions(tensor_type: &TensorType, names: &[&str]) -> Vec<usize> {
    names
        .iter()
        .filter_map(|name| tensor_type.index_of(name))
        .collect()
}

/// Zip two dense tensors of identical type and shape cell by cell
fn join_same_shape<F>(
    left: &Tensor,
    right: &Tensor,
    result_type: &TensorType,
    f: &F,
) -> Option<Tensor>
where
    F: Fn(f64, f64) -> f64,
{
    let (Storage::Indexed(a), Storage::Indexed(b)) = (left.storage(), right.storage()) else {
        return None;
    };
    if left.tensor_type() != right.tensor_type() || a.sizes() != b.sizes() {
        return None;
    }
    let (a, b) = (a.array()?, b.array()?);
    let joined = Zip::from(a).and(b).map_collect(|&x, &y| f(x, y));
    Tensor::from_indexed(result_type.clone(), IndexedStorage::from_array(joined)).ok()
}
