//! Aggregation over dimensions

use super::types::{Accumulator, Aggregator};
use std::collections::HashMap;
use tensa_core::{Address, Tensor, TensorBuilder, TensorResult, TensorType};

/// Remove the named dimensions, aggregating the cells that agree on the rest.
///
/// An empty dimension list reduces over every dimension. Surviving addresses
/// are only those of existing cells, so an address without contributing
/// cells never appears in the result. Reducing to the dimensionless type
/// yields one cell, or none if the aggregate of no values is undefined.
///
/// # Examples
///
/// ```
/// use tensa_core::Tensor;
/// use tensa_exec::{reduce, Aggregator};
///
/// let t: Tensor = "{{x:a,y:0}:2.0,{x:b,y:0}:3.0}".parse().unwrap();
/// let r = reduce(&t, Aggregator::Sum, &["y"]).unwrap();
/// assert_eq!(r.to_string(), "{{x:a}:2.0,{x:b}:3.0}");
///
/// let total = reduce(&t, Aggregator::Sum, &[] as &[&str]).unwrap();
/// assert_eq!(total.as_double().unwrap(), 5.0);
/// ```
///
/// # Errors
///
/// [`TensorError::InvalidArgument`](tensa_core::TensorError::InvalidArgument)
/// if a named dimension is not in the tensor's type.
pub fn reduce<S: AsRef<str>>(
    tensor: &Tensor,
    aggregator: Aggregator,
    dimensions: &[S],
) -> TensorResult<Tensor> {
    let source_type = tensor.tensor_type();
    let result_type = if dimensions.is_empty() {
        TensorType::empty()
    } else {
        source_type.without(dimensions)?
    };
    let kept: Vec<usize> = result_type
        .dimension_names()
        .filter_map(|name| source_type.index_of(name))
        .collect();

    let mut groups: HashMap<Address, Accumulator> = HashMap::new();
    for (address, value) in tensor.iter() {
        groups
            .entry(address.project(&kept))
            .or_insert_with(|| aggregator.accumulator())
            .add(value);
    }
    log::debug!(
        "{} of {} cells of {} into {} groups of {}",
        aggregator,
        tensor.len(),
        source_type,
        groups.len(),
        result_type
    );

    let mut builder = TensorBuilder::of(result_type);
    if kept.is_empty() {
        let total = groups
            .remove(&Address::empty())
            .unwrap_or_else(|| aggregator.accumulator());
        if let Some(value) = total.finish() {
            builder.scalar(value)?;
        }
    } else {
        for (address, accumulator) in groups {
            if let Some(value) = accumulator.finish() {
                builder.cell_at(address, value)?;
            }
        }
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensa_core::TensorError;

    const NONE: &[&str] = &[];

    fn sample() -> Tensor {
        "{{x:a,y:0}:2.0,{x:b,y:0}:3.0,{x:b,y:1}:5.0}".parse().unwrap()
    }

    #[test]
    fn test_reduce_one_dimension() {
        let r = reduce(&sample(), Aggregator::Sum, &["y"]).unwrap();
        assert_eq!(r.tensor_type().to_string(), "tensor(x{})");
        assert_eq!(r.to_string(), "{{x:a}:2.0,{x:b}:8.0}");

        let r = reduce(&sample(), Aggregator::Max, &["x"]).unwrap();
        assert_eq!(r.to_string(), "{{y:0}:3.0,{y:1}:5.0}");
    }

    #[test]
    fn test_reduce_all_dimensions() {
        let t = sample();
        assert_eq!(reduce(&t, Aggregator::Sum, NONE).unwrap().as_double().unwrap(), 10.0);
        assert_eq!(reduce(&t, Aggregator::Prod, NONE).unwrap().as_double().unwrap(), 30.0);
        assert_eq!(reduce(&t, Aggregator::Count, NONE).unwrap().as_double().unwrap(), 3.0);
        assert_eq!(reduce(&t, Aggregator::Min, &["x", "y"]).unwrap().as_double().unwrap(), 2.0);
        let avg = reduce(&t, Aggregator::Avg, NONE).unwrap().as_double().unwrap();
        assert!((avg - 10.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_reduce_empty_input_to_scalar() {
        let empty = Tensor::from_text("tensor(x{}):{}").unwrap();
        let value = |a| reduce(&empty, a, NONE).unwrap();
        assert_eq!(value(Aggregator::Sum).as_double().unwrap(), 0.0);
        assert_eq!(value(Aggregator::Prod).as_double().unwrap(), 1.0);
        assert_eq!(value(Aggregator::Count).as_double().unwrap(), 0.0);
        for aggregator in [Aggregator::Max, Aggregator::Min, Aggregator::Avg] {
            let r = value(aggregator);
            assert!(r.is_empty());
            assert!(r.as_double().unwrap().is_nan());
        }
    }

    #[test]
    fn test_count_never_emits_empty_groups() {
        let r = reduce(&sample(), Aggregator::Count, &["y"]).unwrap();
        assert_eq!(r.to_string(), "{{x:a}:1.0,{x:b}:2.0}");
    }

    #[test]
    fn test_reduce_dense() {
        let t = Tensor::from_text_with_spec(
            "tensor(x[2],y[3])",
            "{{x:0,y:0}:1.0,{x:0,y:1}:2.0,{x:0,y:2}:3.0,{x:1,y:0}:4.0,{x:1,y:1}:5.0,{x:1,y:2}:6.0}",
        )
        .unwrap();
        let r = reduce(&t, Aggregator::Sum, &["y"]).unwrap();
        assert!(r.is_indexed());
        assert_eq!(r.to_string(), "{{x:0}:6.0,{x:1}:15.0}");
        let r = reduce(&t, Aggregator::Avg, &["x"]).unwrap();
        assert_eq!(r.to_string(), "{{y:0}:2.5,{y:1}:3.5,{y:2}:4.5}");
    }

    #[test]
    fn test_reduce_unknown_dimension() {
        assert!(matches!(
            reduce(&sample(), Aggregator::Sum, &["z"]),
            Err(TensorError::InvalidArgument { .. })
        ));
    }
}
