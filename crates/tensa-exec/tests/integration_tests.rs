//! Integration tests for tensa-exec
//!
//! These tests drive the functions through the public API on tensors built
//! from text, builders and generators.

use tensa_core::{Address, Tensor, TensorError, TensorType};
use tensa_exec::{
    generate, join, join_with_hints, map_with_hints, matmul, reduce, rename, Aggregator,
    BuildSide, ExecHints, TensorFunctions,
};

fn parse(text: &str) -> Tensor {
    text.parse().unwrap()
}

fn square(values: [[f64; 2]; 2], rows: &str, cols: &str) -> Tensor {
    let ty = TensorType::indexed(&[(rows, 2), (cols, 2)]).unwrap();
    generate(&ty, |i| values[i[0]][i[1]]).unwrap()
}

#[test]
fn test_dense_matmul() {
    let a = square([[1.0, 2.0], [3.0, 4.0]], "x", "y");
    let b = square([[5.0, 6.0], [7.0, 8.0]], "y", "z");
    let c = matmul(&a, &b, "y").unwrap();

    assert_eq!(c.tensor_type().to_string(), "tensor(x[2],z[2])");
    assert!(c.is_indexed());
    assert_eq!(c.get(&Address::from_indices(&[0, 0])).unwrap(), 19.0);
    assert_eq!(c.get(&Address::from_indices(&[0, 1])).unwrap(), 22.0);
    assert_eq!(c.get(&Address::from_indices(&[1, 0])).unwrap(), 43.0);
    assert_eq!(c.get(&Address::from_indices(&[1, 1])).unwrap(), 50.0);
}

#[test]
fn test_sparse_matmul() {
    let a = parse("{{i:r0,k:c0}:1.0,{i:r0,k:c1}:2.0,{i:r1,k:c1}:3.0}");
    let b = parse("{{j:o,k:c0}:10.0,{j:o,k:c1}:100.0}");
    let c = a.matmul(&b, "k").unwrap();
    assert_eq!(c.to_string(), "{{i:r0,j:o}:210.0,{i:r1,j:o}:300.0}");
}

#[test]
fn test_dense_and_sparse_joins_agree() {
    let dense_type = TensorType::from_spec("tensor(x[3])").unwrap();
    let a = Tensor::from_text_with_type(&dense_type, "{{x:0}:1.0,{x:1}:2.0,{x:2}:3.0}").unwrap();
    let b = Tensor::from_text_with_spec("tensor(x[2])", "{{x:0}:4.0,{x:1}:5.0}").unwrap();
    let dense = join(&a, &b, |x, y| x * y).unwrap();
    assert_eq!(dense.tensor_type().to_string(), "tensor(x[2])");

    let sparse = join(&parse(&a.to_string()), &parse(&b.to_string()), |x, y| x * y).unwrap();
    assert!(!sparse.is_indexed());
    assert_eq!(dense.to_string(), sparse.to_string());
    assert_eq!(dense.to_string(), "{{x:0}:4.0,{x:1}:10.0}");
}

#[test]
fn test_build_side_does_not_change_results() {
    let scores = parse("{{doc:1,term:a}:0.5,{doc:1,term:b}:1.5,{doc:2,term:a}:2.0,{doc:3,term:c}:9.0}");
    let weights = parse("{{term:a}:2.0,{term:b}:4.0}");
    let expected = join(&scores, &weights, |x, y| x - y).unwrap();

    for side in [BuildSide::Auto, BuildSide::Left, BuildSide::Right] {
        let hints = ExecHints::new().with_build_side(side);
        let forward = join_with_hints(&scores, &weights, |x, y| x - y, &hints).unwrap();
        assert_eq!(forward, expected, "build side {:?}", side);

        let backward = join_with_hints(&weights, &scores, |x, y| y - x, &hints).unwrap();
        assert_eq!(backward, expected, "build side {:?} reversed", side);
    }
}

#[test]
fn test_map_hints_do_not_change_results() {
    let ty = TensorType::indexed(&[("x", 8), ("y", 8)]).unwrap();
    let t = generate(&ty, |i| (i[0] * 8 + i[1]) as f64).unwrap();
    let eager = map_with_hints(&t, |v| v * 0.5 + 1.0, &ExecHints::new().with_parallel_threshold(0));
    let lazy = map_with_hints(
        &t,
        |v| v * 0.5 + 1.0,
        &ExecHints::new().with_parallel_threshold(usize::MAX),
    );
    assert_eq!(eager, lazy);
    assert!(eager.is_indexed());
    assert_eq!(eager.get(&Address::from_indices(&[7, 7])).unwrap(), 32.5);
}

#[test]
fn test_dense_reduce_keeps_storage() {
    let a = square([[1.0, 2.0], [3.0, 4.0]], "x", "y");
    let rows = reduce(&a, Aggregator::Sum, &["y"]).unwrap();
    assert!(rows.is_indexed());
    assert_eq!(rows.to_string(), "{{x:0}:3.0,{x:1}:7.0}");
    assert_eq!(a.max_over(&["x", "y"]).unwrap().as_double().unwrap(), 4.0);
}

#[test]
fn test_rename_dense_transposes() {
    let a = square([[1.0, 2.0], [3.0, 4.0]], "x", "y");
    let t = rename(&a, &["x", "y"], &["y", "x"]).unwrap();
    assert!(t.is_indexed());
    assert_eq!(t.get(&Address::from_indices(&[0, 1])).unwrap(), 3.0);
    assert_eq!(t.get(&Address::from_indices(&[1, 0])).unwrap(), 2.0);
}

#[test]
fn test_aggregator_names() {
    for aggregator in Aggregator::ALL {
        assert_eq!(aggregator.to_string().parse::<Aggregator>().unwrap(), aggregator);
    }
    assert!(matches!(
        "median".parse::<Aggregator>(),
        Err(TensorError::InvalidArgument { .. })
    ));
}

#[test]
fn test_error_kinds() {
    let mapped = parse("{{x:a}:1.0}");
    let indexed = Tensor::from_text_with_spec("tensor(x[2])", "{{x:0}:1.0}").unwrap();
    let other_indexed = Tensor::from_text_with_spec("tensor(y[2])", "{{y:0}:1.0}").unwrap();

    assert!(matches!(
        join(&mapped, &indexed, |x, y| x + y),
        Err(TensorError::InvalidArgument { .. })
    ));
    assert!(matches!(
        join(&mapped, &other_indexed, |x, y| x + y),
        Err(TensorError::TypeConstruction { .. })
    ));
    assert!(matches!(
        reduce(&mapped, Aggregator::Sum, &["z"]),
        Err(TensorError::InvalidArgument { .. })
    ));
    assert!(matches!(
        rename(&mapped, &["x"], &["y", "z"]),
        Err(TensorError::InvalidArgument { .. })
    ));
    assert!(matches!(
        rename(&parse("{{x:a,y:b}:1.0}"), &["x"], &["y"]),
        Err(TensorError::TypeConstruction { .. })
    ));
    assert!(matches!(
        generate(mapped.tensor_type(), |_| 0.0),
        Err(TensorError::InvalidArgument { .. })
    ));
}

#[test]
fn test_errors_convert_to_anyhow() -> anyhow::Result<()> {
    let t = Tensor::from_text("{{x:a}:1.0,{x:b}:3.0}")?;
    let normalized = t.l1_normalize("x")?;
    assert_eq!(normalized.get(&Address::new(["b"]))?, 0.75);

    let failed: anyhow::Result<Tensor> = t.sum(&["nope"]).map_err(Into::into);
    let message = failed.unwrap_err().to_string();
    assert!(message.contains("nope"), "{}", message);
    Ok(())
}
