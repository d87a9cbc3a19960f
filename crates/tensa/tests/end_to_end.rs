//! End-to-end tests through the meta crate
//!
//! Tensors are built from text, transformed with the function algebra and
//! read back through the text codec.

use proptest::prelude::*;
use std::sync::Arc;
use std::thread;
use tensa::prelude::*;

fn parse(text: &str) -> Tensor {
    text.parse().unwrap()
}

#[test]
fn test_reduce_over_one_dimension() -> anyhow::Result<()> {
    let t = tensa::from_text_with_spec("tensor(x{},y{})", "{{x:a,y:0}:2.0,{x:b,y:0}:3.0}")?;
    let r = reduce(&t, Aggregator::Sum, &["y"])?;
    assert_eq!(r.tensor_type(), &TensorType::from_spec("tensor(x{})")?);
    assert_eq!(r.to_string(), "{{x:a}:2.0,{x:b}:3.0}");
    Ok(())
}

#[test]
fn test_join_multiply() -> anyhow::Result<()> {
    let a = tensa::from_text_with_spec("tensor(x{})", "{{x:a}:2.0}")?;
    let b = tensa::from_text_with_spec("tensor(x{})", "{{x:a}:3.0}")?;
    assert_eq!(a.multiply(&b)?, parse("{{x:a}:6.0}"));
    Ok(())
}

#[test]
fn test_numeric_labels_infer_mapped() -> anyhow::Result<()> {
    let text = "{{x:0}:1.0,{x:1}:2.0}";
    let t = tensa::from_text(text)?;
    assert!(!t.is_indexed());
    assert_eq!(t.tensor_type().to_string(), "tensor(x{})");
    assert_eq!(t.to_string(), text);
    assert_eq!(tensa::from_text(&t.to_string())?, t);
    Ok(())
}

#[test]
fn test_dimensionless_round_trip_needs_type() -> anyhow::Result<()> {
    let zero = tensa::scalar(0.0);
    assert_eq!(zero.to_string(), "{}");
    let reparsed = tensa::from_text_with_spec("tensor()", &zero.to_string())?;
    assert_eq!(reparsed.as_double()?, 0.0);
    assert_eq!(reparsed, zero);

    let bare = tensa::from_text("3.5")?;
    assert_eq!(bare.as_double()?, 3.5);
    assert_eq!(bare.to_string(), "{3.5}");
    Ok(())
}

#[test]
fn test_scoring_pipeline() -> anyhow::Result<()> {
    // Query term weights against a sparse document-term matrix
    let docs = tensa::from_text(
        "{{doc:d1,term:rust}:3.0,{doc:d1,term:tensor}:1.0,{doc:d2,term:rust}:1.0,{doc:d3,term:java}:4.0}",
    )?;
    let query = tensa::from_text("{{term:rust}:0.5,{term:tensor}:2.0}")?;

    let scores = docs.matmul(&query, "term")?;
    assert_eq!(scores.to_string(), "{{doc:d1}:3.5,{doc:d2}:0.5}");

    let probabilities = scores.softmax("doc")?;
    let total = probabilities.sum(&[] as &[&str])?.as_double()?;
    assert!((total - 1.0).abs() < 1e-12);

    let best = probabilities.max_over(&["doc"])?.as_double()?;
    assert_eq!(best, probabilities.get(&Address::new(["d1"]))?);
    Ok(())
}

#[test]
fn test_dense_pipeline() -> anyhow::Result<()> {
    let weights = tensa::generate("tensor(in[3],out[2])", |i| (i[0] + i[1]) as f64)?;
    let input = tensa::from_text_with_spec("tensor(in[3])", "{{in:0}:1.0,{in:1}:2.0,{in:2}:3.0}")?;

    let output = input.matmul(&weights, "in")?;
    assert!(output.is_indexed());
    // out 0: 1*0 + 2*1 + 3*2, out 1: 1*1 + 2*2 + 3*3
    assert_eq!(output.to_string(), "{{out:0}:8.0,{out:1}:14.0}");

    let activated = output.map(|v| v.max(10.0));
    assert_eq!(activated.to_string(), "{{out:0}:10.0,{out:1}:14.0}");

    let typed = tensa::from_text_with_spec("tensor(out[2])", &activated.to_string())?;
    assert!(typed.is_indexed());
    assert_eq!(typed, activated);
    Ok(())
}

#[test]
fn test_dense_join_with_shorter_unbound_input() -> anyhow::Result<()> {
    let ones = tensa::generate("tensor(x[5])", |_| 1.0)?;
    let short = tensa::from_text_with_spec("tensor(x[])", "{{x:0}:2.0,{x:1}:3.0}")?;
    let product = ones.multiply(&short)?;
    assert_eq!(product.len(), 2);
    assert_eq!(product.tensor_type().to_string(), "tensor(x[])");
    assert_eq!(product.sum(&["x"])?.as_double()?, 5.0);
    Ok(())
}

#[test]
fn test_labels_with_separators_round_trip() -> anyhow::Result<()> {
    let mut builder = tensa::builder("tensor(name{})")?;
    builder.cell_at(Address::new(["a,b"]), 1.0)?;
    builder.cell_at(Address::new(["{c:d}"]), 2.0)?;
    let t = builder.build();
    assert_eq!(t.to_string(), r#"{{name:"a,b"}:1.0,{name:"{c:d}"}:2.0}"#);
    assert_eq!(tensa::from_text(&t.to_string())?, t);
    Ok(())
}

#[test]
fn test_builder_facade() -> anyhow::Result<()> {
    let mut builder = tensa::builder("tensor(user{},item{})")?;
    builder.cell().label("user", "u1").label("item", "i1").value(1.0)?;
    builder.cell().label("item", "i2").label("user", "u1").value(0.5)?;
    builder.cell_at(Address::new(["u2", "i1"]), 2.0)?;
    let ratings = builder.build();

    let per_item = ratings.avg(&["user"])?;
    assert_eq!(per_item.to_string(), "{{item:i1}:1.5,{item:i2}:0.5}");
    Ok(())
}

#[test]
fn test_shared_across_threads() {
    let t = Arc::new(parse("{{x:a,y:p}:1.0,{x:b,y:p}:2.0,{x:b,y:q}:4.0}"));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let t = Arc::clone(&t);
            thread::spawn(move || {
                let scaled = t.map(move |v| v * i as f64);
                scaled.sum(&["x", "y"]).unwrap().as_double().unwrap()
            })
        })
        .collect();
    let totals: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(totals, vec![0.0, 7.0, 14.0, 21.0]);
}

#[test]
fn test_errors_surface_to_caller() {
    assert!(matches!(tensa::from_text("nonsense"), Err(TensorError::Format { .. })));
    assert!(matches!(
        parse("{{x:a}:1.0}").as_double(),
        Err(TensorError::State { .. })
    ));
    assert!(matches!(
        parse("{{x:a}:1.0}").rename(&["nope"], &["y"]),
        Err(TensorError::InvalidArgument { .. })
    ));
    assert!(matches!(
        TensorType::new([Dimension::mapped("x"), Dimension::indexed("y", 2)]),
        Err(TensorError::TypeConstruction { .. })
    ));
}

fn sparse_tensor() -> impl Strategy<Value = Tensor> {
    prop::collection::vec(("[a-d]", "[0-3]", -50f64..50.0), 0..12).prop_map(|cells| {
        let mut builder = TensorBuilder::of(TensorType::mapped(&["x", "y"]).unwrap());
        for (x, y, value) in cells {
            builder.cell_at(Address::new([x, y]), value).unwrap();
        }
        builder.build()
    })
}

proptest! {
    #[test]
    fn prop_text_round_trip(t in sparse_tensor()) {
        prop_assert_eq!(tensa::from_text(&t.to_string()).unwrap(), t);
    }

    #[test]
    fn prop_join_of_scalars_is_function_of_values(a in -1e3f64..1e3, b in -1e3f64..1e3) {
        let joined = join(&tensa::scalar(a), &tensa::scalar(b), f64::max).unwrap();
        prop_assert_eq!(joined.as_double().unwrap(), a.max(b));
    }

    #[test]
    fn prop_sum_over_all_dimensions(t in sparse_tensor()) {
        let total = t.sum(&["x", "y"]).unwrap();
        prop_assert!(total.tensor_type().is_dimensionless());
        let expected: f64 = t.cells().values().sum();
        prop_assert!((total.as_double().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn prop_rename_twice_is_identity(t in sparse_tensor()) {
        let there = rename(&t, &["x", "y"], &["b", "a"]).unwrap();
        prop_assert_eq!(rename(&there, &["b", "a"], &["x", "y"]).unwrap(), t);
    }
}
