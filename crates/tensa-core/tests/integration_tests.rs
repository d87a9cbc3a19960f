//! Integration tests for tensa-core
//!
//! These tests exercise the public construction, read and codec API together.

use tensa_core::{
    codec, Address, Dimension, Label, Tensor, TensorBuilder, TensorError, TensorType,
};

#[test]
fn test_build_serialize_parse_mapped() {
    let ty = TensorType::from_spec("tensor(x{},y{})").unwrap();
    let mut builder = TensorBuilder::of(ty.clone());
    builder
        .cell()
        .label("y", "0")
        .label("x", "b")
        .value(3.0)
        .unwrap();
    builder.cell_at(Address::new(["a", "0"]), 2.0).unwrap();
    let tensor = builder.build();

    let text = tensor.to_string();
    assert_eq!(text, "{{x:a,y:0}:2.0,{x:b,y:0}:3.0}");

    let parsed = Tensor::from_text(&text).unwrap();
    assert_eq!(parsed, tensor);
    assert_eq!(parsed.tensor_type(), &ty);
}

#[test]
fn test_indexed_needs_declared_type_to_stay_indexed() {
    let spec = "tensor(x[3])";
    let tensor = Tensor::from_text_with_spec(spec, "{{x:0}:1.0,{x:2}:3.0}").unwrap();
    assert_eq!(tensor.to_string(), "{{x:0}:1.0,{x:1}:0.0,{x:2}:3.0}");

    let inferred = Tensor::from_text(&tensor.to_string()).unwrap();
    assert!(!inferred.is_indexed());
    assert_ne!(inferred, tensor);

    let typed = Tensor::from_text_with_spec(spec, &tensor.to_string()).unwrap();
    assert_eq!(typed, tensor);
}

#[test]
fn test_cells_snapshot_is_independent_of_backend_order() {
    let tensor = Tensor::from_text("{{k:z}:1.0,{k:a}:2.0,{k:m}:3.0}").unwrap();
    let labels: Vec<Label> = tensor
        .cells()
        .keys()
        .map(|a| a.labels()[0].clone())
        .collect();
    assert_eq!(
        labels,
        vec![Label::from("a"), Label::from("m"), Label::from("z")]
    );
}

#[test]
fn test_read_api_errors() {
    let tensor = Tensor::from_text_with_spec("tensor(x[2])", "{{x:0}:1.0,{x:1}:2.0}").unwrap();
    assert!(matches!(
        tensor.get(&Address::new(["a"])),
        Err(TensorError::TypeMismatch { .. })
    ));
    assert!(matches!(
        tensor.get(&Address::from_indices(&[0, 0])),
        Err(TensorError::InvalidArgument { .. })
    ));
    assert!(matches!(tensor.as_double(), Err(TensorError::State { .. })));

    let dimensionless = Tensor::from_text("{{}:1.0}").unwrap();
    assert_eq!(dimensionless.as_double().unwrap(), 1.0);
}

#[test]
fn test_type_spec_contract() {
    let ty: TensorType = "tensor(b{}, a{})".parse().unwrap();
    assert_eq!(ty.to_string(), "tensor(a{},b{})");
    assert_eq!(ty.dimensions()[1], Dimension::mapped("b"));
    assert!("tensor(a{},b[2])".parse::<TensorType>().is_err());
}

#[test]
fn test_error_messages_carry_input() {
    let err = codec::parse("{{x:a}:oops}").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("{{x:a}:oops}"), "{}", message);
    assert!(message.contains("oops"), "{}", message);
}

#[test]
fn test_tensors_are_shareable_across_threads() {
    let tensor = std::sync::Arc::new(Tensor::from_text("{{x:a}:1.0,{x:b}:2.0}").unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tensor = tensor.clone();
            std::thread::spawn(move || tensor.get(&Address::new(["b"])).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2.0);
    }
}

#[test]
fn test_errors_convert_at_the_application_edge() -> anyhow::Result<()> {
    let tensor = Tensor::from_text("{{x:a}:1.5}")?;
    assert_eq!(tensor.get(&Address::new(["a"]))?, 1.5);
    Ok(())
}
