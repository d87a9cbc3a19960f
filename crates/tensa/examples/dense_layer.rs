//! Dense layer example for Tensa
//!
//! This example demonstrates:
//! - Generating dense tensors from index functions
//! - Building a tensor cell by cell
//! - A matrix-vector product with bias and activation
//! - Renaming dimensions to chain layers

use tensa::prelude::*;

fn main() -> anyhow::Result<()> {
    println!("Tensa - Dense Layer Example");
    println!("===========================\n");

    // Example 1: Weights from a generator
    println!("1. Weights");
    println!("----------");

    let weights = tensa::generate("tensor(in[3],out[2])", |i| {
        if (i[0] + i[1]) % 2 == 0 {
            0.5
        } else {
            -0.25
        }
    })?;
    println!("{}\n", weights);

    // Example 2: Input and bias from builders
    println!("2. Input and bias");
    println!("-----------------");

    let mut input = tensa::builder("tensor(in[3])")?;
    for (i, v) in [1.0, 2.0, 3.0].into_iter().enumerate() {
        input.cell().label("in", i).value(v)?;
    }
    let input = input.build();

    let mut bias = tensa::builder("tensor(out[2])")?;
    bias.cell().label("out", 0usize).value(0.1)?;
    bias.cell().label("out", 1usize).value(-0.1)?;
    let bias = bias.build();
    println!("input: {}", input);
    println!("bias:  {}\n", bias);

    // Example 3: relu(input . weights + bias)
    println!("3. Forward pass");
    println!("---------------");

    let hidden = input.matmul(&weights, "in")?.add(&bias)?.map(|v| v.max(0.0));
    println!("hidden: {}", hidden);
    println!("dense storage kept: {}\n", hidden.is_indexed());

    // Example 4: Feed the output into the next layer
    println!("4. Next layer");
    println!("-------------");

    let next_input = hidden.rename(&["out"], &["in"])?;
    let next_weights = tensa::generate("tensor(in[2],out[1])", |i| 1.0 + i[0] as f64)?;
    let output = next_input.matmul(&next_weights, "in")?;
    println!("output: {}", output);

    let typed = tensa::from_text_with_spec("tensor(out[1])", &output.to_string())?;
    println!("round trip with type: {}", typed == output);

    Ok(())
}
