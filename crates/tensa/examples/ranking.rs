//! Ranking example for Tensa
//!
//! This example demonstrates:
//! - Parsing sparse tensors from text
//! - Scoring documents with a join and a reduce
//! - Normalizing scores with softmax
//! - Reading individual cells back

use tensa::prelude::*;

fn main() -> anyhow::Result<()> {
    println!("Tensa - Ranking Example");
    println!("=======================\n");

    // Example 1: Sparse document-term matrix
    println!("1. Document-term matrix");
    println!("-----------------------");

    let docs = tensa::from_text(
        "{{doc:d1,term:rust}:3.0,{doc:d1,term:tensor}:1.0,\
          {doc:d2,term:rust}:1.0,{doc:d2,term:sparse}:2.0,\
          {doc:d3,term:java}:4.0}",
    )?;
    println!("Type: {}", docs.tensor_type());
    println!("Cells: {}\n", docs.len());

    // Example 2: Dot product with a query
    println!("2. Query scoring (join + sum)");
    println!("-----------------------------");

    let query = tensa::from_text("{{term:rust}:0.5,{term:sparse}:1.0,{term:tensor}:2.0}")?;
    let scores = docs.matmul(&query, "term")?;
    println!("Scores: {}", scores);
    println!("d3 has no matching term, so it has no score cell\n");

    // Example 3: Softmax over documents
    println!("3. Softmax over documents");
    println!("-------------------------");

    let probabilities = scores.softmax("doc")?;
    for (address, p) in probabilities.cells() {
        println!("  {} -> {:.4}", probabilities.tensor_type().address_to_string(&address), p);
    }
    let total = probabilities.sum(&[] as &[&str])?.as_double()?;
    println!("Sum of probabilities: {:.4}\n", total);

    // Example 4: Comparisons yield indicator tensors
    println!("4. Threshold");
    println!("------------");

    let threshold = tensa::scalar(1.0);
    let passing = scores.larger(&threshold)?;
    println!("score > 1.0: {}", passing);
    println!("Passing documents: {}", passing.sum(&["doc"])?.as_double()?);
    println!(
        "d1 passes: {}",
        passing.get(&Address::new(["d1"]))? == 1.0
    );

    Ok(())
}
