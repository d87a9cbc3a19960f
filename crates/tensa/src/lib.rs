//! # Tensa - Sparse/Dense Labeled Tensor Algebra
//!
//! **Immutable tensors** with named dimensions, mixing sparse (mapped) and
//! dense (indexed) storage behind one value type, and a small algebra of
//! functions over them.
//!
//! This is the **meta crate** that re-exports all Tensa components for convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use tensa::prelude::*;
//!
//! let scores = tensa::from_text("{{doc:1,term:a}:0.5,{doc:1,term:b}:1.5,{doc:2,term:a}:2.0}")?;
//! let weights = tensa::from_text("{{term:a}:2.0,{term:b}:4.0}")?;
//!
//! let ranked = scores.multiply(&weights)?.sum(&["term"])?;
//! assert_eq!(ranked.to_string(), "{{doc:1}:7.0,{doc:2}:4.0}");
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Tensor Model ([`core`])
//!
//! Types, addresses, storage backends, builders and the text codec.
//!
//! ```
//! use tensa::core::{Tensor, TensorBuilder, TensorType};
//!
//! let ty = TensorType::from_spec("tensor(x{},y{})").unwrap();
//! let mut builder = TensorBuilder::of(ty);
//! builder.cell().label("x", "a").label("y", "0").value(2.0).unwrap();
//! let t: Tensor = builder.build();
//! assert_eq!(t.to_string(), "{{x:a,y:0}:2.0}");
//! ```
//!
//! ### Tensor Functions ([`exec`])
//!
//! The primitives map, reduce, join, rename and generate, the composites
//! built from them, and execution hints.
//!
//! ```
//! use tensa::exec::{reduce, Aggregator};
//!
//! let t = tensa::from_text_with_spec("tensor(x[2],y[2])", "{{x:0,y:0}:1.0,{x:1,y:1}:2.0}").unwrap();
//! let rows = reduce(&t, Aggregator::Max, &["y"]).unwrap();
//! assert_eq!(rows.to_string(), "{{x:0}:1.0,{x:1}:2.0}");
//! ```
//!
//! ## Features
//!
//! - `parallel`: Map large dense tensors on multiple threads
//! - `serde`: Serialize and deserialize types and addresses
//!
//! ## Examples
//!
//! See the `examples/` directory of this crate for usage demonstrations.

#![deny(warnings)]

// Re-export all components
pub use tensa_core as core;
pub use tensa_exec as exec;

use tensa_core::{Tensor, TensorBuilder, TensorResult, TensorType};

/// Parse a tensor from its text form, inferring the type from the first address.
pub fn from_text(text: &str) -> TensorResult<Tensor> {
    Tensor::from_text(text)
}

/// Parse a tensor from its text form against a type spec such as `tensor(x[3])`.
pub fn from_text_with_spec(type_spec: &str, text: &str) -> TensorResult<Tensor> {
    Tensor::from_text_with_spec(type_spec, text)
}

/// A dimensionless tensor holding one value
pub fn scalar(value: f64) -> Tensor {
    Tensor::scalar(value)
}

/// A builder for the type described by `type_spec`.
///
/// ```
/// let mut builder = tensa::builder("tensor(x[2])").unwrap();
/// builder.cell().label("x", 1usize).value(5.0).unwrap();
/// assert_eq!(builder.build().to_string(), "{{x:0}:0.0,{x:1}:5.0}");
/// ```
pub fn builder(type_spec: &str) -> TensorResult<TensorBuilder> {
    Ok(TensorBuilder::of(TensorType::from_spec(type_spec)?))
}

/// A dense tensor of the type described by `type_spec` with values from `f`.
///
/// ```
/// let identity = tensa::generate("tensor(x[2],y[2])", |i| (i[0] == i[1]) as u8 as f64).unwrap();
/// assert_eq!(identity.to_string(), "{{x:0,y:0}:1.0,{x:0,y:1}:0.0,{x:1,y:0}:0.0,{x:1,y:1}:1.0}");
/// ```
pub fn generate<F>(type_spec: &str, f: F) -> TensorResult<Tensor>
where
    F: Fn(&[usize]) -> f64,
{
    tensa_exec::generate(&TensorType::from_spec(type_spec)?, f)
}

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use tensa::prelude::*;
    //!
    //! let t: Tensor = "{{x:a}:1.0,{x:b}:3.0}".parse().unwrap();
    //! let n = t.l1_normalize("x").unwrap();
    //! assert_eq!(n.get(&Address::new(["b"])).unwrap(), 0.75);
    //! ```

    // Tensor model
    pub use crate::core::{
        Address, Dimension, DimensionKind, Label, Tensor, TensorBuilder, TensorError,
        TensorResult, TensorType,
    };

    // Functions
    pub use crate::exec::{
        generate, join, map, reduce, rename, Aggregator, BinaryOp, BuildSide, ExecHints,
        TensorFunctions,
    };
}
