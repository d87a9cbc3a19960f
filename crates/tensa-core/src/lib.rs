//! # tensa-core
//!
//! Core tensor types, storage backends, builders and the text codec for Tensa.
//!
//! This crate provides the foundational building blocks of the Tensa stack:
//!
//! - **Type model** ([`TensorType`], [`Dimension`]) with indexed and mapped dimensions
//! - **Addresses** ([`Address`], [`Label`]) with a canonical total order
//! - **Dual storage** ([`Storage`]): dense row-major arrays for indexed types,
//!   hashed cells for mapped types, behaviorally identical
//! - **Immutable tensors** ([`Tensor`]) with value-based equality
//! - **Builders** ([`TensorBuilder`]) that pick the backend from the type
//! - **Text codec** ([`codec`]) for the standard `{{x:a}:1.0}` form
//!
//! ## Core Principles
//!
//! ### Sparseness
//!
//! A cell that is absent is undefined; reading it through [`Tensor::get`]
//! yields NaN. Nothing is stored for it. Dense storage is a layout choice for
//! all-indexed types and is never visible through equality or the text form.
//!
//! ### Immutability
//!
//! Tensors never change after construction. Builders are short-lived, owned
//! staging areas and are consumed by [`TensorBuilder::build`].
//!
//! ### SciRS2 Integration
//!
//! Dense storage uses `scirs2_core::ndarray_ext`; direct use of `ndarray` is avoided.
//!
//! ## Quick Start
//!
//! ```
//! use tensa_core::{Address, Tensor, TensorBuilder, TensorType};
//!
//! // Build a sparse tensor cell by cell
//! let ty = TensorType::from_spec("tensor(x{},y{})").unwrap();
//! let mut builder = TensorBuilder::of(ty);
//! builder.cell().label("x", "a").label("y", "0").value(2.0).unwrap();
//! builder.cell().label("x", "b").label("y", "0").value(3.0).unwrap();
//! let tensor = builder.build();
//!
//! assert_eq!(tensor.to_string(), "{{x:a,y:0}:2.0,{x:b,y:0}:3.0}");
//!
//! // Parse it back
//! let parsed: Tensor = tensor.to_string().parse().unwrap();
//! assert_eq!(parsed, tensor);
//! assert_eq!(parsed.get(&Address::new(["a", "0"])).unwrap(), 2.0);
//! ```
//!
//! ## Dense Tensors
//!
//! ```
//! use tensa_core::{Address, Tensor};
//!
//! let t = Tensor::from_text_with_spec("tensor(x[2],y[3])", "{{x:1,y:2}:5.0}").unwrap();
//! assert!(t.is_indexed());
//! assert_eq!(t.len(), 6);
//! assert_eq!(t.get(&Address::from_indices(&[0, 0])).unwrap(), 0.0);
//! assert_eq!(t.get(&Address::from_indices(&[1, 2])).unwrap(), 5.0);
//! ```
//!
//! ## Error Handling
//!
//! Operations return [`TensorResult`], whose error type [`TensorError`]
//! distinguishes type construction, invalid argument, type mismatch, bounds,
//! format and state errors.
//!
//! ```
//! use tensa_core::{TensorError, TensorType, Dimension};
//!
//! let result = TensorType::new([Dimension::mapped("x"), Dimension::indexed("y", 2)]);
//! assert!(matches!(result, Err(TensorError::TypeConstruction { .. })));
//! ```
//!
//! ## Features
//!
//! - `serde`: Enable serialization/deserialization of types and addresses

#![deny(warnings)]

pub mod address;
pub mod builder;
pub mod codec;
pub mod error;
pub mod storage;
pub mod tensor;
pub mod types;


pub use address::{Address, Label, Labels};
pub use builder::{CellBuilder, IndexedBuilder, MappedBuilder, TensorBuilder};
pub use error::{TensorError, TensorResult};
pub use storage::{CellIter, IndexedStorage, MappedStorage, Storage};
pub use tensor::Tensor;
pub use types::{Dimension, DimensionKind, TensorType};
