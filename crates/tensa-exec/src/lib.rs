//! # tensa-exec
//!
//! Tensor functions for Tensa.
//!
//! This crate provides:
//! - The primitives [`map`], [`reduce`], [`join`], [`rename`] and [`generate`]
//! - Composites built only from the primitives: [`l1_normalize`],
//!   [`l2_normalize`], [`matmul`] and [`softmax`]
//! - Join and reduce shortcuts in [`ops`] (`multiply`, `larger`, `sum`, ...)
//! - The [`TensorFunctions`] extension trait exposing all of the above as methods
//! - [`ExecHints`] to steer join build sides and parallel map
//!
//! All functions take immutable tensors and return new ones.
//!
//! ## Example
//!
//! ```
//! use tensa_core::Tensor;
//! use tensa_exec::{Aggregator, TensorFunctions};
//!
//! let a: Tensor = "{{x:a,y:0}:2.0,{x:b,y:0}:3.0}".parse().unwrap();
//! let b: Tensor = "{{y:0}:10.0}".parse().unwrap();
//!
//! let scaled = a.multiply(&b).unwrap();
//! let summed = scaled.reduce(Aggregator::Sum, &["y"]).unwrap();
//! assert_eq!(summed.to_string(), "{{x:a}:20.0,{x:b}:30.0}");
//! ```
//!
//! ## Features
//!
//! - `parallel`: map large dense tensors on multiple threads (rayon, through scirs2-core)

#![deny(warnings)]

pub mod executor;
pub mod hints;
pub mod ops;

// Re-exports
pub use executor::*;
pub use hints::*;
