//! Primitive and composite tensor functions

pub mod composite;
pub mod functions;
pub mod generate;
pub mod join;
pub mod map;
#[cfg(feature = "parallel")]
pub(crate) mod parallel;
pub mod reduce;
pub mod rename;
pub mod types;

pub use composite::{l1_normalize, l2_normalize, matmul, softmax};
pub use functions::TensorFunctions;
pub use generate::generate;
pub use join::{join, join_with_hints};
pub use map::{map, map_with_hints};
pub use reduce::reduce;
pub use rename::{rename, rename_one};
pub use types::{Accumulator, Aggregator, BinaryOp};
