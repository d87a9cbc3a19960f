//! Text codec for tensors.
//!
//! The standard form lists cells in canonical address order:
//!
//! ```text
//! {{x:a,y:0}:2.0,{x:b,y:0}:3.0}
//! ```
//!
//! A dimensionless tensor renders as `{}` when its value is zero or absent and
//! as `{value}` otherwise. A tensor with dimensions but no cells is prefixed by
//! its type, `tensor(x{}):{}`, since nothing else would tell the dimensions.
//!
//! A mapped label that is empty, has surrounding whitespace, starts with a
//! quote or contains `,` or `}` is written in double quotes, with `"` and `\`
//! escaped by a backslash: `{x:"a,b"}`. The parser reads single- or
//! double-quoted labels with the same escapes.
//!
//! Parsing accepts three shapes: a `tensor(<spec>):` prefixed body, a bare `{`
//! body (with the type inferred from the first address when none is given),
//! and a bare number. Everything else is a [`Format`](crate::TensorError::Format)
//! error.

mod format;
mod parse;

pub use format::{content_to_string, label_to_string, to_standard_string};
pub use parse::{infer_type, parse, parse_with_spec, parse_with_type};
