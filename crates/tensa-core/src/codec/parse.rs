//! Recursive descent parser for the tensor text form.

use crate::builder::TensorBuilder;
use crate::error::{TensorError, TensorResult};
use crate::tensor::Tensor;
use crate::types::{Dimension, TensorType};
use std::borrow::Cow;

/// Parse a tensor, inferring its type from the text when it carries none.
///
/// # Examples
///
/// ```
/// use tensa_core::codec;
///
/// let t = codec::parse("{{x:a,y:0}:2.0,{x:b,y:0}:3.0}").unwrap();
/// assert_eq!(t.tensor_type().to_string(), "tensor(x{},y{})");
///
/// let s = codec::parse("3.5").unwrap();
/// assert_eq!(s.as_double().unwrap(), 3.5);
/// ```
///
/// # Errors
///
/// [`TensorError::Format`] for malformed text, and the cell errors of
/// [`TensorBuilder`] for addresses that do not fit the type.
pub fn parse(text: &str) -> TensorResult<Tensor> {
    parse_text(text, None)
}

/// Parse a tensor of a declared type.
///
/// A `tensor(...)` prefix in the text must declare the same type.
pub fn parse_with_type(tensor_type: &TensorType, text: &str) -> TensorResult<Tensor> {
    parse_text(text, Some(tensor_type))
}

/// Parse a tensor of a declared type given as a type spec
pub fn parse_with_spec(type_spec: &str, text: &str) -> TensorResult<Tensor> {
    let tensor_type = TensorType::from_spec(type_spec)?;
    parse_text(text, Some(&tensor_type))
}

fn parse_text(text: &str, declared: Option<&TensorType>) -> TensorResult<Tensor> {
    let text = text.trim();
    if text.starts_with("tensor(") {
        let (spec, body) = text
            .split_once(':')
            .ok_or_else(|| TensorError::format(text, "expected ':' after the type spec"))?;
        let prefixed = TensorType::from_spec(spec)?;
        if let Some(declared) = declared {
            if *declared != prefixed {
                return Err(TensorError::format(
                    text,
                    format!("text has type {} but {} was expected", prefixed, declared),
                ));
            }
        }
        log::trace!("parsing cells of declared {}", prefixed);
        parse_body(body, &prefixed)
    } else if text.starts_with('{') {
        let tensor_type = match declared {
            Some(declared) => declared.clone(),
            None => infer_type(text)?,
        };
        log::trace!("parsing cells of {}", tensor_type);
        parse_body(text, &tensor_type)
    } else {
        if let Some(declared) = declared {
            if !declared.is_dimensionless() {
                return Err(TensorError::format(
                    text,
                    format!("a single number cannot be a tensor of {}", declared),
                ));
            }
        }
        let value = parse_number(text, text)?;
        Ok(Tensor::scalar(value))
    }
}

/// Infer a type from the first address of a cell body.
///
/// Inferred dimensions are always mapped. A body without addresses, such as
/// `{}` or `{2.0}`, infers the dimensionless type.
///
/// # Errors
///
/// [`TensorError::Format`] if the first address is malformed or its names do
/// not make a valid type.
pub fn infer_type(text: &str) -> TensorResult<TensorType> {
    let mut cursor = Cursor::new(text.trim());
    cursor.expect(b'{')?;
    cursor.skip_whitespace();
    if cursor.peek() != Some(b'{') {
        return Ok(TensorType::empty());
    }
    let elements = cursor.address()?;
    TensorType::new(elements.iter().map(|(name, _)| Dimension::mapped(*name)))
        .map_err(|e| cursor.error(e.to_string()))
}

fn parse_body(body: &str, tensor_type: &TensorType) -> TensorResult<Tensor> {
    let mut cursor = Cursor::new(body.trim());
    let mut builder = TensorBuilder::of(tensor_type.clone());
    cursor.expect(b'{')?;
    cursor.skip_whitespace();

    if tensor_type.is_dimensionless() {
        if cursor.eat(b'}') {
            builder.scalar(0.0)?;
        } else {
            if cursor.peek() == Some(b'{') {
                let elements = cursor.address()?;
                if !elements.is_empty() {
                    return Err(cursor.error("a dimensionless tensor has no address labels"));
                }
                cursor.expect(b':')?;
            }
            let value = cursor.number()?;
            builder.scalar(value)?;
            cursor.expect(b'}')?;
        }
    } else if !cursor.eat(b'}') {
        loop {
            cursor.cell(&mut builder)?;
            cursor.skip_whitespace();
            if cursor.eat(b',') {
                cursor.skip_whitespace();
                continue;
            }
            cursor.expect(b'}')?;
            break;
        }
    }

    cursor.skip_whitespace();
    if !cursor.at_end() {
        return Err(cursor.error(format!(
            "unexpected trailing text '{}'",
            cursor.rest()
        )));
    }
    Ok(builder.build())
}

fn parse_number(token: &str, input: &str) -> TensorResult<f64> {
    token
        .trim()
        .parse::<f64>()
        .map_err(|_| TensorError::format(input, format!("'{}' is not a number", token.trim())))
}

/// Byte cursor over one piece of text
struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn error(&self, reason: impl Into<String>) -> TensorError {
        TensorError::format(self.input, reason)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.position += 1;
        }
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: u8) -> TensorResult<()> {
        self.skip_whitespace();
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(match self.peek() {
                Some(found) => format!(
                    "expected '{}' at position {} but found '{}'",
                    expected as char, self.position, found as char
                ),
                None => format!("expected '{}' but reached the end", expected as char),
            }))
        }
    }

    /// Take text up to (not including) the first of the stop bytes, trimmed
    fn token(&mut self, stops: &[u8]) -> &'a str {
        let start = self.position;
        while matches!(self.peek(), Some(b) if !stops.contains(&b)) {
            self.position += 1;
        }
        self.input[start..self.position].trim()
    }

    fn number(&mut self) -> TensorResult<f64> {
        let token = self.token(b",}");
        if token.is_empty() {
            return Err(self.error(format!("missing value at position {}", self.position)));
        }
        parse_number(token, self.input)
    }

    /// A bare label up to the next `,` or `}`, or a quoted one in which a
    /// backslash escapes the following character
    fn label(&mut self) -> TensorResult<Cow<'a, str>> {
        self.skip_whitespace();
        let quote = match self.peek() {
            Some(quote @ (b'"' | b'\'')) => quote as char,
            _ => return Ok(Cow::Borrowed(self.token(b",}"))),
        };
        let start = self.position;
        let mut label = String::new();
        let mut escaped = false;
        for (offset, c) in self.input[start + 1..].char_indices() {
            if escaped {
                label.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                self.position = start + 1 + offset + c.len_utf8();
                self.skip_whitespace();
                return Ok(Cow::Owned(label));
            } else {
                label.push(c);
            }
        }
        Err(self.error(format!("unterminated label at position {}", start)))
    }

    /// Parse `{dimension:label,...}` into its elements in text order
    fn address(&mut self) -> TensorResult<Vec<(&'a str, Cow<'a, str>)>> {
        self.expect(b'{')?;
        self.skip_whitespace();
        let mut elements = Vec::new();
        if self.eat(b'}') {
            return Ok(elements);
        }
        loop {
            let element_start = self.position;
            let name = self.token(b":,}");
            if !self.eat(b':') || name.is_empty() {
                let element = self.input[element_start..self.position].trim();
                return Err(self.error(format!(
                    "address element '{}' is not on the form dimension:label",
                    element
                )));
            }
            let label = self.label()?;
            elements.push((name, label));
            if self.eat(b',') {
                continue;
            }
            self.expect(b'}')?;
            return Ok(elements);
        }
    }

    /// Parse `{address}:value` and commit it to the builder
    fn cell(&mut self, builder: &mut TensorBuilder) -> TensorResult<()> {
        let elements = self.address()?;
        self.expect(b':')?;
        let value = self.number()?;
        let mut cell = builder.cell();
        for (name, label) in elements {
            cell = cell.label(name, label.into_owned());
        }
        cell.value(value)?;
        Ok(())
    }
}
