use crate::address::Label;
use crate::tensor::Tensor;
use std::borrow::Cow;

/// The standard string form of a tensor.
///
/// The type is written out only for a tensor that has dimensions but no cells.
pub fn to_standard_string(tensor: &Tensor) -> String {
    if tensor.is_empty() && !tensor.tensor_type().is_dimensionless() {
        format!("{}:{}", tensor.tensor_type(), content_to_string(tensor))
    } else {
        content_to_string(tensor)
    }
}

/// The cell body of the standard string form, without any type prefix
pub fn content_to_string(tensor: &Tensor) -> String {
    let tensor_type = tensor.tensor_type();
    if tensor_type.is_dimensionless() {
        return match tensor.iter().next() {
            Some((_, value)) if value != 0.0 => format!("{{{:?}}}", value),
            _ => "{}".to_string(),
        };
    }

    let cells: Vec<String> = tensor
        .cells()
        .into_iter()
        .map(|(address, value)| format!("{}:{:?}", tensor_type.address_to_string(&address), value))
        .collect();
    format!("{{{}}}", cells.join(","))
}

/// A label as written inside an address.
///
/// Names that would not read back as themselves are double-quoted, with `"`
/// and `\` escaped by a backslash.
pub fn label_to_string(label: &Label) -> Cow<'_, str> {
    let name = match label {
        Label::Index(index) => return Cow::Owned(index.to_string()),
        Label::Name(name) => name.as_str(),
    };
    let needs_quotes = name.is_empty()
        || name.trim() != name
        || name.starts_with(['"', '\''])
        || name.contains([',', '}']);
    if !needs_quotes {
        return Cow::Borrowed(name);
    }
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for c in name.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}
