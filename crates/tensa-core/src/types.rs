//! Tensor type definitions.
//!
//! This module defines the type model used throughout the Tensa stack:
//!
//! - [`DimensionKind`]: indexed (ordinal labels, optionally bounded) or mapped (string labels)
//! - [`Dimension`]: a named axis with a kind
//! - [`TensorType`]: the canonical, name-sorted set of a tensor's dimensions
//!
//! A type never mixes indexed and mapped dimensions; [`TensorType::new`] rejects
//! such combinations up front so storage selection is a pure function of the type.
//!
//! # Type specs
//!
//! Types have a text form, `tensor(<dim>,...)`, where a dimension is written
//! `name{}` (mapped), `name[N]` (indexed with size N) or `name[]` (indexed,
//! size taken from content). `tensor()` is the dimensionless type.
//!
//! ```
//! use tensa_core::{Dimension, TensorType};
//!
//! let ty = TensorType::from_spec("tensor(y[3], x[])").unwrap();
//! assert_eq!(ty.rank(), 2);
//! // Dimensions are kept in canonical (lexical) order
//! assert_eq!(ty.dimensions()[0].name(), "x");
//! assert_eq!(ty.to_string(), "tensor(x[],y[3])");
//!
//! let mixed = TensorType::new([Dimension::mapped("a"), Dimension::indexed("b", 2)]);
//! assert!(mixed.is_err());
//! ```

use crate::address::{Address, Label, Labels};
use crate::codec;
use crate::error::{TensorError, TensorResult};
use crate::storage::IndexedStorage;
use std::fmt;
use std::str::FromStr;

/// The kind of a dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DimensionKind {
    /// Labels are ordinals `0..size`; `None` means the size is taken from content
    Indexed { size: Option<usize> },
    /// Labels are arbitrary strings
    Mapped,
}

/// A named tensor dimension.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension {
    name: String,
    kind: DimensionKind,
}

impl Dimension {
    /// An indexed dimension with a fixed size
    pub fn indexed(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            kind: DimensionKind::Indexed { size: Some(size) },
        }
    }

    /// An indexed dimension whose size is resolved from content at build time
    pub fn indexed_unbound(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DimensionKind::Indexed { size: None },
        }
    }

    /// A mapped dimension
    pub fn mapped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DimensionKind::Mapped,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DimensionKind {
        self.kind
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self.kind, DimensionKind::Indexed { .. })
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self.kind, DimensionKind::Mapped)
    }

    /// The declared size of a bound indexed dimension
    pub fn size(&self) -> Option<usize> {
        match self.kind {
            DimensionKind::Indexed { size } => size,
            DimensionKind::Mapped => None,
        }
    }

    /// Whether both dimensions are of the same kind, ignoring indexed sizes
    pub fn same_kind(&self, other: &Dimension) -> bool {
        self.is_indexed() == other.is_indexed()
    }

    fn kind_name(&self) -> &'static str {
        if self.is_indexed() {
            "indexed"
        } else {
            "mapped"
        }
    }

    fn renamed(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: self.kind,
        }
    }

    /// Convert a label to the kind this dimension stores.
    ///
    /// Indexed dimensions accept ordinals and strings holding an unsigned
    /// integer; bound sizes are enforced. Mapped dimensions accept strings and
    /// render ordinals in decimal.
    ///
    /// # Errors
    ///
    /// [`TensorError::TypeMismatch`] for a non-numeric label on an indexed
    /// dimension, [`TensorError::IndexOutOfBounds`] for an ordinal beyond the size.
    pub fn coerce_label(&self, label: Label) -> TensorResult<Label> {
        match self.kind {
            DimensionKind::Mapped => match label {
                Label::Name(name) => Ok(Label::Name(name)),
                Label::Index(index) => Ok(Label::Name(index.to_string())),
            },
            DimensionKind::Indexed { size } => {
                let index = match label {
                    Label::Index(index) => index,
                    Label::Name(name) => {
                        name.trim()
                            .parse::<usize>()
                            .map_err(|_| TensorError::TypeMismatch {
                                dimension: self.name.clone(),
                                kind: self.kind_name(),
                                label: name.clone(),
                            })?
                    }
                };
                match size {
                    Some(size) if index >= size => Err(TensorError::IndexOutOfBounds {
                        dimension: self.name.clone(),
                        label: index,
                        size,
                    }),
                    _ => Ok(Label::Index(index)),
                }
            }
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DimensionKind::Mapped => write!(f, "{}{{}}", self.name),
            DimensionKind::Indexed { size: Some(size) } => write!(f, "{}[{}]", self.name, size),
            DimensionKind::Indexed { size: None } => write!(f, "{}[]", self.name),
        }
    }
}

/// The type of a tensor: its dimensions in canonical order.
///
/// Two types are equal iff they have the same dimension names with the same
/// kinds and sizes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TensorType {
    dimensions: Vec<Dimension>,
}

impl TensorType {
    /// Create a type from dimensions given in any order.
    ///
    /// # Errors
    ///
    /// [`TensorError::TypeConstruction`] if a name is invalid or repeated, if
    /// indexed and mapped dimensions are mixed, or if the bound sizes are too
    /// large for dense storage.
    pub fn new(dimensions: impl IntoIterator<Item = Dimension>) -> TensorResult<Self> {
        let mut dimensions: Vec<Dimension> = dimensions.into_iter().collect();
        for dimension in &dimensions {
            validate_name(dimension.name())?;
        }
        dimensions.sort_by(|a, b| a.name.cmp(&b.name));
        if let Some(pair) = dimensions.windows(2).find(|w| w[0].name == w[1].name) {
            return Err(TensorError::type_construction(format!(
                "duplicate dimension name '{}'",
                pair[0].name
            )));
        }
        let indexed = dimensions.iter().any(Dimension::is_indexed);
        let mapped = dimensions.iter().any(Dimension::is_mapped);
        if indexed && mapped {
            return Err(TensorError::type_construction(format!(
                "mixed indexed and mapped dimensions are not supported: {}",
                render(&dimensions)
            )));
        }
        if indexed {
            let bound: Vec<usize> = dimensions.iter().filter_map(Dimension::size).collect();
            if let Err(e) = IndexedStorage::checked_len(&bound) {
                return Err(TensorError::type_construction(format!(
                    "{}: {}",
                    render(&dimensions),
                    e
                )));
            }
        }
        Ok(Self { dimensions })
    }

    /// The dimensionless type
    pub fn empty() -> Self {
        Self::default()
    }

    /// A type of mapped dimensions with the given names
    pub fn mapped<S: AsRef<str>>(names: &[S]) -> TensorResult<Self> {
        Self::new(names.iter().map(|n| Dimension::mapped(n.as_ref())))
    }

    /// A type of bound indexed dimensions with the given names and sizes
    pub fn indexed<S: AsRef<str>>(dimensions: &[(S, usize)]) -> TensorResult<Self> {
        Self::new(
            dimensions
                .iter()
                .map(|(n, size)| Dimension::indexed(n.as_ref(), *size)),
        )
    }

    /// Parse a type spec such as `tensor(x{},y{})` or `tensor(x[3])`.
    ///
    /// # Errors
    ///
    /// [`TensorError::Format`] for text outside the type-spec grammar; type
    /// construction errors are reported as format errors naming the input.
    pub fn from_spec(spec: &str) -> TensorResult<Self> {
        let trimmed = spec.trim();
        let body = trimmed
            .strip_prefix("tensor(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| TensorError::format(spec, "expected 'tensor(<dimensions>)'"))?;
        if body.trim().is_empty() {
            return Ok(Self::empty());
        }

        let mut dimensions = Vec::new();
        for part in body.split(',') {
            let part = part.trim();
            if let Some(name) = part.strip_suffix("{}") {
                dimensions.push(Dimension::mapped(name.trim()));
            } else if let Some(rest) = part.strip_suffix(']') {
                let (name, size) = rest.split_once('[').ok_or_else(|| {
                    TensorError::format(spec, format!("malformed dimension '{}'", part))
                })?;
                let size = size.trim();
                if size.is_empty() {
                    dimensions.push(Dimension::indexed_unbound(name.trim()));
                } else {
                    let size = size.parse::<usize>().map_err(|_| {
                        TensorError::format(spec, format!("invalid dimension size '{}'", size))
                    })?;
                    dimensions.push(Dimension::indexed(name.trim(), size));
                }
            } else {
                return Err(TensorError::format(
                    spec,
                    format!(
                        "dimension '{}' must be on the form name{{}}, name[] or name[N]",
                        part
                    ),
                ));
            }
        }
        Self::new(dimensions).map_err(|e| TensorError::format(spec, e.to_string()))
    }

    /// Dimensions in canonical order
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Number of dimensions (the order of tensors of this type)
    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }

    /// Whether this is the dimensionless type
    pub fn is_dimensionless(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Look up a dimension by name
    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.index_of(name).map(|i| &self.dimensions[i])
    }

    /// Canonical position of a dimension
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.dimensions
            .binary_search_by(|d| d.name.as_str().cmp(name))
            .ok()
    }

    /// Dimension names in canonical order
    pub fn dimension_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.dimensions.iter().map(Dimension::name)
    }

    /// Whether any dimension is mapped (selects the mapped storage backend)
    pub fn has_mapped(&self) -> bool {
        self.dimensions.iter().any(Dimension::is_mapped)
    }

    /// Whether any dimension is indexed
    pub fn has_indexed(&self) -> bool {
        self.dimensions.iter().any(Dimension::is_indexed)
    }

    /// The type remaining after removing the named dimensions.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidArgument`] if a name is not a dimension of this type.
    pub fn without<S: AsRef<str>>(&self, names: &[S]) -> TensorResult<TensorType> {
        for name in names {
            if self.index_of(name.as_ref()).is_none() {
                return Err(TensorError::invalid_argument(format!(
                    "dimension '{}' is not present in {}",
                    name.as_ref(),
                    self
                )));
            }
        }
        Ok(Self {
            dimensions: self
                .dimensions
                .iter()
                .filter(|d| !names.iter().any(|n| n.as_ref() == d.name))
                .cloned()
                .collect(),
        })
    }

    /// The type of the join of tensors of this and the other type.
    ///
    /// Shared dimensions must be of the same kind. When both sides bound a
    /// shared indexed dimension the smaller size wins; if either side leaves
    /// it unbound the result is unbound.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidArgument`] for a shared name with differing kinds,
    /// [`TensorError::TypeConstruction`] if the union mixes kinds.
    pub fn union(&self, other: &TensorType) -> TensorResult<TensorType> {
        let mut dimensions = self.dimensions.clone();
        for theirs in &other.dimensions {
            match self.index_of(&theirs.name) {
                None => dimensions.push(theirs.clone()),
                Some(position) => {
                    let ours = &self.dimensions[position];
                    if !ours.same_kind(theirs) {
                        return Err(TensorError::invalid_argument(format!(
                            "dimension '{}' is {} in {} but {} in {}",
                            ours.name,
                            ours.kind_name(),
                            self,
                            theirs.kind_name(),
                            other
                        )));
                    }
                    let size = match (ours.size(), theirs.size()) {
                        (Some(a), Some(b)) => Some(a.min(b)),
                        _ => None,
                    };
                    if ours.is_indexed() {
                        dimensions[position].kind = DimensionKind::Indexed { size };
                    }
                }
            }
        }
        Self::new(dimensions)
    }

    /// This type with dimensions renamed positionally from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidArgument`] for unequal lengths, repeated or absent
    /// source names; [`TensorError::TypeConstruction`] if the result has
    /// duplicate names.
    pub fn renamed<S: AsRef<str>, T: AsRef<str>>(
        &self,
        from: &[S],
        to: &[T],
    ) -> TensorResult<TensorType> {
        if from.len() != to.len() {
            return Err(TensorError::invalid_argument(format!(
                "rename needs as many target names as source names, got {} and {}",
                from.len(),
                to.len()
            )));
        }
        for (i, name) in from.iter().enumerate() {
            let name = name.as_ref();
            if self.index_of(name).is_none() {
                return Err(TensorError::invalid_argument(format!(
                    "cannot rename '{}': not a dimension of {}",
                    name, self
                )));
            }
            if from[..i].iter().any(|n| n.as_ref() == name) {
                return Err(TensorError::invalid_argument(format!(
                    "dimension '{}' is renamed more than once",
                    name
                )));
            }
        }
        Self::new(self.dimensions.iter().map(|d| {
            match from.iter().position(|n| n.as_ref() == d.name) {
                Some(i) => d.renamed(to[i].as_ref()),
                None => d.clone(),
            }
        }))
    }

    /// Validate an address against this type, coercing labels to the stored kind.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidArgument`] for an address of the wrong length, and
    /// the errors of [`Dimension::coerce_label`].
    pub fn coerce_address(&self, address: &Address) -> TensorResult<Address> {
        if address.len() != self.rank() {
            return Err(TensorError::invalid_argument(format!(
                "address has {} labels but {} has {} dimensions",
                address.len(),
                self,
                self.rank()
            )));
        }
        let labels = self
            .dimensions
            .iter()
            .zip(address.labels())
            .map(|(d, l)| d.coerce_label(l.clone()))
            .collect::<TensorResult<Labels>>()?;
        Ok(Address::from_labels(labels))
    }

    /// Render an address of this type as `{dim:label,...}`, quoting labels
    /// that would not parse back as themselves.
    pub fn address_to_string(&self, address: &Address) -> String {
        let elements: Vec<String> = self
            .dimensions
            .iter()
            .zip(address.labels())
            .map(|(d, l)| format!("{}:{}", d.name, codec::label_to_string(l)))
            .collect();
        format!("{{{}}}", elements.join(","))
    }
}

fn validate_name(name: &str) -> TensorResult<()> {
    if name.is_empty() {
        return Err(TensorError::type_construction("dimension name is empty"));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(TensorError::type_construction(format!(
            "invalid dimension name '{}'",
            name
        )));
    }
    Ok(())
}

fn render(dimensions: &[Dimension]) -> String {
    let parts: Vec<String> = dimensions.iter().map(ToString::to_string).collect();
    format!("tensor({})", parts.join(","))
}

impl fmt::Display for TensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.dimensions))
    }
}

impl FromStr for TensorType {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_spec(s)
    }
}
