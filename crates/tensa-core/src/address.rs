//! Cell addresses and labels.
//!
//! An [`Address`] is an ordered tuple of [`Label`]s, one per dimension of a
//! [`TensorType`](crate::TensorType), in the type's canonical (name-sorted)
//! dimension order. Addresses carry no dimension names themselves; they are
//! always interpreted relative to a type.
//!
//! Partial addresses are ordinary addresses over a sub-type: reduce and join
//! [`project`](Address::project) full addresses onto the positions of the
//! dimensions they keep.
//!
//! # Ordering
//!
//! Addresses with fewer labels sort first; addresses of equal length compare
//! label by label. Indexed labels compare numerically, mapped labels
//! lexicographically.
//!
//! ```
//! use tensa_core::Address;
//!
//! let short = Address::new(["b"]);
//! let long = Address::new(["a", "a"]);
//! assert!(short < long);
//! assert!(Address::new(["a", "b"]) < Address::new(["b", "a"]));
//! assert!(Address::from_indices(&[2]) < Address::from_indices(&[10]));
//! ```

use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

/// Storage for address labels, inline up to four dimensions.
pub type Labels = SmallVec<[Label; 4]>;

/// A single coordinate of an address.
///
/// Indexed dimensions carry [`Label::Index`], mapped dimensions carry
/// [`Label::Name`]. Builders coerce between the two where the text is
/// unambiguous (see [`Dimension::coerce_label`](crate::Dimension::coerce_label)).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Label {
    /// Ordinal label of an indexed dimension
    Index(usize),
    /// Free-form label of a mapped dimension
    Name(String),
}

impl Label {
    /// The numeric label, if this is an indexed label
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Label::Index(index) => Some(*index),
            Label::Name(_) => None,
        }
    }

    /// The string label, if this is a mapped label
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Label::Index(_) => None,
            Label::Name(name) => Some(name),
        }
    }
}

impl From<usize> for Label {
    fn from(index: usize) -> Self {
        Label::Index(index)
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label::Name(name.to_string())
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Label::Name(name)
    }
}

impl From<&String> for Label {
    fn from(name: &String) -> Self {
        Label::Name(name.clone())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Index(index) => write!(f, "{}", index),
            Label::Name(name) => f.write_str(name),
        }
    }
}

/// An ordered tuple of labels identifying one cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    labels: Labels,
}

impl Address {
    /// Create an address from labels given in canonical dimension order.
    pub fn new<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// The address of the single cell of a dimensionless tensor.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create an indexed address from ordinal labels.
    pub fn from_indices(indices: &[usize]) -> Self {
        Self {
            labels: indices.iter().copied().map(Label::Index).collect(),
        }
    }

    pub(crate) fn from_labels(labels: Labels) -> Self {
        Self { labels }
    }

    /// Labels in canonical dimension order
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Label at a dimension position
    pub fn label(&self, position: usize) -> Option<&Label> {
        self.labels.get(position)
    }

    /// Number of labels (the order of the type this address belongs to)
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether this is the address of a dimensionless cell
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Ordinal labels, if every label is indexed.
    pub fn indices(&self) -> Option<SmallVec<[usize; 4]>> {
        self.labels.iter().map(Label::as_index).collect()
    }

    /// Keep only the labels at the given positions, in the given order.
    ///
    /// Positions out of range are skipped.
    pub fn project(&self, positions: &[usize]) -> Address {
        Self {
            labels: positions
                .iter()
                .filter_map(|&p| self.labels.get(p).cloned())
                .collect(),
        }
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.labels
            .len()
            .cmp(&other.labels.len())
            .then_with(|| self.labels.iter().cmp(other.labels.iter()))
    }
}

impl<L: Into<Label>> FromIterator<L> for Address {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self::new(iter)
    }
}
