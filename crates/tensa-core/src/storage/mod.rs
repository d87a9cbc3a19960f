//! Cell storage backends.
//!
//! A tensor keeps its cells in one of two backends, chosen once from its type
//! and never changed:
//!
//! - [`IndexedStorage`]: dense row-major array, used when every dimension is indexed
//!   (including the dimensionless type)
//! - [`MappedStorage`]: hash map keyed by address, used when any dimension is mapped
//!
//! Both expose the same capability set through [`Storage`], so algorithms never
//! need to know which layout they read from.

pub mod indexed;
pub mod mapped;

pub use indexed::{IndexedCells, IndexedStorage};
pub use mapped::{MappedCells, MappedStorage};

use crate::address::Address;
use std::collections::BTreeMap;

/// Closed set of storage layouts
#[derive(Clone, Debug, PartialEq)]
pub enum Storage {
    /// Dense row-major cells
    Indexed(IndexedStorage),
    /// Hashed sparse cells
    Mapped(MappedStorage),
}

impl Storage {
    /// Value of a cell, `None` if undefined or out of range
    pub fn value(&self, address: &Address) -> Option<f64> {
        match self {
            Storage::Indexed(s) => s.value(address),
            Storage::Mapped(s) => s.value(address),
        }
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        match self {
            Storage::Indexed(s) => s.len(),
            Storage::Mapped(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate cells in storage order
    pub fn iter(&self) -> CellIter<'_> {
        match self {
            Storage::Indexed(s) => CellIter::Indexed(s.iter()),
            Storage::Mapped(s) => CellIter::Mapped(s.iter()),
        }
    }

    /// Snapshot of all cells in canonical address order
    pub fn cells(&self) -> BTreeMap<Address, f64> {
        self.iter().collect()
    }
}

/// Iterator over `(address, value)` pairs of either backend
#[derive(Clone, Debug)]
pub enum CellIter<'a> {
    Indexed(IndexedCells<'a>),
    Mapped(MappedCells<'a>),
}

impl Iterator for CellIter<'_> {
    type Item = (Address, f64);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            CellIter::Indexed(it) => it.next(),
            CellIter::Mapped(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            CellIter::Indexed(it) => it.size_hint(),
            CellIter::Mapped(it) => it.size_hint(),
        }
    }
}
