//! Hashed storage for tensors with mapped dimensions.
//!
//! Only defined cells are stored; an absent address is an undefined cell.

use crate::address::Address;
use std::collections::hash_map::{self, HashMap};

/// Sparse cell storage keyed by address
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MappedStorage {
    cells: HashMap<Address, f64>,
}

impl MappedStorage {
    pub fn new(cells: HashMap<Address, f64>) -> Self {
        Self { cells }
    }

    /// Number of defined cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Value of a cell, `None` if the cell is undefined
    pub fn value(&self, address: &Address) -> Option<f64> {
        self.cells.get(address).copied()
    }

    /// Apply a function to every defined cell
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            cells: self
                .cells
                .iter()
                .map(|(address, &value)| (address.clone(), f(value)))
                .collect(),
        }
    }

    /// Iterate cells in hash order
    pub fn iter(&self) -> MappedCells<'_> {
        MappedCells {
            inner: self.cells.iter(),
        }
    }
}

/// Iterator over the cells of a [`MappedStorage`]
#[derive(Clone, Debug)]
pub struct MappedCells<'a> {
    inner: hash_map::Iter<'a, Address, f64>,
}

impl Iterator for MappedCells<'_> {
    type Item = (Address, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(address, &value)| (address.clone(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
