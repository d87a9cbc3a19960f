//! The immutable tensor value.
//!
//! A [`Tensor`] pairs a [`TensorType`] with a cell [`Storage`]. Tensors are
//! created once, by a [`TensorBuilder`](crate::TensorBuilder) or by parsing, and
//! never change afterwards; every function over tensors returns a new one.
//! Since they hold no interior mutability they can be shared freely between
//! threads.
//!
//! # Equality
//!
//! Two tensors are equal iff their cell maps are equal. Neither the type nor
//! the storage backend takes part in the comparison beyond what the addresses
//! imply.
//!
//! ```
//! use tensa_core::{Address, Tensor};
//!
//! let a: Tensor = "{{x:a}:1.0,{x:b}:2.0}".parse().unwrap();
//! let b: Tensor = "{{x:b}:2.0,{x:a}:1.0}".parse().unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.get(&Address::new(["b"])).unwrap(), 2.0);
//! assert!(a.get(&Address::new(["c"])).unwrap().is_nan());
//! ```

use crate::address::Address;
use crate::codec;
use crate::error::{TensorError, TensorResult};
use crate::storage::{CellIter, IndexedStorage, Storage};
use crate::types::TensorType;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// An immutable multidimensional array of labeled cells
#[derive(Clone, Debug)]
pub struct Tensor {
    tensor_type: TensorType,
    storage: Storage,
}

impl Tensor {
    pub(crate) fn from_parts(tensor_type: TensorType, storage: Storage) -> Self {
        Self {
            tensor_type,
            storage,
        }
    }

    /// Wrap dense storage in a tensor of an indexed type.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidArgument`] if the type has mapped dimensions, if
    /// the storage rank differs from the type rank, or if a storage size exceeds
    /// a bound dimension size.
    pub fn from_indexed(tensor_type: TensorType, storage: IndexedStorage) -> TensorResult<Self> {
        if tensor_type.has_mapped() {
            return Err(TensorError::invalid_argument(format!(
                "dense storage cannot hold cells of {}",
                tensor_type
            )));
        }
        let sizes = storage.sizes();
        let scalar_without_cell = tensor_type.is_dimensionless() && storage.is_empty();
        if sizes.len() != tensor_type.rank() && !scalar_without_cell {
            return Err(TensorError::invalid_argument(format!(
                "storage of rank {} does not fit {}",
                sizes.len(),
                tensor_type
            )));
        }
        for (dimension, &size) in tensor_type.dimensions().iter().zip(sizes) {
            if let Some(bound) = dimension.size() {
                if size > bound {
                    return Err(TensorError::invalid_argument(format!(
                        "size {} of dimension '{}' exceeds {}",
                        size,
                        dimension.name(),
                        bound
                    )));
                }
            }
        }
        Ok(Self::from_parts(tensor_type, Storage::Indexed(storage)))
    }

    /// A dimensionless tensor holding one value
    pub fn scalar(value: f64) -> Self {
        let mut storage = IndexedStorage::zeros(&[]);
        storage.set_at(&[], value);
        Self::from_parts(TensorType::empty(), Storage::Indexed(storage))
    }

    /// Parse a tensor from its text form, inferring the type when absent.
    ///
    /// See [`codec::parse`].
    pub fn from_text(text: &str) -> TensorResult<Self> {
        codec::parse(text)
    }

    /// Parse a tensor from its text form with a declared type
    pub fn from_text_with_type(tensor_type: &TensorType, text: &str) -> TensorResult<Self> {
        codec::parse_with_type(tensor_type, text)
    }

    /// Parse a tensor from its text form with a declared type spec
    pub fn from_text_with_spec(type_spec: &str, text: &str) -> TensorResult<Self> {
        codec::parse_with_spec(type_spec, text)
    }

    pub fn tensor_type(&self) -> &TensorType {
        &self.tensor_type
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Whether cells are kept in dense storage
    pub fn is_indexed(&self) -> bool {
        matches!(self.storage, Storage::Indexed(_))
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Iterate cells in storage order
    pub fn iter(&self) -> CellIter<'_> {
        self.storage.iter()
    }

    /// Snapshot of all cells in canonical address order
    pub fn cells(&self) -> BTreeMap<Address, f64> {
        self.storage.cells()
    }

    /// Value of the cell at an address already in canonical form, `None` if undefined.
    ///
    /// This is the unchecked probe used by tensor functions; prefer [`get`](Self::get).
    pub fn value(&self, address: &Address) -> Option<f64> {
        self.storage.value(address)
    }

    /// Value of a cell, or NaN if the cell is undefined.
    ///
    /// # Errors
    ///
    /// Address errors of [`TensorType::coerce_address`], and
    /// [`TensorError::IndexOutOfBounds`] for a dense address outside the
    /// tensor's resolved sizes.
    pub fn get(&self, address: &Address) -> TensorResult<f64> {
        let address = self.tensor_type.coerce_address(address)?;
        if let (Storage::Indexed(storage), Some(indices)) = (&self.storage, address.indices()) {
            for ((dimension, &index), &size) in self
                .tensor_type
                .dimensions()
                .iter()
                .zip(&indices)
                .zip(storage.sizes())
            {
                if index >= size {
                    return Err(TensorError::IndexOutOfBounds {
                        dimension: dimension.name().to_string(),
                        label: index,
                        size,
                    });
                }
            }
        }
        Ok(self.storage.value(&address).unwrap_or(f64::NAN))
    }

    /// The value of a dimensionless tensor.
    ///
    /// Returns NaN when the tensor has no cell.
    ///
    /// # Errors
    ///
    /// [`TensorError::State`] if the tensor has dimensions or more than one cell.
    pub fn as_double(&self) -> TensorResult<f64> {
        if !self.tensor_type.is_dimensionless() {
            return Err(TensorError::state(format!(
                "this tensor is not dimensionless, it has {} dimensions",
                self.tensor_type.rank()
            )));
        }
        match self.len() {
            0 => Ok(f64::NAN),
            1 => Ok(self.iter().next().map_or(f64::NAN, |(_, v)| v)),
            n => Err(TensorError::state(format!(
                "this tensor does not have a single value, it has {}",
                n
            ))),
        }
    }

    /// Apply a function to every cell value, keeping the type and backend
    pub fn map_values<F>(&self, f: F) -> Tensor
    where
        F: Fn(f64) -> f64,
    {
        let storage = match &self.storage {
            Storage::Indexed(s) => Storage::Indexed(s.map(f)),
            Storage::Mapped(s) => Storage::Mapped(s.map(f)),
        };
        Self::from_parts(self.tensor_type.clone(), storage)
    }
}

/// Tensors are equal when they have the same cells, whatever their backend.
///
/// Cell values compare as `f64` except that NaN equals NaN, so a tensor with
/// NaN cells equals its clone and its reparsed text form.
impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.len() != other.len() {
            return false;
        }
        self.cells()
            .iter()
            .zip(other.cells().iter())
            .all(|((a, x), (b, y))| a == b && (x == y || (x.is_nan() && y.is_nan())))
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::to_standard_string(self))
    }
}

impl FromStr for Tensor {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::parse(s)
    }
}
