//! Tensor builders.
//!
//! [`TensorBuilder::of`] picks the storage backend from the type: any mapped
//! dimension selects the mapped builder, otherwise (including the
//! dimensionless type) the indexed builder is used.
//!
//! Builders are single-use staging areas. Each commit validates the address
//! against the type, so a failed commit leaves no partially-built tensor
//! behind; [`TensorBuilder::build`] consumes the builder.
//!
//! # Examples
//!
//! ```
//! use tensa_core::{Address, TensorBuilder, TensorType};
//!
//! let ty = TensorType::mapped(&["x", "y"]).unwrap();
//! let mut builder = TensorBuilder::of(ty);
//! builder.cell().label("x", "a").label("y", "b").value(2.0).unwrap();
//! builder.cell_at(Address::new(["c", "d"]), 3.0).unwrap();
//! let tensor = builder.build();
//!
//! assert_eq!(tensor.len(), 2);
//! assert_eq!(tensor.to_string(), "{{x:a,y:b}:2.0,{x:c,y:d}:3.0}");
//! ```

use crate::address::{Address, Label, Labels};
use crate::error::{TensorError, TensorResult};
use crate::storage::{IndexedStorage, MappedStorage, Storage};
use crate::tensor::Tensor;
use crate::types::TensorType;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Builder selecting its backend from the tensor type
#[derive(Debug)]
pub enum TensorBuilder {
    Indexed(IndexedBuilder),
    Mapped(MappedBuilder),
}

impl TensorBuilder {
    /// Create a builder suitable for the given type
    pub fn of(tensor_type: TensorType) -> Self {
        if tensor_type.has_mapped() {
            TensorBuilder::Mapped(MappedBuilder::new(tensor_type))
        } else {
            TensorBuilder::Indexed(IndexedBuilder::new(tensor_type))
        }
    }

    pub fn tensor_type(&self) -> &TensorType {
        match self {
            TensorBuilder::Indexed(b) => &b.tensor_type,
            TensorBuilder::Mapped(b) => &b.tensor_type,
        }
    }

    /// Start a cell whose labels are given one dimension at a time
    pub fn cell(&mut self) -> CellBuilder<'_> {
        let rank = self.tensor_type().rank();
        CellBuilder {
            parent: self,
            labels: vec![None; rank],
            error: None,
        }
    }

    /// Commit a cell at a complete address.
    ///
    /// Committing an address twice keeps the last value.
    ///
    /// # Errors
    ///
    /// The address errors of [`TensorType::coerce_address`], and
    /// [`TensorError::InvalidArgument`] if a label would size an unbound
    /// dimension past what dense storage can hold.
    pub fn cell_at(&mut self, address: Address, value: f64) -> TensorResult<&mut Self> {
        let address = self.tensor_type().coerce_address(&address)?;
        match self {
            TensorBuilder::Indexed(b) => b.commit(address, value)?,
            TensorBuilder::Mapped(b) => b.commit(address, value),
        }
        Ok(self)
    }

    /// Commit the single cell of a dimensionless tensor
    pub fn scalar(&mut self, value: f64) -> TensorResult<&mut Self> {
        self.cell_at(Address::empty(), value)
    }

    /// Finish building
    pub fn build(self) -> Tensor {
        match self {
            TensorBuilder::Indexed(b) => b.build(),
            TensorBuilder::Mapped(b) => b.build(),
        }
    }
}

/// Accumulates the labels of one cell before committing it to its builder
#[derive(Debug)]
pub struct CellBuilder<'a> {
    parent: &'a mut TensorBuilder,
    labels: Vec<Option<Label>>,
    error: Option<TensorError>,
}

impl<'a> CellBuilder<'a> {
    /// Set the label of a dimension.
    ///
    /// Errors (unknown or repeated dimension) are reported by [`value`](Self::value).
    pub fn label(mut self, dimension: &str, label: impl Into<Label>) -> Self {
        if self.error.is_some() {
            return self;
        }
        match self.parent.tensor_type().index_of(dimension) {
            None => {
                self.error = Some(TensorError::invalid_argument(format!(
                    "'{}' is not a dimension of {}",
                    dimension,
                    self.parent.tensor_type()
                )));
            }
            Some(position) if self.labels[position].is_some() => {
                self.error = Some(TensorError::invalid_argument(format!(
                    "dimension '{}' is labeled more than once",
                    dimension
                )));
            }
            Some(position) => self.labels[position] = Some(label.into()),
        }
        self
    }

    /// Commit the cell with the given value.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidArgument`] for unknown, repeated or missing
    /// dimensions, and the label errors of [`TensorBuilder::cell_at`].
    pub fn value(self, value: f64) -> TensorResult<&'a mut TensorBuilder> {
        let CellBuilder {
            parent,
            labels,
            error,
        } = self;
        if let Some(error) = error {
            return Err(error);
        }
        let tensor_type = parent.tensor_type();
        let labels = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                label.ok_or_else(|| {
                    TensorError::invalid_argument(format!(
                        "no label for dimension '{}'",
                        tensor_type.dimensions()[i].name()
                    ))
                })
            })
            .collect::<TensorResult<Labels>>()?;
        parent.cell_at(Address::new(labels), value)
    }
}

/// Builder for dense storage.
///
/// Unbound dimensions are sized to the largest committed label plus one.
#[derive(Debug)]
pub struct IndexedBuilder {
    tensor_type: TensorType,
    cells: Vec<(SmallVec<[usize; 4]>, f64)>,
    observed: Vec<usize>,
}

impl IndexedBuilder {
    fn new(tensor_type: TensorType) -> Self {
        let rank = tensor_type.rank();
        Self {
            tensor_type,
            cells: Vec::new(),
            observed: vec![0; rank],
        }
    }

    /// Record a cell at a coerced address; a rejected cell leaves the builder unchanged.
    fn commit(&mut self, address: Address, value: f64) -> TensorResult<()> {
        let shown = |address: &Address| self.tensor_type.address_to_string(address);
        let indices = address.indices().ok_or_else(|| {
            TensorError::state(format!(
                "address {} of {} is not all indices",
                shown(&address),
                self.tensor_type
            ))
        })?;
        let observed = self
            .observed
            .iter()
            .zip(&indices)
            .map(|(&seen, &index)| index.checked_add(1).map(|end| seen.max(end)))
            .collect::<Option<Vec<usize>>>()
            .ok_or_else(|| {
                TensorError::invalid_argument(format!("index in {} overflows", shown(&address)))
            })?;
        IndexedStorage::checked_len(&self.sizes(&observed)).map_err(|e| {
            TensorError::invalid_argument(format!(
                "cell {} does not fit {}: {}",
                shown(&address),
                self.tensor_type,
                e
            ))
        })?;
        self.observed = observed;
        self.cells.push((indices, value));
        Ok(())
    }

    /// Bound sizes, with unbound dimensions sized from `observed`
    fn sizes(&self, observed: &[usize]) -> Vec<usize> {
        self.tensor_type
            .dimensions()
            .iter()
            .zip(observed)
            .map(|(d, &seen)| d.size().unwrap_or(seen))
            .collect()
    }

    fn build(self) -> Tensor {
        if self.tensor_type.is_dimensionless() {
            let storage = match self.cells.last() {
                Some(&(_, value)) => {
                    let mut storage = IndexedStorage::zeros(&[]);
                    storage.set_at(&[], value);
                    storage
                }
                None => IndexedStorage::empty_scalar(),
            };
            return Tensor::from_parts(self.tensor_type, Storage::Indexed(storage));
        }

        let sizes = self.sizes(&self.observed);
        let mut storage = IndexedStorage::zeros(&sizes);
        for (indices, value) in &self.cells {
            storage.set_at(indices, *value);
        }
        Tensor::from_parts(self.tensor_type, Storage::Indexed(storage))
    }
}

/// Builder for hashed storage
#[derive(Debug)]
pub struct MappedBuilder {
    tensor_type: TensorType,
    cells: HashMap<Address, f64>,
}

impl MappedBuilder {
    fn new(tensor_type: TensorType) -> Self {
        Self {
            tensor_type,
            cells: HashMap::new(),
        }
    }

    fn commit(&mut self, address: Address, value: f64) {
        self.cells.insert(address, value);
    }

    fn build(self) -> Tensor {
        Tensor::from_parts(
            self.tensor_type,
            Storage::Mapped(MappedStorage::new(self.cells)),
        )
    }
}
