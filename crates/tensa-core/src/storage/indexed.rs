//! Dense storage for tensors whose dimensions are all indexed.
//!
//! Cells live in a C-contiguous (row-major) array whose shape is the resolved
//! dimension sizes, so an address maps to its position by mixed-radix
//! arithmetic and every in-range position is a cell. Positions never written
//! by a builder read as 0.0.

use crate::address::{Address, Label};
use crate::error::{TensorError, TensorResult};
use scirs2_core::ndarray_ext::{Array, ArrayD, IxDyn};

/// Row-major dense cell storage.
///
/// A dimensionless storage normally holds one cell; it holds none when it was
/// built without a value.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedStorage {
    data: Option<ArrayD<f64>>,
}

impl IndexedStorage {
    /// Most cells a dense storage may hold: its byte size must fit in `isize`.
    pub const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<f64>();

    /// The number of cells of a storage with the given sizes.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidArgument`] if the product of the sizes overflows
    /// or exceeds [`MAX_CELLS`](Self::MAX_CELLS).
    pub fn checked_len(sizes: &[usize]) -> TensorResult<usize> {
        sizes
            .iter()
            .try_fold(1usize, |total, &size| total.checked_mul(size))
            .filter(|&total| total <= Self::MAX_CELLS)
            .ok_or_else(|| {
                TensorError::invalid_argument(format!("dense sizes {:?} are too large", sizes))
            })
    }

    /// Storage of the given sizes with every cell set to zero.
    ///
    /// Callers check the sizes with [`checked_len`](Self::checked_len) first.
    pub fn zeros(sizes: &[usize]) -> Self {
        Self {
            data: Some(Array::zeros(IxDyn(sizes))),
        }
    }

    /// Storage from values in row-major order.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidArgument`] if the number of values is not the
    /// product of the sizes, or the sizes are too large.
    pub fn from_shape_vec(sizes: &[usize], values: Vec<f64>) -> TensorResult<Self> {
        let total = Self::checked_len(sizes)?;
        if values.len() != total {
            return Err(TensorError::invalid_argument(format!(
                "sizes {:?} require {} values, but got {}",
                sizes,
                total,
                values.len()
            )));
        }
        let array = Array::from_shape_vec(IxDyn(sizes), values)
            .map_err(|e| TensorError::invalid_argument(e.to_string()))?;
        Ok(Self { data: Some(array) })
    }

    /// Storage over an existing array, copied into row-major layout if needed
    pub fn from_array(array: ArrayD<f64>) -> Self {
        let array = if array.is_standard_layout() {
            array
        } else {
            array.as_standard_layout().into_owned()
        };
        Self { data: Some(array) }
    }

    /// A dimensionless storage without a cell
    pub fn empty_scalar() -> Self {
        Self { data: None }
    }

    /// The backing array, `None` for a dimensionless storage without a cell
    pub fn array(&self) -> Option<&ArrayD<f64>> {
        self.data.as_ref()
    }

    /// Resolved size of each dimension
    pub fn sizes(&self) -> &[usize] {
        match &self.data {
            Some(array) => array.shape(),
            None => &[],
        }
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, |array| array.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell values in row-major order
    pub fn values(&self) -> &[f64] {
        self.data
            .as_ref()
            .and_then(|array| array.as_slice())
            .unwrap_or_default()
    }

    /// Value at the given ordinal position, `None` when out of range
    pub fn get_at(&self, indices: &[usize]) -> Option<f64> {
        let array = self.data.as_ref()?;
        if indices.len() != array.ndim() {
            return None;
        }
        array.get(indices).copied()
    }

    pub(crate) fn set_at(&mut self, indices: &[usize], value: f64) {
        if let Some(slot) = self.data.as_mut().and_then(|array| array.get_mut(indices)) {
            *slot = value;
        }
    }

    /// Value at an address of ordinal labels, `None` when out of range
    pub fn value(&self, address: &Address) -> Option<f64> {
        let indices = address.indices()?;
        self.get_at(&indices)
    }

    /// Row-major position of in-range ordinal labels
    pub fn position_of(&self, indices: &[usize]) -> Option<usize> {
        let sizes = self.sizes();
        if indices.len() != sizes.len() || self.data.is_none() {
            return None;
        }
        let mut position = 0;
        for (&index, &size) in indices.iter().zip(sizes) {
            if index >= size {
                return None;
            }
            position = position * size + index;
        }
        Some(position)
    }

    /// Address of a row-major position
    pub fn address_at(&self, position: usize) -> Address {
        address_of_position(self.sizes(), position)
    }

    /// Apply a function to every cell, keeping the shape
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            data: self.data.as_ref().map(|array| array.mapv(|v| f(v))),
        }
    }

    /// Iterate cells in row-major (canonical) order
    pub fn iter(&self) -> IndexedCells<'_> {
        IndexedCells {
            sizes: self.sizes(),
            values: self.values().iter().enumerate(),
        }
    }
}

/// Decode a row-major position into ordinal labels
pub(crate) fn address_of_position(sizes: &[usize], position: usize) -> Address {
    let mut labels = vec![0; sizes.len()];
    let mut remaining = position;
    for (dim, &size) in sizes.iter().enumerate().rev() {
        labels[dim] = remaining % size;
        remaining /= size;
    }
    Address::new(labels.into_iter().map(Label::Index))
}

/// Row-major iterator over the cells of an [`IndexedStorage`]
#[derive(Clone, Debug)]
pub struct IndexedCells<'a> {
    sizes: &'a [usize],
    values: std::iter::Enumerate<std::slice::Iter<'a, f64>>,
}

impl Iterator for IndexedCells<'_> {
    type Item = (Address, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let (position, &value) = self.values.next()?;
        Some((address_of_position(self.sizes, position), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}
