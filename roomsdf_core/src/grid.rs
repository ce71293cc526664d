//! Dense 3D grid storage.
//!
//! Values are stored in row-major (C) order: the last axis varies fastest,
//! matching the layout of `.npy` files written without `fortran_order`.

use crate::error::{CoreError, Result};

/// Shape of a 3D grid: voxel counts along axes 0 (x), 1 (y, vertical) and 2 (z).
pub type Shape3 = [usize; 3];

/// Number of values implied by a shape.
#[inline]
pub fn shape_len(shape: Shape3) -> usize {
    shape[0] * shape[1] * shape[2]
}

/// A dense, owned 3D array.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseGrid<T> {
    shape: Shape3,
    data: Vec<T>,
}

impl<T: Copy> DenseGrid<T> {
    /// Create a grid of `shape` with every voxel set to `value`.
    pub fn filled(shape: Shape3, value: T) -> Self {
        Self {
            shape,
            data: vec![value; shape_len(shape)],
        }
    }

    /// Wrap row-major values in a grid.
    ///
    /// # Errors
    /// Returns `LengthMismatch` if `data.len()` differs from the shape's volume.
    pub fn from_vec(shape: Shape3, data: Vec<T>) -> Result<Self> {
        let expected = shape_len(shape);
        if data.len() != expected {
            return Err(CoreError::LengthMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Build a grid by evaluating `f` at every voxel index in row-major order.
    pub fn from_fn<F>(shape: Shape3, mut f: F) -> Self
    where
        F: FnMut([usize; 3]) -> T,
    {
        let mut data = Vec::with_capacity(shape_len(shape));
        for x in 0..shape[0] {
            for y in 0..shape[1] {
                for z in 0..shape[2] {
                    data.push(f([x, y, z]));
                }
            }
        }
        Self { shape, data }
    }

    /// Grid shape.
    #[inline]
    pub fn shape(&self) -> Shape3 {
        self.shape
    }

    /// Total number of voxels.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when any axis has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major values.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the grid, returning its row-major values.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Linear offset of a voxel. The index must be in bounds.
    #[inline]
    pub fn offset(&self, index: [usize; 3]) -> usize {
        (index[0] * self.shape[1] + index[1]) * self.shape[2] + index[2]
    }

    #[inline]
    fn contains(&self, index: [usize; 3]) -> bool {
        index[0] < self.shape[0] && index[1] < self.shape[1] && index[2] < self.shape[2]
    }

    /// Value at a voxel, or `None` outside the grid.
    #[inline]
    pub fn get(&self, index: [usize; 3]) -> Option<T> {
        if self.contains(index) {
            Some(self.data[self.offset(index)])
        } else {
            None
        }
    }

    /// Overwrite a voxel. Returns false (and does nothing) outside the grid.
    #[inline]
    pub fn set(&mut self, index: [usize; 3], value: T) -> bool {
        if !self.contains(index) {
            return false;
        }
        let offset = self.offset(index);
        self.data[offset] = value;
        true
    }

    /// Apply `f` to every voxel.
    pub fn map<U, F>(&self, f: F) -> DenseGrid<U>
    where
        U: Copy,
        F: Fn(T) -> U,
    {
        DenseGrid {
            shape: self.shape,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Embed this grid in a larger one.
    ///
    /// The result has `shape`, holds this grid's values in the block starting at
    /// the origin, and `fill` everywhere else.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if this grid is larger than `shape` on any axis.
    pub fn padded(&self, shape: Shape3, fill: T) -> Result<Self> {
        if (0..3).any(|axis| self.shape[axis] > shape[axis]) {
            return Err(CoreError::ShapeMismatch {
                source: self.shape,
                target: shape,
            });
        }

        let mut out = Self::filled(shape, fill);
        let row = self.shape[2];
        if row == 0 {
            return Ok(out);
        }
        for x in 0..self.shape[0] {
            for y in 0..self.shape[1] {
                let src = self.offset([x, y, 0]);
                let dst = out.offset([x, y, 0]);
                out.data[dst..dst + row].copy_from_slice(&self.data[src..src + row]);
            }
        }
        Ok(out)
    }

    /// Copy out the block of `extent` voxels starting at `origin`.
    ///
    /// # Errors
    /// Returns `SliceOutOfBounds` if the block reaches past the grid.
    pub fn slice(&self, origin: [usize; 3], extent: Shape3) -> Result<Self> {
        if (0..3).any(|axis| origin[axis] + extent[axis] > self.shape[axis]) {
            return Err(CoreError::SliceOutOfBounds {
                origin,
                extent,
                shape: self.shape,
            });
        }

        let mut data = Vec::with_capacity(shape_len(extent));
        if extent[2] > 0 {
            for x in origin[0]..origin[0] + extent[0] {
                for y in origin[1]..origin[1] + extent[1] {
                    let start = self.offset([x, y, origin[2]]);
                    data.extend_from_slice(&self.data[start..start + extent[2]]);
                }
            }
        }
        Ok(Self {
            shape: extent,
            data,
        })
    }
}

impl DenseGrid<f32> {
    /// Largest value, ignoring NaN. `None` for an empty grid.
    pub fn max_value(&self) -> Option<f32> {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f32::max)
    }

    /// Element-wise absolute value.
    pub fn abs(&self) -> Self {
        self.map(f32::abs)
    }
}

impl DenseGrid<i32> {
    /// Element-wise absolute value (wrapping at `i32::MIN`).
    pub fn abs(&self) -> Self {
        self.map(i32::wrapping_abs)
    }
}
