// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Array shape descriptors and dimension utilities.

use crate::ArrayError;
use std::fmt;

/// Describes the dimensionality of an [`crate::Array`].
///
/// Dimensions are unsigned, so a `Shape` can never hold a negative extent.
/// Signed input from callers goes through [`Shape::from_signed`], which is
/// where negative dimensions are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Creates a new shape from the given dimensions.
    ///
    /// # Examples
    /// ```
    /// use array_core::Shape;
    /// let s = Shape::new(vec![2, 3, 4]);
    /// assert_eq!(s.rank(), 3);
    /// assert_eq!(s.num_elements(), 24);
    /// ```
    ///
    /// The element count is not checked here. An overflowing shape makes
    /// [`Shape::num_elements`] panic, so `Array::zeros(Shape::new(vec![usize::MAX, 2]))`
    /// panics; use [`Shape::from_signed`] or [`Shape::checked_num_elements`]
    /// for untrusted dimensions.
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    /// Builds a shape from signed dimensions.
    ///
    /// # Errors
    /// Returns [`ArrayError::InvalidShape`] if any dimension is negative,
    /// or if the element count overflows `usize`.
    ///
    /// ```
    /// use array_core::Shape;
    /// assert_eq!(Shape::from_signed(&[2, 3]).unwrap(), Shape::matrix(2, 3));
    /// assert!(Shape::from_signed(&[-1, 3]).is_err());
    /// ```
    pub fn from_signed(dims: &[i64]) -> Result<Self, ArrayError> {
        let invalid = |reason| ArrayError::InvalidShape {
            dims: dims.to_vec(),
            reason,
        };

        let mut converted = Vec::with_capacity(dims.len());
        for &d in dims {
            if d < 0 {
                return Err(invalid("dimensions must be non-negative"));
            }
            converted.push(usize::try_from(d).map_err(|_| invalid("dimension exceeds usize"))?);
        }

        let shape = Self { dims: converted };
        if shape.checked_num_elements().is_none() {
            return Err(invalid("element count overflows usize"));
        }
        Ok(shape)
    }

    /// Creates a scalar shape (rank 0).
    pub fn scalar() -> Self {
        Self { dims: vec![] }
    }

    /// Creates a 1-D shape.
    pub fn vector(len: usize) -> Self {
        Self { dims: vec![len] }
    }

    /// Creates a 2-D shape (matrix).
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self {
            dims: vec![rows, cols],
        }
    }

    /// Returns the number of dimensions (rank).
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns the total number of elements.
    ///
    /// For a scalar shape (rank 0), returns 1.
    ///
    /// # Panics
    /// Panics if the product overflows; shapes built through
    /// [`Shape::from_signed`] or owned by an [`crate::Array`] never do.
    pub fn num_elements(&self) -> usize {
        self.checked_num_elements()
            .expect("shape element count overflows usize")
    }

    /// Returns the total number of elements, or `None` on overflow.
    pub fn checked_num_elements(&self) -> Option<usize> {
        self.dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// Returns the dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the size of a specific dimension, or `None` if out of bounds.
    pub fn dim(&self, index: usize) -> Option<usize> {
        self.dims.get(index).copied()
    }

    /// Returns `(rows, cols)` for a rank-2 shape.
    ///
    /// # Errors
    /// Returns [`ArrayError::RankMismatch`] tagged with `op` otherwise.
    pub fn as_matrix(&self, op: &'static str) -> Result<(usize, usize), ArrayError> {
        match self.dims.as_slice() {
            &[rows, cols] => Ok((rows, cols)),
            _ => Err(ArrayError::RankMismatch {
                op,
                expected: 2,
                actual: self.rank(),
            }),
        }
    }

    /// Computes row-major (C-order) strides for this shape.
    ///
    /// The stride for dimension `i` is the number of elements to skip
    /// in the flat buffer to advance one step along that dimension.
    pub fn strides(&self) -> Vec<usize> {
        let rank = self.dims.len();
        if rank == 0 {
            return vec![];
        }
        let mut strides = vec![0usize; rank];
        strides[rank - 1] = 1;
        for i in (0..rank - 1).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }

    /// Returns the flat row-major offset of `index`, or `None` if the index
    /// has the wrong rank or falls outside the shape.
    pub fn offset_of(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.rank() {
            return None;
        }
        let mut offset = 0;
        for ((&i, &d), s) in index.iter().zip(&self.dims).zip(self.strides()) {
            if i >= d {
                return None;
            }
            offset += i * s;
        }
        Some(offset)
    }

    /// Returns `Ok(())` if `self` and `other` have the same rank and extents.
    ///
    /// # Errors
    /// [`ArrayError::RankMismatch`] when ranks differ,
    /// [`ArrayError::ShapeMismatch`] when any extent differs.
    pub fn ensure_same(&self, other: &Shape, op: &'static str) -> Result<(), ArrayError> {
        if self.rank() != other.rank() {
            return Err(ArrayError::RankMismatch {
                op,
                expected: self.rank(),
                actual: other.rank(),
            });
        }
        if self.dims != other.dims {
            return Err(ArrayError::ShapeMismatch {
                op,
                lhs: self.clone(),
                rhs: other.clone(),
            });
        }
        Ok(())
    }

    /// Returns `(m, k, n)` if the shapes are compatible for a matrix
    /// multiply: `self` is `[M, K]` and `other` is `[K, N]`.
    ///
    /// # Errors
    /// [`ArrayError::RankMismatch`] if either shape is not rank 2,
    /// [`ArrayError::ShapeMismatch`] if the shared dimension differs.
    pub fn matmul_dims(&self, other: &Shape) -> Result<(usize, usize, usize), ArrayError> {
        let (m, k) = self.as_matrix("matmul")?;
        let (k2, n) = other.as_matrix("matmul")?;
        if k != k2 {
            return Err(ArrayError::ShapeMismatch {
                op: "matmul",
                lhs: self.clone(),
                rhs: other.clone(),
            });
        }
        Ok((m, k, n))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

/// Convenience: `Shape::from(vec![2, 3])`.
impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self::new(dims)
    }
}

/// Convenience: `Shape::from(&[2, 3][..])`. Unchecked, like [`Shape::new`].
impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self::new(dims.to_vec())
    }
}
