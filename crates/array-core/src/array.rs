// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The core dense array type.

use crate::ops::{self, BlockSize};
use crate::{ArrayError, Shape, WorkerPool};

/// An owned, n-dimensional array of `f64` stored in contiguous memory.
///
/// The buffer length always equals `shape.num_elements()`; the
/// constructors refuse to build anything else. Operations never mutate
/// their inputs and always return a freshly allocated array.
///
/// # Memory Layout
/// Data is stored in row-major (C) order.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    shape: Shape,
    data: Vec<f64>,
}

impl Array {
    /// Creates an array from a buffer and signed dimensions.
    ///
    /// An empty `dims` describes a scalar and needs exactly one value.
    /// Zero-sized dimensions are allowed, so `[0, 0]` with no data is a
    /// valid empty matrix.
    ///
    /// # Errors
    /// [`ArrayError::InvalidShape`] if a dimension is negative,
    /// [`ArrayError::ShapeMismatch`] if `data.len()` is not the product of
    /// `dims`.
    ///
    /// # Examples
    /// ```
    /// use array_core::Array;
    /// let a = Array::new(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    ///
    /// assert!(Array::new(vec![1.0, 2.0, 3.0], &[2, 2]).is_err());
    /// ```
    pub fn new(data: Vec<f64>, dims: &[i64]) -> Result<Self, ArrayError> {
        let shape = Shape::from_signed(dims)?;
        Self::from_shape_vec(shape, data)
    }

    /// Creates an array from an already-unsigned [`Shape`].
    pub fn from_shape_vec(shape: Shape, data: Vec<f64>) -> Result<Self, ArrayError> {
        let expected = shape
            .checked_num_elements()
            .ok_or_else(|| ArrayError::InvalidShape {
                dims: shape.dims().iter().map(|&d| d as i64).collect(),
                reason: "element count overflows usize",
            })?;
        if expected != data.len() {
            return Err(ArrayError::ShapeMismatch {
                op: "construct",
                lhs: shape,
                rhs: Shape::vector(data.len()),
            });
        }
        Ok(Self { shape, data })
    }

    /// Creates a `rows × cols` matrix.
    pub fn matrix(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, ArrayError> {
        Self::from_shape_vec(Shape::matrix(rows, cols), data)
    }

    /// Creates an array of zeros.
    ///
    /// # Panics
    /// Panics if the element count of `shape` overflows, which only an
    /// unchecked shape such as `Shape::new(vec![usize::MAX, 2])` can do.
    pub fn zeros(shape: Shape) -> Self {
        let data = vec![0.0; shape.num_elements()];
        Self { shape, data }
    }

    /// Creates the `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            shape: Shape::matrix(n, n),
            data,
        }
    }

    /// Assembles an array whose buffer is already known to fit its shape.
    pub(crate) fn from_parts(shape: Shape, data: Vec<f64>) -> Self {
        debug_assert_eq!(shape.num_elements(), data.len());
        Self { shape, data }
    }

    /// Returns the array's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the row-major buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Consumes the array, returning its buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Consumes the array, returning its shape and buffer.
    pub fn into_parts(self) -> (Shape, Vec<f64>) {
        (self.shape, self.data)
    }

    /// Returns the element at a multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        self.shape.offset_of(index).map(|i| self.data[i])
    }

    /// Returns `true` if both arrays have the same shape and every pair of
    /// elements differs by at most `tolerance`.
    pub fn approx_eq(&self, other: &Array, tolerance: f64) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Element-wise sum on the shared worker pool. See [`ops::add`].
    pub fn add(&self, other: &Array) -> Result<Array, ArrayError> {
        ops::add(WorkerPool::shared(), self, other)
    }

    /// Element-wise sum on `pool`.
    pub fn add_with(&self, other: &Array, pool: &WorkerPool) -> Result<Array, ArrayError> {
        ops::add(pool, self, other)
    }

    /// Matrix product on the shared worker pool with the default block
    /// size. See [`ops::matmul`].
    pub fn multiply(&self, other: &Array) -> Result<Array, ArrayError> {
        ops::matmul(WorkerPool::shared(), self, other, BlockSize::default())
    }

    /// Matrix product on `pool` with an explicit block size.
    pub fn multiply_with(
        &self,
        other: &Array,
        pool: &WorkerPool,
        block: BlockSize,
    ) -> Result<Array, ArrayError> {
        ops::matmul(pool, self, other, block)
    }

    /// Transpose on the shared worker pool. See [`ops::transpose`].
    pub fn transpose(&self) -> Result<Array, ArrayError> {
        ops::transpose(WorkerPool::shared(), self)
    }

    /// Transpose on `pool`.
    pub fn transpose_with(&self, pool: &WorkerPool) -> Result<Array, ArrayError> {
        ops::transpose(pool, self)
    }
}
