// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Matrix transposition.

use crate::{Array, ArrayError, Shape, WorkerPool};

/// Transposes a `[rows, cols]` matrix into a new `[cols, rows]` matrix.
///
/// Workers own contiguous chunks of the destination buffer. For a
/// destination index `d`, `col = d / rows` and `row = d % rows`, and the
/// element is read from `row * cols + col`. The index mapping is a
/// bijection, so each source element is copied exactly once.
///
/// # Errors
/// Returns [`ArrayError::RankMismatch`] if `input` is not rank 2.
pub fn transpose(pool: &WorkerPool, input: &Array) -> Result<Array, ArrayError> {
    let (rows, cols) = input.shape().as_matrix("transpose")?;
    let out_shape = Shape::matrix(cols, rows);

    let len = rows * cols;
    if len == 0 {
        return Ok(Array::from_parts(out_shape, Vec::new()));
    }

    tracing::debug!(op = "transpose", shape = %input.shape(), workers = pool.workers(), "dispatching");

    let src = input.as_slice();
    let mut out = vec![0.0f64; len];

    pool.for_each_chunk(&mut out, |range, chunk| {
        for (d, slot) in range.zip(chunk.iter_mut()) {
            let col = d / rows;
            let row = d % rows;
            *slot = src[row * cols + col];
        }
    });

    Ok(Array::from_parts(out_shape, out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_2x2() {
        let pool = WorkerPool::new(2).unwrap();
        let a = Array::new(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let t = transpose(&pool, &a).unwrap();
        assert_eq!(t.shape(), &Shape::matrix(2, 2));
        assert_eq!(t.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn test_transpose_2x3() {
        // [[1, 2, 3], [4, 5, 6]] -> [[1, 4], [2, 5], [3, 6]]
        let pool = WorkerPool::new(3).unwrap();
        let a = Array::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let t = transpose(&pool, &a).unwrap();
        assert_eq!(t.shape(), &Shape::matrix(3, 2));
        assert_eq!(t.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_transpose_row_vector() {
        let pool = WorkerPool::sequential();
        let a = Array::new(vec![1.0, 2.0, 3.0], &[1, 3]).unwrap();
        let t = transpose(&pool, &a).unwrap();
        assert_eq!(t.shape(), &Shape::matrix(3, 1));
        assert_eq!(t.as_slice(), a.as_slice());
    }

    #[test]
    fn test_transpose_empty() {
        let pool = WorkerPool::sequential();
        let a = Array::new(vec![], &[0, 5]).unwrap();
        let t = transpose(&pool, &a).unwrap();
        assert_eq!(t.shape(), &Shape::matrix(5, 0));
        assert!(t.is_empty());
    }

    #[test]
    fn test_transpose_rejects_non_matrix() {
        let pool = WorkerPool::sequential();
        let v = Array::new(vec![1.0, 2.0], &[2]).unwrap();
        assert!(transpose(&pool, &v).unwrap_err().is_rank_mismatch());
        let cube = Array::new(vec![0.0; 8], &[2, 2, 2]).unwrap();
        assert!(transpose(&pool, &cube).unwrap_err().is_rank_mismatch());
    }
}
