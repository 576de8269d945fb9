// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Element-wise addition.

use crate::{Array, ArrayError, WorkerPool};

/// Computes `lhs + rhs` element by element.
///
/// The flat index range is split into one contiguous chunk per worker and
/// each worker sums its own chunk. Since every output element depends on
/// exactly one pair of inputs, the result does not depend on the worker
/// count.
///
/// # Errors
/// Returns [`ArrayError::RankMismatch`] if the ranks differ and
/// [`ArrayError::ShapeMismatch`] if any extent differs.
pub fn add(pool: &WorkerPool, lhs: &Array, rhs: &Array) -> Result<Array, ArrayError> {
    lhs.shape().ensure_same(rhs.shape(), "add")?;

    let len = lhs.len();
    if len == 0 {
        return Ok(Array::from_parts(lhs.shape().clone(), Vec::new()));
    }

    tracing::debug!(op = "add", shape = %lhs.shape(), workers = pool.workers(), "dispatching");

    let a = lhs.as_slice();
    let b = rhs.as_slice();
    let mut out = vec![0.0f64; len];

    pool.for_each_chunk(&mut out, |range, chunk| {
        let a = &a[range.clone()];
        let b = &b[range];
        for ((o, x), y) in chunk.iter_mut().zip(a).zip(b) {
            *o = x + y;
        }
    });

    Ok(Array::from_parts(lhs.shape().clone(), out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Shape;

    #[test]
    fn test_add_2x2() {
        let pool = WorkerPool::new(2).unwrap();
        let a = Array::new(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        let b = Array::new(vec![5.0, 6.0, 7.0, 8.0], &[2, 2]).unwrap();

        let c = add(&pool, &a, &b).unwrap();

        assert_eq!(c.shape(), &Shape::matrix(2, 2));
        assert_eq!(c.as_slice(), &[6.0, 8.0, 10.0, 12.0]);
    }

    #[test]
    fn test_add_3d() {
        let pool = WorkerPool::new(4).unwrap();
        let a = Array::new((0..24).map(|i| i as f64).collect(), &[2, 3, 4]).unwrap();
        let b = Array::new(vec![1.0; 24], &[2, 3, 4]).unwrap();

        let c = add(&pool, &a, &b).unwrap();

        assert_eq!(c.shape(), a.shape());
        assert!(c.as_slice().iter().enumerate().all(|(i, &v)| v == i as f64 + 1.0));
    }

    #[test]
    fn test_add_more_workers_than_elements() {
        let pool = WorkerPool::new(8).unwrap();
        let a = Array::new(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        let c = add(&pool, &a, &a).unwrap();
        assert_eq!(c.as_slice(), &[2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_add_empty() {
        let pool = WorkerPool::new(2).unwrap();
        let a = Array::new(vec![], &[0, 0]).unwrap();
        let c = add(&pool, &a, &a).unwrap();
        assert!(c.is_empty());
        assert_eq!(c.shape(), &Shape::matrix(0, 0));
    }

    #[test]
    fn test_add_rank_mismatch() {
        let pool = WorkerPool::sequential();
        let a = Array::new(vec![1.0; 4], &[2, 2]).unwrap();
        let b = Array::new(vec![1.0; 4], &[4]).unwrap();
        assert!(add(&pool, &a, &b).unwrap_err().is_rank_mismatch());
    }

    #[test]
    fn test_add_shape_mismatch() {
        let pool = WorkerPool::sequential();
        let a = Array::new(vec![1.0; 6], &[2, 3]).unwrap();
        let b = Array::new(vec![1.0; 6], &[3, 2]).unwrap();
        assert!(add(&pool, &a, &b).unwrap_err().is_shape_mismatch());
    }
}
