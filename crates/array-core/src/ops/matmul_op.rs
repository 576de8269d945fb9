// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Blocked, parallel matrix multiplication.

use crate::ops::transpose;
use crate::{partition, Array, ArrayError, Shape, WorkerPool};
use std::ops::Range;

/// Default block size in bytes. Eight `f64`s, so blocks are 8×8 cells.
pub const DEFAULT_BLOCK_BYTES: usize = 64;

/// Edge length of the square output tiles used by [`matmul`].
///
/// This is a tuning knob only: any edge of at least 1 produces the same
/// result, bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockSize {
    edge: usize,
}

impl BlockSize {
    /// Derives the edge from a byte budget (`bytes / size_of::<f64>()`),
    /// never smaller than 1.
    pub fn from_bytes(bytes: usize) -> Self {
        Self::from_edge(bytes / std::mem::size_of::<f64>())
    }

    /// Uses `edge` cells per block side, never smaller than 1.
    pub fn from_edge(edge: usize) -> Self {
        Self { edge: edge.max(1) }
    }

    /// Returns the block edge in cells.
    pub fn edge(self) -> usize {
        self.edge
    }
}

impl Default for BlockSize {
    fn default() -> Self {
        Self::from_bytes(DEFAULT_BLOCK_BYTES)
    }
}

/// Performs matrix multiplication: `lhs @ rhs`.
///
/// `lhs` is `[M, K]`, `rhs` is `[K, N]`, and the result is `[M, N]`.
///
/// `rhs` is transposed once up front so that both operands of every dot
/// product are walked contiguously. The output is then cut into bands of
/// `block.edge()` rows; each worker takes a contiguous run of bands and
/// visits them one `block.edge()`-column tile at a time. Every cell is
/// accumulated from `0.0` in ascending `k`, so the result is independent
/// of the worker count and the block size.
///
/// # Errors
/// Returns [`ArrayError::RankMismatch`] if either operand is not rank 2.
/// Returns [`ArrayError::ShapeMismatch`] if the inner dimensions differ.
pub fn matmul(
    pool: &WorkerPool,
    lhs: &Array,
    rhs: &Array,
    block: BlockSize,
) -> Result<Array, ArrayError> {
    let (m, k, n) = lhs.shape().matmul_dims(rhs.shape())?;
    let out_shape = Shape::matrix(m, n);

    if m == 0 || n == 0 {
        return Ok(Array::from_parts(out_shape, Vec::new()));
    }

    let rhs_t = transpose(pool, rhs)?;

    let block_rows = block.edge().min(m);
    let block_cols = block.edge().min(n);

    tracing::debug!(
        op = "matmul",
        m,
        k,
        n,
        block_rows,
        block_cols,
        workers = pool.workers(),
        "dispatching"
    );

    // Whole bands per worker, expressed as element ranges of the output.
    let bands = m.div_ceil(block_rows);
    let ranges: Vec<Range<usize>> = partition(bands, pool.workers())
        .into_iter()
        .map(|r| (r.start * block_rows * n)..((r.end * block_rows).min(m) * n))
        .collect();

    let a = lhs.as_slice();
    let bt = rhs_t.as_slice();
    let mut out = vec![0.0f64; m * n];

    pool.run_partitioned(&mut out, &ranges, |range, chunk| {
        let first_row = range.start / n;
        matmul_band_f64(
            a,
            bt,
            chunk,
            first_row,
            k,
            n,
            block_rows,
            block_cols,
        );
    });

    Ok(Array::from_parts(out_shape, out))
}

/// Computes the rows of `c` starting at global row `first_row`.
///
/// `c` holds whole output rows; `bt` is the transposed right operand
/// (`[N, K]`). Tiles are `block_rows × block_cols`.
#[allow(clippy::too_many_arguments)]
fn matmul_band_f64(
    a: &[f64],
    bt: &[f64],
    c: &mut [f64],
    first_row: usize,
    k: usize,
    n: usize,
    block_rows: usize,
    block_cols: usize,
) {
    let rows = c.len() / n;
    for band in (0..rows).step_by(block_rows) {
        let band_end = (band + block_rows).min(rows);
        for j0 in (0..n).step_by(block_cols) {
            let j_end = (j0 + block_cols).min(n);
            for local_i in band..band_end {
                let i = first_row + local_i;
                let a_row = &a[i * k..(i + 1) * k];
                let c_row = &mut c[local_i * n..(local_i + 1) * n];
                for j in j0..j_end {
                    c_row[j] = dot(a_row, &bt[j * k..(j + 1) * k]);
                }
            }
        }
    }
}

/// Plain left-to-right dot product.
#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    let mut acc = 0.0;
    for (x, y) in a.iter().zip(b) {
        acc += x * y;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size() {
        assert_eq!(BlockSize::default().edge(), 8);
        assert_eq!(BlockSize::from_bytes(4096).edge(), 512);
        assert_eq!(BlockSize::from_bytes(3).edge(), 1);
        assert_eq!(BlockSize::from_edge(0).edge(), 1);
    }

    #[test]
    fn test_matmul_2x3_times_3x2() {
        // A = [[1, 2, 3], [4, 5, 6]]
        // B = [[7, 8], [9, 10], [11, 12]]
        // C = [[58, 64], [139, 154]]
        let pool = WorkerPool::new(2).unwrap();
        let a = Array::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let b = Array::new(vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0], &[3, 2]).unwrap();

        let c = matmul(&pool, &a, &b, BlockSize::default()).unwrap();

        assert_eq!(c.shape(), &Shape::matrix(2, 2));
        assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_matmul_identity() {
        let pool = WorkerPool::new(2).unwrap();
        let a = Array::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let eye = Array::identity(3);

        let c = matmul(&pool, &a, &eye, BlockSize::default()).unwrap();

        assert_eq!(c, a);
    }

    #[test]
    fn test_matmul_small_blocks_many_workers() {
        // 5x4 @ 4x3 with 2x2 tiles over 3 workers: bands split unevenly.
        let pool = WorkerPool::new(3).unwrap();
        let a = Array::new((0..20).map(|i| i as f64).collect(), &[5, 4]).unwrap();
        let b = Array::new((0..12).map(|i| (i % 5) as f64).collect(), &[4, 3]).unwrap();

        let tiled = matmul(&pool, &a, &b, BlockSize::from_edge(2)).unwrap();
        let reference = matmul(&WorkerPool::sequential(), &a, &b, BlockSize::from_edge(64)).unwrap();

        assert_eq!(tiled.as_slice(), reference.as_slice());
        // B = [[0, 1, 2], [3, 4, 0], [1, 2, 3], [4, 0, 1]]
        // Row 0: [0, 1, 2, 3] @ B = [17, 8, 9]
        assert_eq!(&tiled.as_slice()[..3], &[17.0, 8.0, 9.0]);
    }

    #[test]
    fn test_matmul_empty_inner_dimension() {
        let pool = WorkerPool::sequential();
        let a = Array::new(vec![], &[2, 0]).unwrap();
        let b = Array::new(vec![], &[0, 3]).unwrap();

        let c = matmul(&pool, &a, &b, BlockSize::default()).unwrap();

        assert_eq!(c.shape(), &Shape::matrix(2, 3));
        assert!(c.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_matmul_empty_output() {
        let pool = WorkerPool::sequential();
        let a = Array::new(vec![], &[0, 3]).unwrap();
        let b = Array::new(vec![1.0; 6], &[3, 2]).unwrap();
        let c = matmul(&pool, &a, &b, BlockSize::default()).unwrap();
        assert_eq!(c.shape(), &Shape::matrix(0, 2));
        assert!(c.is_empty());
    }

    #[test]
    fn test_matmul_shape_mismatch() {
        let pool = WorkerPool::sequential();
        let a = Array::zeros(Shape::matrix(2, 3));
        let b = Array::zeros(Shape::matrix(4, 2)); // 4 != 3
        let err = matmul(&pool, &a, &b, BlockSize::default()).unwrap_err();
        assert!(err.is_shape_mismatch());
    }

    #[test]
    fn test_matmul_rank_mismatch() {
        let pool = WorkerPool::sequential();
        let a = Array::zeros(Shape::vector(3));
        let b = Array::zeros(Shape::matrix(3, 2));
        assert!(matmul(&pool, &a, &b, BlockSize::default())
            .unwrap_err()
            .is_rank_mismatch());
        assert!(matmul(&pool, &b, &a, BlockSize::default())
            .unwrap_err()
            .is_rank_mismatch());
    }

    #[test]
    fn test_matmul_1x1() {
        let pool = WorkerPool::sequential();
        let a = Array::new(vec![3.0], &[1, 1]).unwrap();
        let b = Array::new(vec![4.0], &[1, 1]).unwrap();
        let c = matmul(&pool, &a, &b, BlockSize::default()).unwrap();
        assert_eq!(c.as_slice(), &[12.0]);
    }
}
