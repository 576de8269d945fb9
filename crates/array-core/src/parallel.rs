// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fan-out/fan-in execution over disjoint slices of an output buffer.
//!
//! Every array operation follows the same bulk-synchronous pattern:
//!
//! ```text
//!   output buffer  [0 ............................... len)
//!                   │ chunk 0 │ chunk 1 │ ... │ chunk W-1 │
//!                        │         │               │
//!                     worker 0  worker 1  ...   worker W-1
//!                        └─────────┴───────┬───────┘
//!                                     scope join
//! ```
//!
//! The output is split into contiguous `&mut` sub-slices, one per worker,
//! so workers never share a write location and need no synchronisation.
//! The `rayon` scope is the only join point: the caller resumes once every
//! chunk has been written.

use crate::ArrayError;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::ops::Range;
use std::sync::OnceLock;

/// Fallback worker count when the platform cannot report its parallelism.
const FALLBACK_WORKERS: usize = 4;

/// A fixed-size set of workers that array operations fan out onto.
///
/// The worker count decides how each operation partitions its output, so
/// two pools with different counts produce the same results through
/// different partitions. Build one per configuration and reuse it; starting
/// a pool spawns its threads.
pub struct WorkerPool {
    workers: usize,
    /// `None` runs every chunk on the calling thread.
    pool: Option<ThreadPool>,
}

impl WorkerPool {
    /// Starts a pool with exactly `workers` threads.
    ///
    /// # Errors
    /// [`ArrayError::InvalidWorkerCount`] if `workers` is zero, or
    /// [`ArrayError::WorkerPool`] if the threads cannot be spawned.
    pub fn new(workers: usize) -> Result<Self, ArrayError> {
        if workers == 0 {
            return Err(ArrayError::InvalidWorkerCount);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("parray-worker-{i}"))
            .build()
            .map_err(|e| ArrayError::WorkerPool(e.to_string()))?;
        tracing::info!(workers, "worker pool started");
        Ok(Self {
            workers,
            pool: Some(pool),
        })
    }

    /// Starts a pool sized to the available hardware concurrency.
    pub fn detect() -> Result<Self, ArrayError> {
        Self::new(available_workers())
    }

    /// A single-worker pool that runs everything on the calling thread.
    pub fn sequential() -> Self {
        Self {
            workers: 1,
            pool: None,
        }
    }

    /// Returns the process-wide pool used by the convenience methods on
    /// [`crate::Array`].
    ///
    /// It is created on first use with [`WorkerPool::detect`]. If the
    /// threads cannot be started it degrades to [`WorkerPool::sequential`].
    pub fn shared() -> &'static WorkerPool {
        static SHARED: OnceLock<WorkerPool> = OnceLock::new();
        SHARED.get_or_init(|| {
            WorkerPool::detect().unwrap_or_else(|e| {
                tracing::warn!("falling back to sequential execution: {e}");
                WorkerPool::sequential()
            })
        })
    }

    /// Returns the number of workers an operation fans out to.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Returns `true` if chunks run on the calling thread.
    pub fn is_sequential(&self) -> bool {
        self.pool.is_none()
    }

    /// Splits `out` into one contiguous chunk per worker (see [`partition`])
    /// and runs `f(range, chunk)` for each, where `range` is the chunk's
    /// position in `out`. Returns after every chunk has been processed.
    pub fn for_each_chunk<T, F>(&self, out: &mut [T], f: F)
    where
        T: Send,
        F: Fn(Range<usize>, &mut [T]) + Sync,
    {
        let ranges = partition(out.len(), self.workers);
        self.run_partitioned(out, &ranges, f);
    }

    /// Runs `f(range, chunk)` for every range in `ranges`, each on its own
    /// worker, and waits for all of them.
    ///
    /// `ranges` must be sorted, contiguous, and start at 0; the last range
    /// may stop short of `out.len()`, in which case the tail is left
    /// untouched.
    ///
    /// # Panics
    /// Panics if a range ends past `out.len()` or the ranges are not
    /// contiguous.
    pub fn run_partitioned<T, F>(&self, out: &mut [T], ranges: &[Range<usize>], f: F)
    where
        T: Send,
        F: Fn(Range<usize>, &mut [T]) + Sync,
    {
        let mut rest = out;
        let mut cursor = 0;
        let mut chunks = Vec::with_capacity(ranges.len());
        for range in ranges {
            assert_eq!(range.start, cursor, "partition ranges must be contiguous");
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.end - cursor);
            chunks.push((range.clone(), head));
            rest = tail;
            cursor = range.end;
        }

        match &self.pool {
            Some(pool) if chunks.len() > 1 => {
                let f = &f;
                pool.scope(|s| {
                    for (range, chunk) in chunks {
                        s.spawn(move |_| f(range, chunk));
                    }
                });
            }
            _ => {
                for (range, chunk) in chunks {
                    f(range, chunk);
                }
            }
        }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers)
            .field("sequential", &self.is_sequential())
            .finish()
    }
}

/// Returns the hardware concurrency, or a fallback of 4.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(FALLBACK_WORKERS)
}

/// Splits `[0, len)` into at most `parts` contiguous, non-overlapping ranges.
///
/// Each range holds `len / parts` indices and the last one absorbs the
/// remainder. When `len < parts` only `len` single-index ranges are
/// produced, so no range is ever empty. An empty input yields no ranges.
///
/// ```
/// use array_core::partition;
/// assert_eq!(partition(10, 3), vec![0..3, 3..6, 6..10]);
/// assert_eq!(partition(2, 4), vec![0..1, 1..2]);
/// assert!(partition(0, 4).is_empty());
/// ```
pub fn partition(len: usize, parts: usize) -> Vec<Range<usize>> {
    if len == 0 || parts == 0 {
        return Vec::new();
    }
    let parts = parts.min(len);
    let base = len / parts;
    (0..parts)
        .map(|w| {
            let start = w * base;
            let end = if w + 1 == parts { len } else { start + base };
            start..end
        })
        .collect()
}
