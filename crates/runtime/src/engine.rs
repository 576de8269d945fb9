// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The array engine: a configured worker pool plus operation metrics.
//!
//! ```text
//! EngineConfig ──► ArrayEngine::new ──► WorkerPool (num_workers threads)
//!                                         │
//!               add / transpose / multiply ┤  fan-out, join
//!                                         ▼
//!                                   Array + OpMetrics
//! ```

use crate::{EngineConfig, EngineMetrics, OpKind, OpMetrics, RuntimeError};
use array_core::{Array, ArrayError, BlockSize, WorkerPool};
use std::sync::Mutex;
use std::time::Instant;

/// Runs array operations on a dedicated worker pool.
///
/// The engine owns its pool, so every operation it runs uses the same
/// worker count and block size, both taken from the [`EngineConfig`].
/// It is `Send + Sync` and can be shared between threads; operations
/// issued concurrently each fan out onto the same pool.
///
/// # Example
/// ```
/// use array_core::Array;
/// use array_runtime::{ArrayEngine, EngineConfig};
///
/// let engine = ArrayEngine::new(EngineConfig {
///     num_workers: Some(2),
///     ..Default::default()
/// })
/// .unwrap();
///
/// let a = Array::new(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// let t = engine.transpose(&a).unwrap();
/// assert_eq!(t.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
/// assert_eq!(engine.metrics().ops.len(), 1);
/// ```
pub struct ArrayEngine {
    config: EngineConfig,
    pool: WorkerPool,
    block: BlockSize,
    metrics: Mutex<EngineMetrics>,
}

impl ArrayEngine {
    /// Creates an engine from the given configuration.
    ///
    /// # Errors
    /// [`RuntimeError::ConfigError`] for an invalid config, or
    /// [`RuntimeError::Array`] if the worker pool cannot start.
    pub fn new(config: EngineConfig) -> Result<Self, RuntimeError> {
        config.validate()?;
        let workers = config.resolve_workers();
        let block = config.block_size();
        let pool = WorkerPool::new(workers)?;
        tracing::info!(workers, block_edge = block.edge(), "engine created");
        let metrics = Mutex::new(EngineMetrics::with_capacity(config.max_records));
        Ok(Self {
            config,
            pool,
            block,
            metrics,
        })
    }

    /// Creates an engine with `workers` workers and default settings.
    pub fn with_workers(workers: usize) -> Result<Self, RuntimeError> {
        Self::new(EngineConfig {
            num_workers: Some(workers),
            ..Default::default()
        })
    }

    /// Returns the engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine's worker pool.
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Returns the worker count.
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Returns the multiply block size.
    pub fn block_size(&self) -> BlockSize {
        self.block
    }

    /// Element-wise sum.
    pub fn add(&self, lhs: &Array, rhs: &Array) -> Result<Array, RuntimeError> {
        self.timed(OpKind::Add, || array_core::add(&self.pool, lhs, rhs))
    }

    /// Matrix transpose.
    pub fn transpose(&self, input: &Array) -> Result<Array, RuntimeError> {
        self.timed(OpKind::Transpose, || array_core::transpose(&self.pool, input))
    }

    /// Blocked matrix product with the configured block size.
    pub fn multiply(&self, lhs: &Array, rhs: &Array) -> Result<Array, RuntimeError> {
        self.timed(OpKind::Multiply, || {
            array_core::matmul(&self.pool, lhs, rhs, self.block)
        })
    }

    /// Returns a snapshot of the recorded metrics. At most
    /// `max_records` individual records are copied.
    pub fn metrics(&self) -> EngineMetrics {
        self.metrics
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Discards all recorded metrics.
    pub fn reset_metrics(&self) {
        if let Ok(mut m) = self.metrics.lock() {
            *m = EngineMetrics::with_capacity(self.config.max_records);
        }
    }

    fn timed<F>(&self, op: OpKind, f: F) -> Result<Array, RuntimeError>
    where
        F: FnOnce() -> Result<Array, ArrayError>,
    {
        let start = Instant::now();
        let result = f();
        let duration = start.elapsed();

        let output = result.map_err(|e| {
            tracing::debug!(op = %op, "operation rejected: {e}");
            e
        })?;

        tracing::debug!(
            op = %op,
            shape = %output.shape(),
            elapsed_us = duration.as_micros() as u64,
            "operation complete"
        );

        if self.config.record_metrics {
            if let Ok(mut metrics) = self.metrics.lock() {
                metrics.record(OpMetrics {
                    op,
                    output_shape: output.shape().clone(),
                    elements: output.len(),
                    workers: self.pool.workers(),
                    duration,
                });
            }
        }

        Ok(output)
    }
}

impl std::fmt::Debug for ArrayEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayEngine")
            .field("workers", &self.pool.workers())
            .field("block_edge", &self.block.edge())
            .field("record_metrics", &self.config.record_metrics)
            .finish()
    }
}
