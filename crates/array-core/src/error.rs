// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for array construction and operations.

use crate::Shape;

/// Errors that can occur while building arrays or running array operations.
///
/// Every variant is produced synchronously, before any work is handed to
/// the worker pool, so a failed call never leaves a partial result behind.
#[derive(Debug, thiserror::Error)]
pub enum ArrayError {
    /// A dimension is negative, or the dimensions describe more elements
    /// than can be addressed.
    #[error("invalid shape {dims:?}: {reason}")]
    InvalidShape {
        dims: Vec<i64>,
        reason: &'static str,
    },

    /// Two shapes that must agree do not.
    ///
    /// For construction, `lhs` is the declared shape and `rhs` is the
    /// one-dimensional shape of the supplied buffer.
    #[error("shape mismatch in {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },

    /// An operand has the wrong number of dimensions.
    #[error("rank mismatch in {op}: expected rank {expected}, got {actual}")]
    RankMismatch {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A worker pool was requested with zero workers.
    #[error("worker count must be at least 1")]
    InvalidWorkerCount,

    /// The underlying thread pool could not be started.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),
}

impl ArrayError {
    /// Returns `true` for [`ArrayError::ShapeMismatch`].
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, ArrayError::ShapeMismatch { .. })
    }

    /// Returns `true` for [`ArrayError::RankMismatch`].
    pub fn is_rank_mismatch(&self) -> bool {
        matches!(self, ArrayError::RankMismatch { .. })
    }

    /// Returns `true` for [`ArrayError::InvalidShape`].
    pub fn is_invalid_shape(&self) -> bool {
        matches!(self, ArrayError::InvalidShape { .. })
    }
}
