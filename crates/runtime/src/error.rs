// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the array runtime.

/// Errors that can occur while configuring or driving an [`crate::ArrayEngine`].
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// An array operation rejected its operands, or the pool failed to start.
    #[error("array error: {0}")]
    Array(#[from] array_core::ArrayError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The tracing subscriber could not be installed.
    #[error("logging error: {0}")]
    LoggingError(String),
}
