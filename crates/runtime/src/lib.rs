// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # array-runtime
//!
//! Configured, instrumented execution of `array-core` operations.
//!
//! The runtime adds the pieces an application needs around the bare
//! operations:
//! - [`EngineConfig`]: worker count, multiply block size and logging
//!   settings, loadable from TOML.
//! - [`ArrayEngine`]: owns a worker pool built from the config and runs
//!   add / transpose / multiply on it, timing each call.
//! - [`EngineMetrics`]: per-operation totals and a bounded log of recent
//!   timing records.
//! - [`logging`]: `tracing` subscriber setup with an optional log file.

mod config;
mod engine;
mod error;
pub mod logging;
mod metrics;

pub use config::EngineConfig;
pub use engine::ArrayEngine;
pub use error::RuntimeError;
pub use metrics::{EngineMetrics, OpKind, OpMetrics, OpTotals, DEFAULT_MAX_RECORDS};
