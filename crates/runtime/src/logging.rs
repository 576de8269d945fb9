// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tracing subscriber setup.
//!
//! Log lines go to stderr and, optionally, are appended to a file as well.
//! `RUST_LOG` overrides the configured level when it is set.

use crate::RuntimeError;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Maps a `-v` count to a level name: 0 → `warn`, 1 → `info`,
/// 2 → `debug`, 3+ → `trace`.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Builds the filter: `RUST_LOG` if set, otherwise `level`.
pub fn env_filter(level: &str) -> Result<EnvFilter, RuntimeError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| RuntimeError::LoggingError(format!("invalid log level '{level}': {e}"))),
    }
}

/// Installs the global subscriber.
///
/// When `log_file` is given, its parent directory is created and lines are
/// appended without ANSI colours, tagged with the caller's `file:line`.
///
/// # Errors
/// [`RuntimeError::LoggingError`] if the level does not parse, the file
/// cannot be opened, or a global subscriber is already installed.
pub fn init_tracing(level: &str, log_file: Option<&Path>) -> Result<(), RuntimeError> {
    let filter = env_filter(level)?;

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    RuntimeError::LoggingError(format!(
                        "cannot create log directory '{}': {e}",
                        parent.display()
                    ))
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    RuntimeError::LoggingError(format!(
                        "cannot open log file '{}': {e}",
                        path.display()
                    ))
                })?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| RuntimeError::LoggingError(e.to_string()))
}
