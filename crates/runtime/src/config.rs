// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Engine configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! num_workers = 4
//! block_bytes = 64
//! log_level = "info"
//! log_file = "log/parray.log"
//! record_metrics = true
//! max_records = 1024
//! ```

use crate::metrics::DEFAULT_MAX_RECORDS;
use array_core::{BlockSize, DEFAULT_BLOCK_BYTES};
use std::path::{Path, PathBuf};

/// Configuration for an [`crate::ArrayEngine`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Number of workers (defaults to the available hardware concurrency).
    pub num_workers: Option<usize>,
    /// Matrix multiply block size in bytes; the block edge is
    /// `block_bytes / 8` cells.
    #[serde(default = "default_block_bytes")]
    pub block_bytes: usize,
    /// Default log level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Optional file that receives a copy of every log line.
    pub log_file: Option<PathBuf>,
    /// Whether to record per-operation timings.
    #[serde(default = "default_true")]
    pub record_metrics: bool,
    /// How many recent per-operation records to keep; totals are kept
    /// regardless.
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

fn default_block_bytes() -> usize {
    DEFAULT_BLOCK_BYTES
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_records() -> usize {
    DEFAULT_MAX_RECORDS
}

fn default_true() -> bool {
    true
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, super::RuntimeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            super::RuntimeError::ConfigError(format!(
                "cannot read config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, super::RuntimeError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| {
            super::RuntimeError::ConfigError(format!("TOML parse error: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, super::RuntimeError> {
        toml::to_string_pretty(self).map_err(|e| {
            super::RuntimeError::ConfigError(format!("TOML serialise error: {e}"))
        })
    }

    /// Rejects settings no engine can run with.
    pub fn validate(&self) -> Result<(), super::RuntimeError> {
        if self.num_workers == Some(0) {
            return Err(super::RuntimeError::ConfigError(
                "num_workers must be at least 1".into(),
            ));
        }
        if self.block_bytes < std::mem::size_of::<f64>() {
            return Err(super::RuntimeError::ConfigError(format!(
                "block_bytes must be at least {} (one f64), got {}",
                std::mem::size_of::<f64>(),
                self.block_bytes
            )));
        }
        Ok(())
    }

    /// Resolves the number of workers.
    pub fn resolve_workers(&self) -> usize {
        self.num_workers
            .unwrap_or_else(array_core::available_workers)
    }

    /// Returns the multiply block size.
    pub fn block_size(&self) -> BlockSize {
        BlockSize::from_bytes(self.block_bytes)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_workers: None,
            block_bytes: DEFAULT_BLOCK_BYTES,
            log_level: default_log_level(),
            log_file: None,
            record_metrics: true,
            max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = EngineConfig::default();
        assert_eq!(c.block_bytes, 64);
        assert_eq!(c.block_size().edge(), 8);
        assert_eq!(c.log_level, "info");
        assert!(c.record_metrics);
        assert_eq!(c.max_records, 1024);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
num_workers = 2
block_bytes = 256
log_level = "debug"
log_file = "/tmp/parray.log"
record_metrics = false
max_records = 16
"#;
        let c = EngineConfig::from_toml(toml).unwrap();
        assert_eq!(c.num_workers, Some(2));
        assert_eq!(c.block_size().edge(), 32);
        assert_eq!(c.log_level, "debug");
        assert_eq!(c.log_file, Some(PathBuf::from("/tmp/parray.log")));
        assert!(!c.record_metrics);
        assert_eq!(c.max_records, 16);
    }

    #[test]
    fn test_from_toml_defaults() {
        let c = EngineConfig::from_toml("").unwrap();
        assert_eq!(c, EngineConfig::default());
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = EngineConfig {
            num_workers: Some(3),
            block_bytes: 128,
            ..Default::default()
        };
        let toml = c.to_toml().unwrap();
        let back = EngineConfig::from_toml(&toml).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_rejects_zero_workers() {
        assert!(EngineConfig::from_toml("num_workers = 0").is_err());
    }

    #[test]
    fn test_rejects_tiny_blocks() {
        assert!(EngineConfig::from_toml("block_bytes = 4").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(EngineConfig::from_toml("num_workers = \"many\"").is_err());
    }

    #[test]
    fn test_resolve_workers() {
        let c = EngineConfig {
            num_workers: Some(8),
            ..Default::default()
        };
        assert_eq!(c.resolve_workers(), 8);

        let c2 = EngineConfig::default();
        assert!(c2.resolve_workers() >= 1);
    }
}
