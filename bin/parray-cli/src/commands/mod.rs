// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and the setup they share.

pub mod benchmark;
pub mod demo;
pub mod status;

use array_runtime::logging::level_for_verbosity;
use array_runtime::EngineConfig;
use std::path::PathBuf;

/// Options accepted by every subcommand.
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub verbose: u8,
    pub log_file: Option<PathBuf>,
    pub workers: Option<usize>,
}

/// Builds the effective configuration: config file (or defaults), then
/// command-line overrides.
///
/// Without a config file and without `-v` the CLI stays quiet (`warn`).
pub fn load_config(opts: &GlobalOpts) -> anyhow::Result<EngineConfig> {
    let mut config = match &opts.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig {
            log_level: level_for_verbosity(0).to_string(),
            ..Default::default()
        },
    };

    if opts.verbose > 0 {
        config.log_level = level_for_verbosity(opts.verbose).to_string();
    }
    if let Some(workers) = opts.workers {
        config.num_workers = Some(workers);
    }
    if let Some(path) = &opts.log_file {
        config.log_file = Some(path.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Installs the tracing subscriber described by `config`.
pub fn init_tracing(config: &EngineConfig) -> anyhow::Result<()> {
    array_runtime::logging::init_tracing(&config.log_level, config.log_file.as_deref())?;
    Ok(())
}

/// Parses a comma-separated list, skipping empty entries.
pub fn parse_list<T, F>(input: &str, what: &str, parse: F) -> anyhow::Result<Vec<T>>
where
    F: Fn(&str) -> Option<T>,
{
    let items = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse(s).ok_or_else(|| anyhow::anyhow!("invalid {what} '{s}'")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if items.is_empty() {
        anyhow::bail!("no {what} given");
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> GlobalOpts {
        GlobalOpts {
            config: None,
            verbose: 0,
            log_file: None,
            workers: None,
        }
    }

    #[test]
    fn test_load_config_defaults_quiet() {
        let c = load_config(&opts()).unwrap();
        assert_eq!(c.log_level, "warn");
        assert_eq!(c.num_workers, None);
    }

    #[test]
    fn test_load_config_overrides() {
        let c = load_config(&GlobalOpts {
            verbose: 2,
            workers: Some(3),
            log_file: Some(PathBuf::from("log/parray.log")),
            ..opts()
        })
        .unwrap();
        assert_eq!(c.log_level, "debug");
        assert_eq!(c.num_workers, Some(3));
        assert_eq!(c.log_file, Some(PathBuf::from("log/parray.log")));
    }

    #[test]
    fn test_load_config_rejects_zero_workers() {
        assert!(load_config(&GlobalOpts {
            workers: Some(0),
            ..opts()
        })
        .is_err());
    }

    #[test]
    fn test_parse_list() {
        let v = parse_list("1, 2,,4", "worker count", |s| s.parse::<usize>().ok()).unwrap();
        assert_eq!(v, vec![1, 2, 4]);
        assert!(parse_list("1,x", "worker count", |s| s.parse::<usize>().ok()).is_err());
        assert!(parse_list(" , ", "worker count", |s| s.parse::<usize>().ok()).is_err());
    }
}
