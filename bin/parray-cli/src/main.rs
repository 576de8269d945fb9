// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # parray
//!
//! Command-line interface for the parallel dense array engine.
//!
//! ## Usage
//! ```bash
//! # Walk through the basic operations
//! parray demo --decimals 2
//!
//! # Time every operation on 1024x1024 matrices across worker counts
//! parray bench --size 1024 --sweep-workers 1,2,4,8
//!
//! # Show the effective engine settings
//! parray --config parray.toml status
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "parray",
    about = "Parallel dense f64 arrays: add, transpose and blocked multiply",
    version,
    author
)]
struct Cli {
    /// Path to a TOML engine configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Append log lines to this file as well as stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Worker count (overrides the config file).
    #[arg(short, long, global = true)]
    workers: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the example scenarios and print their results.
    Demo {
        /// Decimal places used when printing matrices.
        #[arg(short, long, default_value_t = 1)]
        decimals: usize,
    },

    /// Time operations on random square matrices across worker counts.
    Bench {
        /// Edge length of the random matrices.
        #[arg(short, long, default_value_t = 512)]
        size: usize,

        /// Comma-separated worker counts to sweep (e.g., "1,2,4").
        #[arg(long, default_value = "1,2,4")]
        sweep_workers: String,

        /// Operations to run (comma-separated).
        #[arg(long, default_value = "add,transpose,multiply")]
        ops: String,

        /// Seed for the random matrices.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Display detected parallelism and the effective engine settings.
    Status,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let opts = commands::GlobalOpts {
        config: cli.config,
        verbose: cli.verbose,
        log_file: cli.log_file,
        workers: cli.workers,
    };
    let config = commands::load_config(&opts)?;
    commands::init_tracing(&config)?;

    match cli.command {
        Commands::Demo { decimals } => commands::demo::execute(config, decimals),
        Commands::Bench {
            size,
            sweep_workers,
            ops,
            seed,
        } => commands::benchmark::execute(config, size, &sweep_workers, &ops, seed),
        Commands::Status => commands::status::execute(&config),
    }
}
