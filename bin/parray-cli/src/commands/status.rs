// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `parray status` command: display detected parallelism and the effective
//! engine configuration.

use array_runtime::EngineConfig;

pub fn execute(config: &EngineConfig) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              parray · Engine Status                 ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let detected = array_core::available_workers();
    let workers = config.resolve_workers();
    let block = config.block_size();

    // ── Parallelism ────────────────────────────────────────────
    println!("  Parallelism");
    println!("   Detected:     {detected} hardware threads");
    println!(
        "   Workers:      {workers}{}  {}",
        if config.num_workers.is_some() { "" } else { " (detected)" },
        worker_bar(workers, detected),
    );
    if workers > detected {
        println!("   NOTE: more workers than hardware threads");
    }
    println!();

    // ── Multiply ───────────────────────────────────────────────
    println!("  Multiply");
    println!("   Block bytes:  {}", config.block_bytes);
    println!("   Block edge:   {} x {} cells", block.edge(), block.edge());
    println!();

    // ── Logging ────────────────────────────────────────────────
    println!("  Logging");
    println!("   Level:        {}", config.log_level);
    match &config.log_file {
        Some(path) => println!("   File:         {}", path.display()),
        None => println!("   File:         (stderr only)"),
    }
    println!(
        "   Metrics:      {}",
        if config.record_metrics { "recorded" } else { "off" }
    );
    println!("   Kept records: {}", config.max_records);
    println!();

    Ok(())
}

/// Creates a visual bar of workers against hardware threads.
fn worker_bar(workers: usize, detected: usize) -> String {
    let width = detected.clamp(1, 32);
    let filled = workers.min(width);
    let symbol = if workers > detected { "#" } else { "=" };
    format!("[{}{}]", symbol.repeat(filled), ".".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_bar() {
        assert_eq!(worker_bar(2, 4), "[==..]");
        assert_eq!(worker_bar(4, 4), "[====]");
        assert_eq!(worker_bar(6, 4), "[####]");
    }
}
