// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `parray bench` command: sweep operations across worker counts.
//!
//! Every operation runs on the same random `size x size` operands once per
//! worker count. The table shows the wall time of each run, and every
//! result buffer is checked bit for bit against the first worker count's.

use super::parse_list;
use array_core::Array;
use array_runtime::{ArrayEngine, EngineConfig, OpKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn execute(
    config: EngineConfig,
    size: usize,
    sweep_workers: &str,
    ops: &str,
    seed: u64,
) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              parray · Benchmark Suite               ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let workers = parse_list(sweep_workers, "worker count", |s| {
        s.parse::<usize>().ok().filter(|&w| w > 0)
    })?;
    let ops = parse_list(ops, "operation", OpKind::parse)?;

    println!("  Size:       {size} x {size}");
    println!("  Workers:    {workers:?}");
    println!(
        "  Ops:        {:?}",
        ops.iter().map(|o| o.as_str()).collect::<Vec<_>>()
    );
    println!("  Block edge: {}", config.block_size().edge());
    println!("  Seed:       {seed}");
    println!();

    let mut rng = StdRng::seed_from_u64(seed);
    let a = random_square(&mut rng, size)?;
    let b = random_square(&mut rng, size)?;

    // ── Results Table ──────────────────────────────────────────
    println!(
        "  {:<10} {:>8} {:>12} {:>14} {:>10}",
        "Op", "Workers", "Time", "Melem/s", "Identical",
    );
    println!("  {}", "-".repeat(58));

    let mut results: Vec<BenchResult> = Vec::new();
    let mut mismatches = 0usize;

    for &op in &ops {
        let mut reference: Option<Array> = None;
        for &w in &workers {
            let engine = ArrayEngine::new(EngineConfig {
                num_workers: Some(w),
                record_metrics: true,
                ..config.clone()
            })?;

            let output = run_op(&engine, op, &a, &b)?;
            let metrics = engine.metrics();
            let Some(record) = metrics.last() else {
                anyhow::bail!("no metrics recorded for {op}");
            };

            let identical = match &reference {
                Some(r) => bit_identical(r, &output),
                None => true,
            };
            if !identical {
                mismatches += 1;
                tracing::error!(op = %op, workers = w, "result differs from the first worker count");
            }

            let result = BenchResult {
                op,
                workers: w,
                total_ms: record.duration.as_secs_f64() * 1000.0,
                melems_per_sec: record.elements_per_second() / 1e6,
                identical,
            };
            println!(
                "  {:<10} {:>8} {:>10.3}ms {:>14.2} {:>10}",
                result.op.as_str(),
                result.workers,
                result.total_ms,
                result.melems_per_sec,
                if result.identical { "yes" } else { "NO" },
            );
            results.push(result);

            if reference.is_none() {
                reference = Some(output);
            }
        }
    }

    println!();

    // ── Summary ────────────────────────────────────────────────
    println!("  Summary:");
    for &op in &ops {
        let mut runs = results.iter().filter(|r| r.op == op);
        let Some(first) = runs.next() else { continue };
        let fastest = runs.fold(first, |best, r| if r.total_ms < best.total_ms { r } else { best });
        println!(
            "   {:<10} fastest with {} workers ({:.3}ms, {:.2}x vs {} workers)",
            op.as_str(),
            fastest.workers,
            fastest.total_ms,
            speedup(first.total_ms, fastest.total_ms),
            first.workers,
        );
    }
    println!();

    if mismatches > 0 {
        anyhow::bail!("{mismatches} runs produced results that differ across worker counts");
    }
    println!("  All worker counts produced bit-identical results.");
    println!();

    Ok(())
}

#[derive(Debug)]
struct BenchResult {
    op: OpKind,
    workers: usize,
    total_ms: f64,
    melems_per_sec: f64,
    identical: bool,
}

fn run_op(engine: &ArrayEngine, op: OpKind, a: &Array, b: &Array) -> anyhow::Result<Array> {
    let output = match op {
        OpKind::Add => engine.add(a, b)?,
        OpKind::Transpose => engine.transpose(a)?,
        OpKind::Multiply => engine.multiply(a, b)?,
    };
    Ok(output)
}

fn random_square(rng: &mut StdRng, size: usize) -> anyhow::Result<Array> {
    let data = (0..size * size).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Ok(Array::matrix(size, size, data)?)
}

/// Compares buffers by bit pattern, so `-0.0` and `0.0` differ.
fn bit_identical(a: &Array, b: &Array) -> bool {
    a.shape() == b.shape()
        && a
            .as_slice()
            .iter()
            .zip(b.as_slice())
            .all(|(x, y)| x.to_bits() == y.to_bits())
}

fn speedup(baseline_ms: f64, ms: f64) -> f64 {
    if ms <= 0.0 {
        return 0.0;
    }
    baseline_ms / ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_identical() {
        let a = Array::matrix(1, 2, vec![0.0, 1.0]).unwrap();
        let b = Array::matrix(1, 2, vec![-0.0, 1.0]).unwrap();
        let c = Array::matrix(2, 1, vec![0.0, 1.0]).unwrap();
        assert!(bit_identical(&a, &a.clone()));
        assert!(!bit_identical(&a, &b));
        assert!(!bit_identical(&a, &c));
    }

    #[test]
    fn test_run_op_dispatch() {
        let engine = ArrayEngine::with_workers(2).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let a = random_square(&mut rng, 5).unwrap();
        let b = random_square(&mut rng, 5).unwrap();

        assert_eq!(run_op(&engine, OpKind::Add, &a, &b).unwrap(), a.add(&b).unwrap());
        assert_eq!(run_op(&engine, OpKind::Transpose, &a, &b).unwrap(), a.transpose().unwrap());
        assert_eq!(run_op(&engine, OpKind::Multiply, &a, &b).unwrap(), a.multiply(&b).unwrap());
        assert_eq!(engine.metrics().ops.len(), 3);
    }

    #[test]
    fn test_speedup() {
        assert!((speedup(10.0, 5.0) - 2.0).abs() < 1e-12);
        assert_eq!(speedup(10.0, 0.0), 0.0);
    }
}
