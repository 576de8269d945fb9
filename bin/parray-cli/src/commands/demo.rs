// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `parray demo` command: run the basic scenarios on a configured engine.
//!
//! ```text
//! [1/4] add        [[1,2],[3,4]] + [[5,6],[7,8]]
//! [2/4] transpose  [[1,2],[3,4]]
//! [3/4] multiply   [[1,2,3],[4,5,6]] x I3
//! [4/4] construct  data=[1,2,3], shape=[2,2]   (rejected)
//! ```

use array_core::Array;
use array_runtime::{ArrayEngine, EngineConfig};

pub fn execute(config: EngineConfig, decimals: usize) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              parray · Operation Demo                ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let engine = ArrayEngine::new(config)?;
    println!(
        "  Engine: {} workers, block edge {}",
        engine.workers(),
        engine.block_size().edge()
    );
    println!();

    // ── Add ────────────────────────────────────────────────────
    println!("  [1/4] Element-wise add");
    let a = Array::new(vec![1.0, 2.0, 3.0, 4.0], &[2, 2])?;
    let b = Array::new(vec![5.0, 6.0, 7.0, 8.0], &[2, 2])?;
    let sum = engine.add(&a, &b)?;
    show("A", &a, decimals);
    show("B", &b, decimals);
    show("A + B", &sum, decimals);

    // ── Transpose ──────────────────────────────────────────────
    println!("  [2/4] Transpose");
    let t = engine.transpose(&a)?;
    show("A", &a, decimals);
    show("Aᵀ", &t, decimals);

    // ── Multiply ───────────────────────────────────────────────
    println!("  [3/4] Multiply by identity");
    let m = Array::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])?;
    let id = Array::identity(3);
    let product = engine.multiply(&m, &id)?;
    show("M", &m, decimals);
    show("M x I3", &product, decimals);
    println!(
        "        unchanged: {}",
        if product == m { "yes" } else { "NO" }
    );
    println!();

    // ── Construction ───────────────────────────────────────────
    println!("  [4/4] Construction with a mismatched buffer");
    match Array::new(vec![1.0, 2.0, 3.0], &[2, 2]) {
        Ok(array) => {
            tracing::warn!("mismatched construction was accepted: {}", array.shape());
            println!("        unexpectedly accepted");
        }
        Err(e) => println!("        rejected: {e}"),
    }
    println!();

    println!("  Metrics:");
    println!("   {}", engine.metrics().summary());
    println!();

    Ok(())
}

fn show(label: &str, array: &Array, decimals: usize) {
    println!("        {label}  {}", array.format_shape());
    for line in array.format_matrix(decimals).lines() {
        println!("          {line}");
    }
    println!();
}
