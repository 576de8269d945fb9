// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Operation profiling metrics.
//!
//! [`EngineMetrics`] collects one [`OpMetrics`] record per operation run
//! on an engine. They are the basis for comparing worker counts and block
//! sizes.

use array_core::Shape;
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// The operations an engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Add,
    Transpose,
    Multiply,
}

impl OpKind {
    /// Returns the lowercase operation name.
    pub fn as_str(self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Transpose => "transpose",
            OpKind::Multiply => "multiply",
        }
    }

    fn index(self) -> usize {
        match self {
            OpKind::Add => 0,
            OpKind::Transpose => 1,
            OpKind::Multiply => 2,
        }
    }

    /// Parses an operation name, accepting `matmul` for multiply.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "add" => Some(OpKind::Add),
            "transpose" => Some(OpKind::Transpose),
            "multiply" | "matmul" => Some(OpKind::Multiply),
            _ => None,
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics for a single operation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OpMetrics {
    /// Which operation ran.
    pub op: OpKind,
    /// Shape of the result.
    pub output_shape: Shape,
    /// Number of elements in the result.
    pub elements: usize,
    /// Worker count the operation fanned out to.
    pub workers: usize,
    /// Wall-clock time from dispatch to join.
    pub duration: Duration,
}

impl OpMetrics {
    /// Returns output elements produced per second.
    pub fn elements_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.elements as f64 / secs
    }
}

/// Number of recent records an [`EngineMetrics`] keeps by default.
pub const DEFAULT_MAX_RECORDS: usize = 1024;

/// Running count and time for one operation kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct OpTotals {
    pub count: usize,
    pub duration: Duration,
}

/// Aggregate metrics for everything an engine has run.
///
/// Totals cover every recorded operation. Individual records are kept in
/// a ring of at most `max_records` entries; older ones are dropped.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EngineMetrics {
    /// Total time spent inside operations.
    pub total_duration: Duration,
    /// Number of operations recorded since creation or reset.
    pub total_ops: usize,
    /// Most recent per-operation records, oldest first.
    pub ops: VecDeque<OpMetrics>,
    max_records: usize,
    totals: [OpTotals; 3],
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_RECORDS)
    }
}

impl EngineMetrics {
    /// Creates an empty metrics container with the default record limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container keeping at most `max_records` records.
    /// Zero keeps totals only.
    pub fn with_capacity(max_records: usize) -> Self {
        Self {
            total_duration: Duration::ZERO,
            total_ops: 0,
            ops: VecDeque::with_capacity(max_records.min(DEFAULT_MAX_RECORDS)),
            max_records,
            totals: [OpTotals::default(); 3],
        }
    }

    /// Returns the record limit.
    pub fn max_records(&self) -> usize {
        self.max_records
    }

    /// Records one operation.
    pub fn record(&mut self, op: OpMetrics) {
        self.total_duration += op.duration;
        self.total_ops += 1;

        let totals = &mut self.totals[op.op.index()];
        totals.count += 1;
        totals.duration += op.duration;

        if self.max_records == 0 {
            return;
        }
        if self.ops.len() == self.max_records {
            self.ops.pop_front();
        }
        self.ops.push_back(op);
    }

    /// Returns the running totals for `kind`.
    pub fn totals(&self, kind: OpKind) -> OpTotals {
        self.totals[kind.index()]
    }

    /// Returns how many operations of `kind` were recorded.
    pub fn count(&self, kind: OpKind) -> usize {
        self.totals(kind).count
    }

    /// Returns the total time spent in operations of `kind`.
    pub fn duration_of(&self, kind: OpKind) -> Duration {
        self.totals(kind).duration
    }

    /// Returns the most recent record, if any.
    pub fn last(&self) -> Option<&OpMetrics> {
        self.ops.back()
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "Engine: {} ops in {:.3}ms (add {} / {:.3}ms, transpose {} / {:.3}ms, multiply {} / {:.3}ms)",
            self.total_ops,
            self.total_duration.as_secs_f64() * 1000.0,
            self.count(OpKind::Add),
            self.duration_of(OpKind::Add).as_secs_f64() * 1000.0,
            self.count(OpKind::Transpose),
            self.duration_of(OpKind::Transpose).as_secs_f64() * 1000.0,
            self.count(OpKind::Multiply),
            self.duration_of(OpKind::Multiply).as_secs_f64() * 1000.0,
        )
    }
}
