// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subscriber installation with a log file.
//!
//! Lives in its own test binary so the global subscriber is still unset.
//! Keep a single test here: the subscriber can be installed only once per
//! process.

use array_runtime::logging::init_tracing;
use array_runtime::RuntimeError;

#[test]
fn test_init_tracing_writes_log_file_once() {
    std::env::remove_var("RUST_LOG");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log").join("parray.log");

    init_tracing("info", Some(&path)).unwrap();
    tracing::info!(workers = 3, "engine log line");
    tracing::debug!("filtered out at info");

    assert!(path.exists());
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("engine log line"), "{content}");
    assert!(content.contains("workers=3"), "{content}");
    assert!(content.contains("logging.rs"), "{content}");
    assert!(!content.contains("filtered out"), "{content}");
    assert!(!content.contains('\x1b'), "{content}");

    // ── Second install ─────────────────────────────────────────
    let err = init_tracing("info", None).unwrap_err();
    assert!(matches!(err, RuntimeError::LoggingError(_)));
}
