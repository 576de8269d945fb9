// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Parallel array operations.
//!
//! Each operation validates its operands up front, allocates one fresh
//! output buffer, and fans the work out over a [`crate::WorkerPool`].
//! Inputs are only ever borrowed immutably.

mod add_op;
mod matmul_op;
mod transpose_op;

pub use add_op::add;
pub use matmul_op::{matmul, BlockSize, DEFAULT_BLOCK_BYTES};
pub use transpose_op::transpose;
