// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # array-core
//!
//! Dense, row-major `f64` arrays with parallel arithmetic.
//!
//! This crate provides:
//! - [`Array`]: an owned n-dimensional array whose buffer length always
//!   matches its shape.
//! - [`Shape`]: dimension descriptors and shape validation.
//! - [`WorkerPool`]: the fixed set of workers operations fan out onto.
//! - Operations: element-wise add, transpose, and blocked matrix multiply.
//!
//! # Execution Model
//! Every operation is a single blocking fan-out/fan-in: operands are
//! validated, one output buffer is allocated, the buffer is split into
//! disjoint chunks (one per worker), and the call returns once every chunk
//! is written. Results are bit-identical for any worker count.
//!
//! # Example
//! ```
//! use array_core::{Array, BlockSize, WorkerPool};
//!
//! let pool = WorkerPool::new(2).unwrap();
//! let a = Array::new(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
//! let b = Array::identity(2);
//!
//! let c = a.multiply_with(&b, &pool, BlockSize::default()).unwrap();
//! assert_eq!(c, a);
//! ```

mod array;
mod error;
mod format;
pub mod ops;
mod parallel;
mod shape;

pub use array::Array;
pub use error::ArrayError;
pub use ops::{add, matmul, transpose, BlockSize, DEFAULT_BLOCK_BYTES};
pub use parallel::{available_workers, partition, WorkerPool};
pub use shape::Shape;
