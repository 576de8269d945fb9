// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Debug rendering for arrays.

use crate::Array;
use std::fmt;

impl Array {
    /// Renders the shape line, e.g. `Shape: [2, 2]`.
    pub fn format_shape(&self) -> String {
        format!("Shape: {}", self.shape())
    }

    /// Renders the flat buffer, e.g. `Data: [1.0, 2.0]`.
    pub fn format_data(&self) -> String {
        format!("Data: {:?}", self.as_slice())
    }

    /// Renders the values row by row, `decimal_places` digits each.
    ///
    /// A row is the last dimension; rows are separated by newlines and
    /// values within a row by a single space. A scalar renders as one
    /// value, an empty array as an empty string.
    ///
    /// ```
    /// use array_core::Array;
    /// let a = Array::new(vec![1.0, 2.5, 3.0, 4.0], &[2, 2]).unwrap();
    /// assert_eq!(a.format_matrix(1), "1.0 2.5\n3.0 4.0");
    /// ```
    pub fn format_matrix(&self, decimal_places: usize) -> String {
        let data = self.as_slice();
        if data.is_empty() {
            return String::new();
        }
        let row_len = self.shape().dims().last().copied().unwrap_or(1);
        data.chunks(row_len)
            .map(|row| {
                row.iter()
                    .map(|v| format!("{v:.decimal_places$}"))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prints [`Array::format_shape`] to stdout.
    pub fn print_shape(&self) {
        println!("{}", self.format_shape());
    }

    /// Prints [`Array::format_data`] to stdout.
    pub fn print_data(&self) {
        println!("{}", self.format_data());
    }

    /// Prints [`Array::format_matrix`] to stdout.
    pub fn print_formatted(&self, decimal_places: usize) {
        println!("{}", self.format_matrix(decimal_places));
    }
}

/// Formats as [`Array::format_matrix`]; the precision defaults to 4 and can
/// be overridden with `{:.N}`.
impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_matrix(f.precision().unwrap_or(4)))
    }
}
