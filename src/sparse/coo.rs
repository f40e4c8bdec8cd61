// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Sparse coordinate arrays.

use serde::{Deserialize, Serialize};

use super::CSRMatrix;

/// A sparse matrix in coordinate form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct COOMatrix {
    pub row: Vec<u32>,
    pub col: Vec<u32>,
    pub val: Vec<f32>,
}

pub struct COOMatrixBuilder {
    row: Vec<u32>,
    col: Vec<u32>,
    val: Vec<f32>,
}

impl COOMatrixBuilder {
    /// Initialize a builder with a specified capacity.
    pub fn with_capacity(cap: usize) -> Self {
        COOMatrixBuilder {
            row: Vec::with_capacity(cap),
            col: Vec::with_capacity(cap),
            val: Vec::with_capacity(cap),
        }
    }

    pub fn add_entry(&mut self, row: u32, col: u32, val: f32) {
        self.row.push(row);
        self.col.push(col);
        self.val.push(val);
    }

    /// Build the final COO matrix from this builder.
    pub fn finish(self) -> COOMatrix {
        COOMatrix {
            row: self.row,
            col: self.col,
            val: self.val,
        }
    }
}

impl COOMatrix {
    /// Get the number of observed values in the matrix.
    pub fn nnz(&self) -> usize {
        self.val.len()
    }

    /// Compress into row-major CSR form.
    pub fn to_csr(&self, n_rows: usize, n_cols: usize) -> CSRMatrix {
        CSRMatrix::from_coo(self, n_rows, n_cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_entries() {
        let mut bld = COOMatrixBuilder::with_capacity(2);
        bld.add_entry(0, 3, 2.5);
        bld.add_entry(1, 0, 4.0);
        let coo = bld.finish();
        assert_eq!(coo.nnz(), 2);
        assert_eq!(coo.row, vec![0, 1]);
        assert_eq!(coo.col, vec![3, 0]);
        assert_eq!(coo.val, vec![2.5, 4.0]);
    }
}
