// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Compressed sparse row matrices.

use serde::{Deserialize, Serialize};

use super::COOMatrix;

/// A compressed sparse row matrix.
///
/// Entries not present are implicitly zero, which makes this view
/// unsuitable for interaction tests: a stored zero rating and an
/// absent pair look the same. It exists for persistence and
/// inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CSRMatrix {
    pub n_rows: usize,
    pub n_cols: usize,
    row_ptrs: Vec<usize>,
    col_inds: Vec<u32>,
    values: Vec<f32>,
}

impl CSRMatrix {
    /// Compress a coordinate matrix. Within-row order follows the
    /// coordinate entry order.
    pub fn from_coo(coo: &COOMatrix, n_rows: usize, n_cols: usize) -> Self {
        let nnz = coo.nnz();
        let mut row_ptrs = vec![0usize; n_rows + 1];
        for &r in &coo.row {
            debug_assert!((r as usize) < n_rows);
            row_ptrs[r as usize + 1] += 1;
        }
        for i in 0..n_rows {
            row_ptrs[i + 1] += row_ptrs[i];
        }

        let mut col_inds = vec![0u32; nnz];
        let mut values = vec![0.0f32; nnz];
        let mut next = row_ptrs.clone();
        for ((&r, &c), &v) in coo.row.iter().zip(&coo.col).zip(&coo.val) {
            let slot = next[r as usize];
            col_inds[slot] = c;
            values[slot] = v;
            next[r as usize] += 1;
        }

        CSRMatrix {
            n_rows,
            n_cols,
            row_ptrs,
            col_inds,
            values,
        }
    }

    /// Get the "length" (number of rows) in the matrix.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Get the number of observed values in the matrix.
    pub fn nnz(&self) -> usize {
        self.row_ptrs[self.n_rows]
    }

    /// Get the extent in the underlying arrays for a row in the matrix.
    pub fn extent(&self, row: usize) -> (usize, usize) {
        (self.row_ptrs[row], self.row_ptrs[row + 1])
    }

    /// Get the column indices for a row in the matrix.
    pub fn row_cols(&self, row: usize) -> &[u32] {
        let (start, end) = self.extent(row);
        &self.col_inds[start..end]
    }

    /// Get the values for a row in the matrix.
    pub fn row_vals(&self, row: usize) -> &[f32] {
        let (start, end) = self.extent(row);
        &self.values[start..end]
    }

    /// Look up a stored entry, if present.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        let (start, end) = self.extent(row);
        self.col_inds[start..end]
            .iter()
            .position(|&c| c as usize == col)
            .map(|pos| self.values[start + pos])
    }
}
