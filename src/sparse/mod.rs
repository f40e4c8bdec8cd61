// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Sparse matrix support.

mod coo;
mod csr;

pub use coo::{COOMatrix, COOMatrixBuilder};
pub use csr::CSRMatrix;
