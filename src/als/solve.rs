// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Dense symmetric positive-definite solves for ALS half-steps.

use nalgebra::{Cholesky, DMatrix, DVector};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolveError {
    /// The system matrix is not positive-definite. With a positive
    /// regularization weight this cannot happen; it indicates a
    /// singular system from zero regularization and sparse data.
    #[error("matrix is not positive definite")]
    NotPositive,
}

/// Solve `A x = v` for symmetric positive-definite `A` by Cholesky
/// factorization. Consumes the matrix; the factorization overwrites
/// it.
pub fn solve_spd(matrix: DMatrix<f32>, vector: &DVector<f32>) -> Result<DVector<f32>, SolveError> {
    debug_assert_eq!(matrix.nrows(), matrix.ncols());
    debug_assert_eq!(vector.len(), matrix.nrows());
    let chol = Cholesky::new(matrix).ok_or(SolveError::NotPositive)?;
    Ok(chol.solve(vector))
}
