// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Parallel half-step updates for explicit-feedback ALS.

use log::*;
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayViewMut1, Axis};
use rayon::prelude::*;

use crate::als::solve::solve_spd;
use crate::errors::Error;
use crate::types::{AdjacencyMap, RatingLookup};

/// Which side of the factorization a half-step updates. The sides
/// share one update rule but differ in lookup key order and in how an
/// entity with no observations is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Side {
    User,
    Item,
}

impl Side {
    fn key(self, this: u32, other: u32) -> (u32, u32) {
        match self {
            Side::User => (this, other),
            Side::Item => (other, this),
        }
    }

    fn entity(self) -> &'static str {
        match self {
            Side::User => "user",
            Side::Item => "item",
        }
    }
}

/// Run one half-step: re-solve every row of `this` (and its bias)
/// against the fixed `other` side. Rows are independent, so they are
/// updated in parallel; each worker writes a disjoint row and bias
/// slot, and the parallel join is the barrier the next half-step
/// requires.
///
/// Returns the root of the summed squared factor-row changes, a
/// convergence diagnostic.
pub(super) fn half_step(
    this: &mut Array2<f32>,
    this_bias: &mut Array1<f32>,
    other: &Array2<f32>,
    other_bias: &Array1<f32>,
    global_bias: f32,
    adjacency: &AdjacencyMap,
    lookup: &RatingLookup,
    reg: f32,
    side: Side,
) -> Result<f32, Error> {
    debug!(
        "beginning {} half-step over {} rows",
        side.entity(),
        this.nrows()
    );
    let frob: f32 = this
        .outer_iter_mut()
        .into_par_iter()
        .zip(this_bias.axis_iter_mut(Axis(0)).into_par_iter())
        .enumerate()
        .map(|(i, (row, bias))| {
            let bias = bias.into_scalar();
            update_row(
                i,
                row,
                bias,
                other,
                other_bias,
                global_bias,
                adjacency,
                lookup,
                reg,
                side,
            )
        })
        .try_reduce(|| 0.0, |a, b| Ok(a + b))?;
    Ok(frob.sqrt())
}

/// Closed-form ridge update of a single factor row and its bias.
fn update_row(
    i: usize,
    mut row: ArrayViewMut1<f32>,
    bias: &mut f32,
    other: &Array2<f32>,
    other_bias: &Array1<f32>,
    global_bias: f32,
    adjacency: &AdjacencyMap,
    lookup: &RatingLookup,
    reg: f32,
    side: Side,
) -> Result<f32, Error> {
    let neighbors = adjacency.get(&(i as u32)).map(Vec::as_slice).unwrap_or(&[]);
    if neighbors.is_empty() {
        return Ok(match side {
            // a user with no ratings collapses to the
            // regularization-only solution: zero factors, zero bias
            Side::User => {
                let delta = row.dot(&row);
                row.fill(0.0);
                *bias = 0.0;
                delta
            }
            // no signal to update an unrated item; it keeps its
            // current factors and bias this epoch
            Side::Item => 0.0,
        });
    }

    let k = row.len();
    let picked_rows: Vec<usize> = neighbors.iter().map(|&j| j as usize).collect();
    let picked = other.select(Axis(0), &picked_rows);

    // residuals with this row's factor contribution left out
    let resid: Array1<f32> = neighbors
        .iter()
        .map(|&j| {
            let r = lookup[&side.key(i as u32, j)];
            r - *bias - other_bias[j as usize] - global_bias
        })
        .collect();

    let pt = picked.t();
    let mut ata = pt.dot(&picked);
    for d in 0..k {
        ata[[d, d]] += reg;
    }
    let atv = pt.dot(&resid);

    let a = DMatrix::from_fn(k, k, |p, q| ata[[p, q]]);
    let v = DVector::from_iterator(k, atv.iter().copied());
    let soln = solve_spd(a, &v).map_err(|_| Error::SingularSystem {
        entity: side.entity(),
        index: i,
    })?;
    let soln = Array1::from_iter(soln.iter().copied());

    // the bias residual uses the freshly solved factors
    let mut bias_sum = 0.0f32;
    for (pos, &j) in neighbors.iter().enumerate() {
        let r = lookup[&side.key(i as u32, j)];
        bias_sum += r - soln.dot(&picked.row(pos)) - other_bias[j as usize] - global_bias;
    }
    let new_bias = bias_sum / (neighbors.len() as f32 + reg);

    let change = &soln - &row;
    let delta = change.dot(&change);
    row.assign(&soln);
    *bias = new_bias;
    Ok(delta)
}
