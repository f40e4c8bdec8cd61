// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Alternating least squares with bias terms for explicit ratings.

mod explicit;
mod solve;

pub use solve::SolveError;

use std::path::Path;
use std::time::Instant;

use log::*;
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_pcg::Pcg64;

use crate::data::index::{dimensions, RatingIndex};
use crate::errors::{Error, Result};
use crate::loss;
use crate::store;
use crate::types::RatingLookup;
use explicit::Side;

/// Hyperparameters for one ALS training run.
#[derive(Debug, Clone)]
pub struct AlsConfig {
    /// Latent dimensionality K.
    pub factors: usize,
    /// Ridge regularization weight added to each per-row system.
    pub reg: f32,
    /// Number of full user+item epochs.
    pub epochs: usize,
    /// Seed for factor initialization.
    pub seed: u64,
}

impl Default for AlsConfig {
    fn default() -> Self {
        AlsConfig {
            factors: 10,
            reg: 20.0,
            epochs: 25,
            seed: 42,
        }
    }
}

/// A biased matrix-factorization model.
#[derive(Debug, Clone)]
pub struct BiasedMf {
    /// User factor matrix W, N×K.
    pub user_factors: Array2<f32>,
    /// Item factor matrix U, M×K.
    pub item_factors: Array2<f32>,
    /// User bias vector b.
    pub user_bias: Array1<f32>,
    /// Item bias vector c.
    pub item_bias: Array1<f32>,
    /// Mean of the training ratings, constant for a run.
    pub global_bias: f32,
}

impl BiasedMf {
    /// Factors drawn from a seeded standard normal, biases zero.
    fn init(n_users: usize, n_items: usize, factors: usize, global_bias: f32, seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let user_factors =
            Array2::from_shape_simple_fn((n_users, factors), || rng.sample(StandardNormal));
        let item_factors =
            Array2::from_shape_simple_fn((n_items, factors), || rng.sample(StandardNormal));
        BiasedMf {
            user_factors,
            item_factors,
            user_bias: Array1::zeros(n_users),
            item_bias: Array1::zeros(n_items),
            global_bias,
        }
    }

    pub fn n_users(&self) -> usize {
        self.user_factors.nrows()
    }

    pub fn n_items(&self) -> usize {
        self.item_factors.nrows()
    }

    pub fn n_factors(&self) -> usize {
        self.user_factors.ncols()
    }

    /// Predicted rating for a (user, item) pair.
    pub fn predict(&self, user: usize, item: usize) -> f32 {
        self.user_factors.row(user).dot(&self.item_factors.row(item))
            + self.user_bias[user]
            + self.item_bias[item]
            + self.global_bias
    }
}

/// Outcome of a training run: the final parameters plus one train and
/// one held-out loss value per epoch.
#[derive(Debug, Clone)]
pub struct FitResult {
    pub model: BiasedMf,
    pub train_loss: Vec<f64>,
    pub test_loss: Vec<f64>,
}

/// Train a biased MF model on a training index, monitoring held-out
/// loss against `test` after every epoch.
///
/// Each epoch runs the user half-step, then the item half-step using
/// the user values just written, then records both losses. Runs for
/// the configured epoch count with no early stopping; inspect the
/// loss histories afterwards.
pub fn train(train: &RatingIndex, test: &RatingLookup, config: &AlsConfig) -> Result<FitResult> {
    if train.is_empty() {
        return Err(Error::EmptyMapping);
    }
    let (n_users, n_items) = dimensions(train, test);
    let global_bias = train.mean_rating();
    info!(
        "training K={} model over {} users and {} items (mu={:.4})",
        config.factors, n_users, n_items, global_bias
    );

    let mut model = BiasedMf::init(n_users, n_items, config.factors, global_bias, config.seed);
    let mut train_loss = Vec::with_capacity(config.epochs);
    let mut test_loss = Vec::with_capacity(config.epochs);

    for epoch in 0..config.epochs {
        let start = Instant::now();
        let du = explicit::half_step(
            &mut model.user_factors,
            &mut model.user_bias,
            &model.item_factors,
            &model.item_bias,
            global_bias,
            &train.user_items,
            &train.lookup,
            config.reg,
            Side::User,
        )?;
        let di = explicit::half_step(
            &mut model.item_factors,
            &mut model.item_bias,
            &model.user_factors,
            &model.user_bias,
            global_bias,
            &train.item_users,
            &train.lookup,
            config.reg,
            Side::Item,
        )?;
        debug!(
            "epoch {}: factor deltas {:.4}/{:.4} in {:.2?}",
            epoch,
            du,
            di,
            start.elapsed()
        );

        train_loss.push(loss::mse(&train.lookup, &model)?);
        test_loss.push(loss::mse(test, &model)?);
        info!(
            "epoch {}: train loss {:.6}, test loss {:.6}",
            epoch, train_loss[epoch], test_loss[epoch]
        );
    }

    Ok(FitResult {
        model,
        train_loss,
        test_loss,
    })
}

/// Load persisted index artifacts from `data_dir` and train on them.
pub fn train_from_dir(data_dir: &Path, config: &AlsConfig) -> Result<FitResult> {
    let (train_index, test_lookup) = store::load_indexes(data_dir)?;
    train(&train_index, &test_lookup, config)
}
