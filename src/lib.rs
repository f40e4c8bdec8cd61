// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Biased matrix factorization trained with alternating least squares.
//!
//! The crate models explicit ratings as `W[i]·U[j] + b[i] + c[j] + μ`:
//! latent factor rows for the user and item, a bias scalar for each,
//! and the global mean rating. Training alternates closed-form ridge
//! solves for the user rows and the item rows, one full pass per
//! epoch, recording training and held-out mean squared error after
//! each epoch.
//!
//! The pipeline is: load a raw rating table ([`data::RatingTable`]),
//! split it, build adjacency and lookup indexes
//! ([`data::RatingIndex`]), optionally persist them ([`store`]), and
//! train ([`als::train`]).

pub mod als;
pub mod data;
mod errors;
pub mod loss;
pub mod sparse;
pub mod store;
pub mod types;

pub use als::{train, AlsConfig, BiasedMf, FitResult};
pub use errors::{Error, Result};
