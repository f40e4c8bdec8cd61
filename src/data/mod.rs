// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Rating tables and the index structures derived from them.

pub mod index;
pub mod ratings;

pub use index::{dimensions, RatingIndex};
pub use ratings::{Rating, RatingTable, RawRating};

use std::path::Path;

use crate::errors::Result;
use crate::store;

/// Split a rating table, build the index structures for both splits,
/// and persist them under `dir` for later training runs.
pub fn preprocess(
    table: RatingTable,
    test_fraction: f64,
    seed: u64,
    dir: &Path,
) -> Result<(RatingIndex, RatingIndex)> {
    let n_users = table.n_users;
    let n_items = table.n_items;
    let (train, test) = table.split(test_fraction, seed);
    let train_idx = RatingIndex::from_ratings(&train.ratings);
    let test_idx = RatingIndex::from_ratings(&test.ratings);
    store::save_indexes(dir, &train_idx, &test_idx, n_users, n_items)?;
    Ok((train_idx, test_idx))
}
