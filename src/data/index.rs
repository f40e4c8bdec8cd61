// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Building adjacency and lookup indexes from a rating table.

use log::*;

use crate::data::ratings::Rating;
use crate::sparse::{COOMatrix, COOMatrixBuilder, CSRMatrix};
use crate::types::{AdjacencyMap, RatingLookup};

/// The three index structures derived from one split of the rating
/// table. Built once per split and treated as immutable afterwards;
/// the trainer borrows them read-only for the whole run.
#[derive(Debug, Clone, Default)]
pub struct RatingIndex {
    /// User index to the items that user rated.
    pub user_items: AdjacencyMap,
    /// Item index to the users who rated it. Items with no ratings
    /// are absent, which is an expected state.
    pub item_users: AdjacencyMap,
    /// (user, item) to rating; the source of truth for interactions.
    pub lookup: RatingLookup,
}

impl RatingIndex {
    /// Build all three structures in one pass. A duplicate
    /// (user, item) pair resolves last-write-wins in the lookup.
    pub fn from_ratings(ratings: &[Rating]) -> Self {
        let mut idx = RatingIndex::default();
        for r in ratings {
            idx.user_items.entry(r.user).or_default().push(r.item);
            idx.item_users.entry(r.item).or_default().push(r.user);
            idx.lookup.insert((r.user, r.item), r.value);
        }
        debug!(
            "indexed {} ratings for {} users and {} items",
            idx.lookup.len(),
            idx.user_items.len(),
            idx.item_users.len()
        );
        idx
    }

    /// Number of observed ratings.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Mean of the observed ratings, the model's global bias.
    pub fn mean_rating(&self) -> f32 {
        let sum: f64 = self.lookup.values().map(|v| *v as f64).sum();
        (sum / self.lookup.len() as f64) as f32
    }

    /// Coordinate view of the ratings, for persistence and inspection
    /// only. The trainer never consults this view: a stored zero is
    /// indistinguishable from an absent entry here.
    pub fn to_coo(&self) -> COOMatrix {
        let mut bld = COOMatrixBuilder::with_capacity(self.lookup.len());
        for (&(user, item), &value) in &self.lookup {
            bld.add_entry(user, item, value);
        }
        bld.finish()
    }

    /// Compressed view of the ratings, rows indexed by user.
    pub fn to_csr(&self, n_users: usize, n_items: usize) -> CSRMatrix {
        self.to_coo().to_csr(n_users, n_items)
    }
}

/// Derive the dense dimensions for a (train, test) split.
///
/// The test lookup may reference items with no training ratings, so
/// the item count comes from the union of both splits; every test
/// item index must land inside `[0, M)`.
pub fn dimensions(train: &RatingIndex, test: &RatingLookup) -> (usize, usize) {
    let n = train
        .user_items
        .keys()
        .map(|&u| u as usize + 1)
        .max()
        .unwrap_or(0);
    let m_train = train.item_users.keys().copied().max();
    let m_test = test.keys().map(|&(_, j)| j).max();
    let m = m_train
        .into_iter()
        .chain(m_test)
        .max()
        .map(|m| m as usize + 1)
        .unwrap_or(0);
    debug!("dimensions: {} users, {} items", n, m);
    (n, m)
}
