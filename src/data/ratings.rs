// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Loading and re-indexing raw rating tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::errors::Result;
use crate::types::{ItemId, UserId};

/// One row of the raw input table.
#[derive(Deserialize, Debug, Clone)]
pub struct RawRating {
    pub user_id: u64,
    pub item_id: u64,
    pub rating: f32,
    /// Dropped during re-indexing.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// A rating with dense re-indexed identifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub user: UserId,
    pub item: ItemId,
    pub value: f32,
}

/// A re-indexed rating table with its dense dimensions.
#[derive(Debug, Clone)]
pub struct RatingTable {
    pub ratings: Vec<Rating>,
    pub n_users: usize,
    pub n_items: usize,
}

impl RatingTable {
    /// Re-index a raw table: user ids (densely sequential from 1)
    /// shift to zero-based, sparse item ids map through a first-seen
    /// enumeration of their distinct values.
    pub fn from_records(records: impl IntoIterator<Item = RawRating>) -> Self {
        let mut item_ids: FxHashMap<u64, ItemId> = FxHashMap::default();
        let mut ratings = Vec::new();
        let mut n_users = 0;
        for rec in records {
            debug_assert!(rec.user_id >= 1, "raw user ids start at 1");
            let user = (rec.user_id - 1) as UserId;
            let next = item_ids.len() as ItemId;
            let item = *item_ids.entry(rec.item_id).or_insert(next);
            n_users = n_users.max(user as usize + 1);
            ratings.push(Rating {
                user,
                item,
                value: rec.rating,
            });
        }
        let n_items = item_ids.len();
        debug!(
            "re-indexed {} ratings from {} users over {} items",
            ratings.len(),
            n_users,
            n_items
        );
        RatingTable {
            ratings,
            n_users,
            n_items,
        }
    }

    /// Read a table with `user_id,item_id,rating,timestamp` columns.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv = csv::Reader::from_reader(reader);
        let mut records = Vec::new();
        for rec in csv.deserialize() {
            records.push(rec?);
        }
        Ok(Self::from_records(records))
    }

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        info!("loading rating table from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Shuffle with a seeded generator and split off a test fraction.
    /// Both halves share this table's id mapping and dimensions, so
    /// the item count covers items that only occur in the test half.
    pub fn split(mut self, test_fraction: f64, seed: u64) -> (RatingTable, RatingTable) {
        let mut rng = Pcg64::seed_from_u64(seed);
        self.ratings.shuffle(&mut rng);
        let cutoff = ((1.0 - test_fraction) * self.ratings.len() as f64) as usize;
        let test = self.ratings.split_off(cutoff);
        info!("split {} train / {} test ratings", cutoff, test.len());
        let test = RatingTable {
            ratings: test,
            n_users: self.n_users,
            n_items: self.n_items,
        };
        (self, test)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
user_id,item_id,rating,timestamp
1,903,5.0,2015-03-01
1,77,3.0,2015-03-02
2,903,4.0,2015-03-09
3,5000,2.0,2015-04-11
";

    #[test]
    fn reindexes_users_and_items() {
        let table = RatingTable::from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(table.n_users, 3);
        assert_eq!(table.n_items, 3);
        assert_eq!(
            table.ratings[0],
            Rating {
                user: 0,
                item: 0,
                value: 5.0
            }
        );
        // item 903 keeps the index from its first appearance
        assert_eq!(
            table.ratings[2],
            Rating {
                user: 1,
                item: 0,
                value: 4.0
            }
        );
        assert_eq!(
            table.ratings[3],
            Rating {
                user: 2,
                item: 2,
                value: 2.0
            }
        );
    }

    #[test]
    fn split_partitions_ratings() {
        let table = RatingTable::from_reader(TABLE.as_bytes()).unwrap();
        let (train, test) = table.split(0.25, 17);
        assert_eq!(train.ratings.len(), 3);
        assert_eq!(test.ratings.len(), 1);
        assert_eq!(train.n_items, 3);
        assert_eq!(test.n_items, 3);
    }

    #[test]
    fn split_is_deterministic_for_a_seed() {
        let table = RatingTable::from_reader(TABLE.as_bytes()).unwrap();
        let (a, _) = table.clone().split(0.25, 42);
        let (b, _) = table.split(0.25, 42);
        assert_eq!(a.ratings, b.ratings);
    }
}
