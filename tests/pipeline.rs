// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! End-to-end pipeline: load a raw table, preprocess into persisted
//! index artifacts, and train from the artifact directory.

use biasmf::data::{preprocess, RatingTable};
use biasmf::{store, AlsConfig, Error};

fn raw_table() -> String {
    let mut csv = String::from("user_id,item_id,rating,timestamp\n");
    // 12 users rating overlapping slices of 8 (sparsely numbered) items
    for user in 1u64..=12 {
        for slot in 0..8u64 {
            if (user + slot) % 3 == 0 {
                continue;
            }
            let item = 100 + slot * 37;
            let rating = 1.0 + ((user + 2 * slot) % 9) as f64 / 2.0;
            csv.push_str(&format!("{},{},{:.1},2015-01-0{}\n", user, item, rating, 1 + slot));
        }
    }
    csv
}

#[test]
fn preprocess_then_train_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    let table = RatingTable::from_reader(raw_table().as_bytes()).unwrap();
    let n_ratings = table.ratings.len();
    assert_eq!(table.n_users, 12);
    assert_eq!(table.n_items, 8);

    let (train_idx, test_idx) = preprocess(table, 0.2, 3, dir.path()).unwrap();
    assert_eq!(train_idx.len() + test_idx.len(), n_ratings);

    let config = AlsConfig {
        factors: 3,
        reg: 2.0,
        epochs: 5,
        seed: 13,
    };
    let fit = biasmf::als::train_from_dir(dir.path(), &config).unwrap();

    assert_eq!(fit.train_loss.len(), 5);
    assert_eq!(fit.test_loss.len(), 5);
    assert!(fit.train_loss.iter().all(|l| l.is_finite() && *l >= 0.0));
    assert!(fit.test_loss.iter().all(|l| l.is_finite() && *l >= 0.0));
    assert!(*fit.train_loss.last().unwrap() <= fit.train_loss[0] + 1e-9);

    // user count is derived from the train split, item count from the
    // union of both splits
    let max_train_user = *train_idx.user_items.keys().max().unwrap() as usize;
    assert_eq!(fit.model.n_users(), max_train_user + 1);
    assert_eq!(fit.model.n_items(), 8);
    assert_eq!(fit.model.n_factors(), 3);
}

#[test]
fn snapshot_matrices_are_inspectable() {
    let dir = tempfile::tempdir().unwrap();
    let table = RatingTable::from_reader(raw_table().as_bytes()).unwrap();
    let (train_idx, _) = preprocess(table, 0.2, 3, dir.path()).unwrap();

    let matrix = store::load_matrix(dir.path(), "train").unwrap();
    assert_eq!(matrix.n_rows, 12);
    assert_eq!(matrix.n_cols, 8);
    assert_eq!(matrix.nnz(), train_idx.len());
    for (&(user, item), &rating) in &train_idx.lookup {
        assert_eq!(matrix.get(user as usize, item as usize), Some(rating));
    }
}

#[test]
fn training_from_an_empty_dir_reports_missing_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let res = biasmf::als::train_from_dir(dir.path(), &AlsConfig::default());
    assert!(matches!(res, Err(Error::MissingArtifact { .. })));
}
