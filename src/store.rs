// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Persisting and reloading the derived index structures.
//!
//! Training resumes from four required artifacts: the two train-side
//! adjacency maps and one rating lookup per split. A CSR snapshot per
//! split is written alongside them for inspection but is never needed
//! to train.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use log::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::data::index::RatingIndex;
use crate::errors::{Error, Result};
use crate::sparse::CSRMatrix;
use crate::types::RatingLookup;

const USER_ITEMS: &str = "user_items.json";
const ITEM_USERS: &str = "item_users.json";

fn ratings_file(split: &str) -> String {
    format!("ratings-{}.json", split)
}

fn matrix_file(split: &str) -> String {
    format!("matrix-{}.json", split)
}

/// One rating in serialized form; tuple keys do not survive JSON.
#[derive(Serialize, Deserialize)]
struct RatingEntry {
    user: u32,
    item: u32,
    rating: f32,
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), value)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn require(path: PathBuf) -> Result<PathBuf> {
    if path.exists() {
        Ok(path)
    } else {
        Err(Error::MissingArtifact { path })
    }
}

fn save_lookup(path: &Path, lookup: &RatingLookup) -> Result<()> {
    let entries: Vec<RatingEntry> = lookup
        .iter()
        .map(|(&(user, item), &rating)| RatingEntry { user, item, rating })
        .collect();
    write_json(path, &entries)
}

fn load_lookup(path: &Path) -> Result<RatingLookup> {
    let entries: Vec<RatingEntry> = read_json(path)?;
    Ok(entries
        .into_iter()
        .map(|e| ((e.user, e.item), e.rating))
        .collect())
}

/// Persist the train adjacency maps, both rating lookups, and a CSR
/// snapshot per split under `dir`.
pub fn save_indexes(
    dir: &Path,
    train: &RatingIndex,
    test: &RatingIndex,
    n_users: usize,
    n_items: usize,
) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    write_json(&dir.join(USER_ITEMS), &train.user_items)?;
    write_json(&dir.join(ITEM_USERS), &train.item_users)?;
    save_lookup(&dir.join(ratings_file("train")), &train.lookup)?;
    save_lookup(&dir.join(ratings_file("test")), &test.lookup)?;
    write_json(
        &dir.join(matrix_file("train")),
        &train.to_csr(n_users, n_items),
    )?;
    write_json(
        &dir.join(matrix_file("test")),
        &test.to_csr(n_users, n_items),
    )?;
    info!("saved index artifacts to {}", dir.display());
    Ok(())
}

/// Reload the training index and held-out lookup from `dir`.
///
/// All four required artifacts are checked for existence before
/// anything is read; a missing one fails the whole load, since
/// partial state cannot safely resume training.
pub fn load_indexes(dir: &Path) -> Result<(RatingIndex, RatingLookup)> {
    let user_items_file = require(dir.join(USER_ITEMS))?;
    let item_users_file = require(dir.join(ITEM_USERS))?;
    let train_file = require(dir.join(ratings_file("train")))?;
    let test_file = require(dir.join(ratings_file("test")))?;

    let index = RatingIndex {
        user_items: read_json(&user_items_file)?,
        item_users: read_json(&item_users_file)?,
        lookup: load_lookup(&train_file)?,
    };
    let test_lookup = load_lookup(&test_file)?;
    debug!(
        "loaded {} train and {} test ratings from {}",
        index.len(),
        test_lookup.len(),
        dir.display()
    );
    Ok((index, test_lookup))
}

/// Load a persisted CSR snapshot for inspection.
pub fn load_matrix(dir: &Path, split: &str) -> Result<CSRMatrix> {
    let path = require(dir.join(matrix_file(split)))?;
    read_json(&path)
}
