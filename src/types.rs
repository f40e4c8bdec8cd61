// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Shared identifier and container types.

use rustc_hash::FxHashMap;

/// Dense zero-based user index.
pub type UserId = u32;

/// Dense zero-based item index.
pub type ItemId = u32;

/// Mapping from an entity index to the indices it interacted with.
///
/// An index absent from the map simply has no observed interactions;
/// that is a valid state, not an error.
pub type AdjacencyMap = FxHashMap<u32, Vec<u32>>;

/// Mapping from a (user, item) pair to the observed rating.
///
/// This is the single source of truth for "did this pair interact and
/// at what value"; sparse matrix views cannot distinguish a stored
/// zero from an absent entry.
pub type RatingLookup = FxHashMap<(UserId, ItemId), f32>;
