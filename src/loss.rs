// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Mean squared prediction error over a rating mapping.

use rayon::prelude::*;

use crate::als::BiasedMf;
use crate::errors::{Error, Result};
use crate::types::RatingLookup;

/// Mean squared error of the model's predictions over `ratings`.
///
/// Works over any (user, item)→rating mapping whose indices fall
/// inside the model's dimensions, so the same call serves convergence
/// monitoring and test-set evaluation. An empty mapping is an error;
/// the mean over zero entries is undefined, not zero.
pub fn mse(ratings: &RatingLookup, model: &BiasedMf) -> Result<f64> {
    if ratings.is_empty() {
        return Err(Error::EmptyMapping);
    }
    let sse: f64 = ratings
        .par_iter()
        .map(|(&(user, item), &rating)| {
            let err = model.predict(user as usize, item as usize) as f64 - rating as f64;
            err * err
        })
        .sum();
    Ok(sse / ratings.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{arr1, arr2};

    fn unit_model() -> BiasedMf {
        BiasedMf {
            user_factors: arr2(&[[1.0f32], [0.0]]),
            item_factors: arr2(&[[1.0f32], [2.0]]),
            user_bias: arr1(&[0.0f32, 0.5]),
            item_bias: arr1(&[0.0f32, -0.5]),
            global_bias: 3.0,
        }
    }

    #[test]
    fn exact_predictions_have_zero_loss() {
        let model = unit_model();
        let mut ratings = RatingLookup::default();
        ratings.insert((0, 0), model.predict(0, 0));
        ratings.insert((1, 1), model.predict(1, 1));
        assert_abs_diff_eq!(mse(&ratings, &model).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn known_errors_average() {
        let model = unit_model();
        let mut ratings = RatingLookup::default();
        // predict(0, 0) = 1 + 0 + 0 + 3 = 4, error 1
        ratings.insert((0, 0), 3.0);
        // predict(1, 1) = 0 + 0.5 - 0.5 + 3 = 3, error 3
        ratings.insert((1, 1), 6.0);
        assert_abs_diff_eq!(mse(&ratings, &model).unwrap(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn loss_is_never_negative() {
        let model = unit_model();
        let mut ratings = RatingLookup::default();
        ratings.insert((0, 1), 1.0);
        ratings.insert((1, 0), 5.0);
        assert!(mse(&ratings, &model).unwrap() >= 0.0);
    }

    #[test]
    fn empty_mapping_is_an_error() {
        let model = unit_model();
        let ratings = RatingLookup::default();
        assert!(matches!(mse(&ratings, &model), Err(Error::EmptyMapping)));
    }
}
