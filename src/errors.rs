// This file is part of biasmf.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the training pipeline.
///
/// None of these are transient: each indicates a precondition
/// violation in the data or the configuration, so there are no
/// retries anywhere.
#[derive(Error, Debug)]
pub enum Error {
    /// A persisted index artifact required to resume training is
    /// absent. Partial state cannot safely resume a pipeline run.
    #[error("missing artifact {}", .path.display())]
    MissingArtifact { path: PathBuf },

    /// Loss was requested over a mapping with no entries.
    #[error("cannot compute loss over an empty rating mapping")]
    EmptyMapping,

    /// A per-row least-squares system could not be factored,
    /// typically from zero regularization combined with sparse data.
    #[error("linear system for {entity} {index} is singular")]
    SingularSystem { entity: &'static str, index: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rating table error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
