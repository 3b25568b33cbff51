//! Reading miscue tolerant language models.
//!
//! Given a tokenised prompt, [`PromptLm::build`] produces a weighted
//! transducer that accepts the prompt read correctly as well as common
//! reading errors: noise insertions, skipped words, repeated words and,
//! when enabled, longer jumps and premature ends. Each miscue path is tagged
//! with a relative weight from the [`WeightTable`](miscue_core::WeightTable).
//!
//! # Architecture
//!
//! - [`config`] -- `LmConfig`: weights, enabled extensions, TOML loading
//! - [`recipes`] -- `PathRecipe` trait, one recipe per miscue category, and
//!   the ordered `RecipeSet` that runs them
//! - [`builder`] -- `PromptLm`: the construction entry point

pub mod builder;
pub mod config;
pub mod recipes;

use std::path::PathBuf;

use miscue_core::{Category, WeightError};
use miscue_fst::FstError;

pub use builder::PromptLm;
pub use config::LmConfig;
pub use recipes::{PathRecipe, RecipeSet};

/// Error type for miscue model construction.
#[derive(Debug, thiserror::Error)]
pub enum LmError {
    #[error(transparent)]
    Fst(#[from] FstError),
    #[error("invalid weights: {0}")]
    Weights(#[from] WeightError),
    #[error("no path recipe is available for category {0}")]
    UnsupportedCategory(Category),
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("failed to read configuration {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        source: std::io::Error,
    },
}
