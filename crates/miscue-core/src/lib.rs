//! Shared types for reading miscue language models.
//!
//! This crate holds the vocabulary that the automaton engine (`miscue-fst`)
//! and the model builder (`miscue-lm`) agree on:
//!
//! - [`label`] -- Arc labels: prompt words and the fixed special symbols
//! - [`weights`] -- Miscue categories, the relative weight table and the
//!   conversion from relative weights to log-semiring costs

pub mod label;
pub mod weights;

pub use label::{Label, Special};
pub use weights::{Category, Weight, WeightTable};

/// Error type for an invalid weight table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("weight for {category} must not be negative, got {value}")]
    Negative { category: &'static str, value: f64 },
    #[error("weight for {category} must be a finite number")]
    NotFinite { category: &'static str },
    #[error("weight for correct must be greater than zero")]
    ZeroCorrect,
}
