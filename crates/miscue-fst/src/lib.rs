//! Prompt automaton engine.
//!
//! This crate builds the weighted transducer that a reading miscue model is
//! made of, and writes it out in OpenFst text format for `fstcompile`.
//!
//! # Architecture
//!
//! - [`homophones`] -- Homophone groups loaded from a side file
//! - [`graph`] -- States, arcs and final markers, with the homophone-aware
//!   determinism guard on arc insertion
//! - [`chain`] -- The prompt as a linear backbone of words through the graph
//! - [`text`] -- OpenFst text serialisation with per-state cost normalisation

pub mod chain;
pub mod graph;
pub mod homophones;
pub mod text;

use std::path::PathBuf;

pub use chain::{Word, WordChain};
pub use graph::{Accept, Arc, Entry, Graph, StateId};
pub use homophones::Homophones;

/// Error type for automaton construction.
#[derive(Debug, thiserror::Error)]
pub enum FstError {
    #[error("tried to get the current word but no words have been added yet")]
    UninitializedChain,
    #[error("prompt token {0:?} collides with a special symbol")]
    ReservedLabel(String),
    #[error("invalid word label {0:?}: labels must be non-empty and contain no whitespace")]
    InvalidLabel(String),
    #[error("state {0} is already final")]
    AlreadyFinal(StateId),
    #[error("failed to read homophone file {}: {source}", path.display())]
    HomophoneFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read homophones: {0}")]
    Io(#[from] std::io::Error),
}
