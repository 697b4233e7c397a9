//! Error types shared by the normalizer, clustering engine, automaton builder
//! and scoring engine.

use thiserror::Error;

/// Errors raised at the public entry points of the library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Wrong shape or type of a sequence, step, or configuration value
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No sequences were supplied at all
    #[error("No sequence was supplied")]
    EmptyInput,

    /// A state id that does not belong to the automaton
    #[error("Unknown state id: {0}")]
    UnknownState(usize),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
