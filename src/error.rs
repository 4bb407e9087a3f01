//! Error types for lookups that depend on user-visible data.
//!
//! Shape mismatches inside [`Tensor`](crate::Tensor) arithmetic are bugs and
//! panic. Asking for a word the vocabulary never saw, or for a token id past
//! the end of an embedding table, is a data problem and comes back as an
//! [`Error`].

use thiserror::Error;

/// Errors returned by vocabulary and model lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The word does not appear in the vocabulary.
    #[error("Unknown word: {0:?}")]
    UnknownWord(String),

    /// The token id is past the end of the vocabulary.
    #[error("Token id {id} out of range (vocab_size = {vocab_size})")]
    TokenOutOfRange {
        /// Requested id
        id: usize,
        /// Number of rows in the table
        vocab_size: usize,
    },
}

impl Error {
    /// Create a TokenOutOfRange error.
    pub fn token_out_of_range(id: usize, vocab_size: usize) -> Self {
        Self::TokenOutOfRange { id, vocab_size }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
