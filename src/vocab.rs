//! Word-Level Vocabulary
//!
//! Before a model can do arithmetic on text, every word needs a number. This
//! module builds the smallest possible tokenizer: split a corpus into words,
//! sort the unique ones, and number them from zero.
//!
//! ## Building the Mapping
//!
//! ```text
//! "the cat sat. the cat ate. the dog sat."
//!     ↓ drop "."
//! the cat sat the cat ate the dog sat
//!     ↓ split on whitespace, keep unique, sort
//! ["ate", "cat", "dog", "sat", "the"]
//!     ↓ number them
//! ate=0  cat=1  dog=2  sat=3  the=4
//! ```
//!
//! The mapping is a bijection: [`Vocabulary::id`] and [`Vocabulary::word`]
//! undo each other.
//!
//! ## Example
//!
//! ```rust
//! use abacus::Vocabulary;
//!
//! let vocab = Vocabulary::from_corpus("the cat sat. the cat ate. the dog sat.");
//! assert_eq!(vocab.len(), 5);
//! assert_eq!(vocab.id("cat").unwrap(), 1);
//! assert_eq!(vocab.word(1), Some("cat"));
//! ```

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Bijection between words and integer ids
#[derive(Clone, Debug)]
pub struct Vocabulary {
    words: Vec<String>,
    ids: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from raw text
    ///
    /// Periods are removed, the text is split on whitespace, and the unique
    /// words are sorted so ids are stable across runs.
    pub fn from_corpus(text: &str) -> Self {
        let cleaned = text.replace('.', "");
        let mut words: Vec<String> = cleaned.split_whitespace().map(str::to_string).collect();
        words.sort();
        words.dedup();
        Self::from_words(words)
    }

    /// Build a vocabulary from an already-sorted, duplicate-free word list
    fn from_words(words: Vec<String>) -> Self {
        let ids = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();
        Self { words, ids }
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when the corpus had no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Id of a word
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownWord`] if the word was not in the corpus.
    pub fn id(&self, word: &str) -> Result<usize> {
        self.ids
            .get(word)
            .copied()
            .ok_or_else(|| Error::UnknownWord(word.to_string()))
    }

    /// Word for an id, if the id is in range
    pub fn word(&self, id: usize) -> Option<&str> {
        self.words.get(id).map(String::as_str)
    }

    /// All words in id order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Encode a sentence (periods ignored) into ids
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownWord`] for the first word not in the vocabulary.
    pub fn encode(&self, text: &str) -> Result<Vec<usize>> {
        text.replace('.', "")
            .split_whitespace()
            .map(|w| self.id(w))
            .collect()
    }

    /// Decode ids back into a space-separated sentence
    ///
    /// Out-of-range ids are rendered as `<id>`.
    pub fn decode(&self, ids: &[usize]) -> String {
        ids.iter()
            .map(|&id| match self.word(id) {
                Some(w) => w.to_string(),
                None => format!("<{}>", id),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
