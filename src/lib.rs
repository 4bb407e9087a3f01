//! Abacus: The Arithmetic Behind Neural Networks
//!
//! A small library of the numeric building blocks a transformer is made of,
//! written to be read and followed with a pencil. Every primitive lives here
//! exactly once; the numbered demos under `demos/` call it and print each
//! intermediate value.
//!
//! # Modules
//!
//! - [`tensor`] - Vectors, matrices, products in both orientations, softmax
//! - [`vocab`] - Word ↔ id mapping built from a tiny corpus
//! - [`digits`] - Recognizing drawn digits by template matching
//! - [`layers`] - ReLU, linear projections, layer norm, positional encoding,
//!   attention, feed-forward
//! - [`model`] - Configs, the next-word model, and a one-block toy transformer
//! - [`train`] - A single illustrative update step for the next-word model
//! - [`explain`] - Formatting helpers that write arithmetic out as text
//!
//! # Example
//!
//! ```rust
//! use abacus::{nudge, Config, NextWordModel, Vocabulary};
//!
//! let vocab = Vocabulary::from_corpus("the cat sat. the cat ate. the dog sat.");
//! let config = Config::next_word(vocab.len());
//! let mut model = NextWordModel::new(&config);
//!
//! let the = vocab.id("the")?;
//! let cat = vocab.id("cat")?;
//! let guess = model.forward(the)?;
//! println!("after 'the' the model guesses {:?}", vocab.word(guess.predicted_id));
//!
//! let report = nudge(&mut model, the, cat, config.learning_rate)?;
//! assert!(report.after.predicted_id < vocab.len());
//! # Ok::<(), abacus::Error>(())
//! ```

pub mod digits;
pub mod error;
pub mod explain;
pub mod layers;
pub mod model;
pub mod tensor;
pub mod train;
pub mod vocab;

// Re-export main types for convenience
pub use digits::{digit_template, TemplateBank};
pub use error::{Error, Result};
pub use model::{Config, Embedding, NextWordModel, Prediction, ToyTransformer};
pub use tensor::{dot, Tensor};
pub use train::{nudge, StepReport};
pub use vocab::Vocabulary;
