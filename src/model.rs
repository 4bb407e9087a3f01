//! Toy Language Models
//!
//! Two miniature models built from the layers in [`crate::layers`]:
//!
//! - **NextWordModel**: embedding → hidden ReLU layer → output logits. One
//!   word in, one guess out. Small enough to print every number, and the
//!   model the training nudge in [`crate::train`] updates.
//! - **ToyTransformer**: the same idea with the pieces of a real transformer
//!   block in between, producing a guess for every position at once.
//!
//! ## NextWordModel
//!
//! ```text
//! word id
//!     ↓ embedding lookup            vector  [vector_size]
//!     ↓ @ hidden_weights, ReLU      hidden  [hidden_size]
//!     ↓ @ output_weights            logits  [vocab_size]
//!     ↓ argmax                      predicted id
//! ```
//!
//! ## ToyTransformer
//!
//! ```text
//! Input ids [seq_len]
//!     ↓
//! Embedding lookup [seq_len, d_model]
//!     ↓
//! Rotary position encoding
//!     ↓
//! x = x + MultiHeadAttention(x)   (causal)
//!     ↓
//! x = x + FeedForward(x)
//!     ↓
//! Linear → logits [seq_len, vocab_size]
//! ```
//!
//! Every row of the output is that position's guess for the word after it.
//!
//! ## Example
//!
//! ```rust
//! use abacus::{Config, NextWordModel, Vocabulary};
//!
//! let vocab = Vocabulary::from_corpus("the cat sat. the cat ate. the dog sat.");
//! let model = NextWordModel::new(&Config::next_word(vocab.len()));
//! let prediction = model.forward(vocab.id("the")?)?;
//! assert!(prediction.predicted_id < vocab.len());
//! # Ok::<(), abacus::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::layers::{randn, relu, FeedForward, Linear, MultiHeadAttention, Rope};
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Model configuration
///
/// Every shape of the toy models in one place. Variants of a demo are
/// different `Config` values, not different code paths.
///
/// # Fields
///
/// - `vocab_size`: Number of words in the vocabulary
/// - `vector_size`: Embedding dimension (d_model for the transformer)
/// - `hidden_size`: Width of the hidden / feed-forward layer
/// - `n_heads`: Attention heads (transformer only)
/// - `rope_base`: Base of the rotary frequencies (transformer only)
/// - `learning_rate`: Step size of the training nudge
/// - `seed`: Seed for weight initialization
///
/// [`NextWordModel`] reads `vocab_size`, `vector_size`, `hidden_size` and
/// `seed`; the nudge takes `learning_rate` from the caller. [`ToyTransformer`]
/// reads everything except `learning_rate`. The presets still fill every
/// field so one serialized config describes either model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub vocab_size: usize,
    pub vector_size: usize,
    pub hidden_size: usize,
    pub n_heads: usize,
    pub rope_base: f32,
    pub learning_rate: f32,
    pub seed: u64,
}

impl Config {
    /// The one-word-in, one-word-out model
    ///
    /// 4-dimensional embeddings, 8 hidden units, learning rate 0.1.
    pub fn next_word(vocab_size: usize) -> Self {
        Self {
            vocab_size,
            vector_size: 4,
            hidden_size: 8,
            n_heads: 1,
            rope_base: 10_000.0,
            learning_rate: 0.1,
            seed: 42,
        }
    }

    /// The single-block transformer
    ///
    /// 8-dimensional model, 2 heads of width 4, feed-forward width 16.
    pub fn toy_transformer(vocab_size: usize) -> Self {
        Self {
            vocab_size,
            vector_size: 8,
            hidden_size: 16,
            n_heads: 2,
            rope_base: 10_000.0,
            learning_rate: 0.1,
            seed: 42,
        }
    }

    /// Same shapes, different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

//
// ============================================================================
// EMBEDDING LAYER
// ============================================================================
//

/// Token embedding layer
///
/// A learnable lookup table: row `id` is the vector for word `id`.
///
/// ```text
/// Input:  [seq_len]            (token ids)
/// Output: [seq_len, dim]       (embedding vectors)
/// ```
#[derive(Clone, Debug)]
pub struct Embedding {
    /// Embedding weight matrix: [vocab_size, dim]
    pub weight: Tensor,
}

impl Embedding {
    /// Create an embedding table with N(0, 1) entries
    pub fn random(vocab_size: usize, dim: usize, rng: &mut StdRng) -> Self {
        Self {
            weight: randn(vocab_size, dim, rng),
        }
    }

    /// Number of rows in the table
    pub fn vocab_size(&self) -> usize {
        self.weight.shape[0]
    }

    fn check(&self, id: usize) -> Result<()> {
        if id < self.vocab_size() {
            Ok(())
        } else {
            Err(Error::token_out_of_range(id, self.vocab_size()))
        }
    }

    /// Vector for one token id
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenOutOfRange`] if `id` is past the end of the table.
    pub fn lookup(&self, id: usize) -> Result<Tensor> {
        self.check(id)?;
        Ok(self.weight.row(id))
    }

    /// Mutable access to one row, for in-place updates
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenOutOfRange`] if `id` is past the end of the table.
    pub fn row_mut(&mut self, id: usize) -> Result<&mut [f32]> {
        self.check(id)?;
        Ok(self.weight.row_slice_mut(id))
    }

    /// Look up a whole sequence: `[seq_len] → [seq_len, dim]`
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenOutOfRange`] for the first id past the end.
    pub fn forward(&self, ids: &[usize]) -> Result<Tensor> {
        let dim = self.weight.shape[1];
        let mut output = Vec::with_capacity(ids.len() * dim);
        for &id in ids {
            self.check(id)?;
            output.extend_from_slice(self.weight.row_slice(id));
        }
        Ok(Tensor::new(output, vec![ids.len(), dim]))
    }
}

//
// ============================================================================
// NEXT-WORD MODEL
// ============================================================================
//

/// Everything the next-word model computed for one input word
#[derive(Clone, Debug)]
pub struct Prediction {
    /// Embedding of the input word
    pub vector: Tensor,
    /// Hidden features `relu(vector @ hidden_weights)`
    pub hidden: Tensor,
    /// Raw scores, one per vocabulary word
    pub logits: Tensor,
    /// Index of the largest logit
    pub predicted_id: usize,
}

/// Embedding → hidden ReLU layer → output logits
#[derive(Clone, Debug)]
pub struct NextWordModel {
    /// Embeddings: [vocab_size, vector_size]
    pub embeddings: Embedding,
    /// Hidden layer: [vector_size, hidden_size]
    pub hidden: Linear,
    /// Output layer: [hidden_size, vocab_size], one column per word
    pub output: Linear,
}

impl NextWordModel {
    /// Create a model with N(0, 1) parameters drawn from `config.seed`
    pub fn new(config: &Config) -> Self {
        let mut rng = config.rng();
        let embeddings = Embedding::random(config.vocab_size, config.vector_size, &mut rng);
        let hidden = Linear::random(config.vector_size, config.hidden_size, &mut rng);
        let output = Linear::random(config.hidden_size, config.vocab_size, &mut rng);
        Self {
            embeddings,
            hidden,
            output,
        }
    }

    /// Build a model from hand-written parameter matrices
    ///
    /// # Panics
    ///
    /// Panics if the shapes do not chain:
    /// `[vocab, vector] → [vector, hidden] → [hidden, vocab]`.
    pub fn from_parts(embeddings: Tensor, hidden: Tensor, output: Tensor) -> Self {
        assert!(
            embeddings.shape.len() == 2
                && embeddings.shape[1] == hidden.shape[0]
                && hidden.shape[1] == output.shape[0]
                && output.shape[1] == embeddings.shape[0],
            "Parameter shapes do not chain: {:?} → {:?} → {:?}",
            embeddings.shape,
            hidden.shape,
            output.shape
        );
        Self {
            embeddings: Embedding { weight: embeddings },
            hidden: Linear::from_weight(hidden),
            output: Linear::from_weight(output),
        }
    }

    /// Vocabulary size the model scores over
    pub fn vocab_size(&self) -> usize {
        self.output.out_features()
    }

    /// Forward pass for one input word
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenOutOfRange`] if `input_id` is not a vocabulary id.
    pub fn forward(&self, input_id: usize) -> Result<Prediction> {
        let vector = self.embeddings.lookup(input_id)?;
        let hidden = relu(&self.hidden.forward(&vector));
        let logits = self.output.forward(&hidden);
        let predicted_id = logits.argmax();

        debug!(input_id, predicted_id, "next-word forward pass");

        Ok(Prediction {
            vector,
            hidden,
            logits,
            predicted_id,
        })
    }

    /// Total number of trainable parameters
    pub fn count_parameters(&self) -> usize {
        self.embeddings.weight.data.len()
            + self.hidden.weight.data.len()
            + self.output.weight.data.len()
    }
}

//
// ============================================================================
// TOY TRANSFORMER
// ============================================================================
//

/// One transformer block between an embedding table and a vocabulary projection
#[derive(Clone, Debug)]
pub struct ToyTransformer {
    pub embedding: Embedding,
    pub rope: Rope,
    pub attention: MultiHeadAttention,
    pub mlp: FeedForward,
    /// Final projection: [d_model, vocab_size]
    pub lm_head: Linear,
}

impl ToyTransformer {
    /// Create a model with N(0, 1) parameters drawn from `config.seed`
    ///
    /// # Panics
    ///
    /// Panics if `vector_size` is odd (rotary encoding pairs features) or not
    /// divisible by `n_heads`.
    pub fn new(config: &Config) -> Self {
        let mut rng = config.rng();
        let d_model = config.vector_size;
        Self {
            embedding: Embedding::random(config.vocab_size, d_model, &mut rng),
            rope: Rope::new(d_model, config.rope_base),
            attention: MultiHeadAttention::random(d_model, config.n_heads, &mut rng),
            mlp: FeedForward::random(d_model, config.hidden_size, &mut rng),
            lm_head: Linear::random(d_model, config.vocab_size, &mut rng),
        }
    }

    /// Forward pass: token ids → one row of logits per position
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenOutOfRange`] for an id past the vocabulary.
    pub fn forward(&self, ids: &[usize]) -> Result<Tensor> {
        let x = self.embedding.forward(ids)?;
        let x = self.rope.apply(&x);

        let (attn_out, _) = self.attention.forward(&x, true);
        let x = x.add(&attn_out); // Residual connection

        let x = x.add(&self.mlp.forward(&x)); // Residual connection

        let logits = self.lm_head.forward(&x);
        debug!(seq_len = ids.len(), logits_shape = ?logits.shape, "toy transformer forward pass");
        Ok(logits)
    }

    /// Most likely next word at every position
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenOutOfRange`] for an id past the vocabulary.
    pub fn predict(&self, ids: &[usize]) -> Result<Vec<usize>> {
        Ok(self.forward(ids)?.argmax_rows())
    }

    /// Total number of parameters
    pub fn count_parameters(&self) -> usize {
        let heads: usize = self
            .attention
            .heads
            .iter()
            .map(|h| h.q_proj.weight.data.len() + h.k_proj.weight.data.len() + h.v_proj.weight.data.len())
            .sum();
        self.embedding.weight.data.len()
            + heads
            + self.attention.out_proj.weight.data.len()
            + self.mlp.up.weight.data.len()
            + self.mlp.down.weight.data.len()
            + self.lm_head.weight.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Vocabulary;

    const CORPUS: &str = "the cat sat on the mat. the cat ate. the dog sat.";

    #[test]
    fn test_config_presets_roundtrip_json() {
        let config = Config::next_word(7);
        assert_eq!((config.vector_size, config.hidden_size), (4, 8));
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_next_word_ignores_transformer_fields() {
        let base = Config::next_word(5);
        let mut other = base.clone();
        other.n_heads = 3;
        other.rope_base = 500.0;
        other.learning_rate = 0.9;
        let a = NextWordModel::new(&base);
        let b = NextWordModel::new(&other);
        assert_eq!(a.embeddings.weight, b.embeddings.weight);
        assert_eq!(a.hidden.weight, b.hidden.weight);
        assert_eq!(a.output.weight, b.output.weight);
    }

    #[test]
    fn test_embedding_lookup_and_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let emb = Embedding::random(3, 4, &mut rng);
        assert_eq!(emb.lookup(2).unwrap().data, emb.weight.row_slice(2));
        assert_eq!(emb.lookup(3), Err(Error::token_out_of_range(3, 3)));

        let seq = emb.forward(&[2, 0, 2]).unwrap();
        assert_eq!(seq.shape, vec![3, 4]);
        assert_eq!(seq.row_slice(0), seq.row_slice(2));
        assert!(emb.forward(&[0, 5]).is_err());
    }

    #[test]
    fn test_next_word_forward() {
        let vocab = Vocabulary::from_corpus(CORPUS);
        let model = NextWordModel::new(&Config::next_word(vocab.len()));
        let p = model.forward(vocab.id("the").unwrap()).unwrap();

        assert_eq!(p.vector.shape, vec![4]);
        assert_eq!(p.hidden.shape, vec![8]);
        assert!(p.hidden.data.iter().all(|&h| h >= 0.0));
        assert_eq!(p.logits.shape, vec![7]);
        assert!(p.predicted_id < vocab.len());
        assert_eq!(p.predicted_id, p.logits.argmax());
        assert_eq!(model.count_parameters(), 7 * 4 + 4 * 8 + 8 * 7);
    }

    #[test]
    fn test_same_seed_same_model() {
        let a = NextWordModel::new(&Config::next_word(5));
        let b = NextWordModel::new(&Config::next_word(5));
        let c = NextWordModel::new(&Config::next_word(5).with_seed(7));
        assert_eq!(a.embeddings.weight, b.embeddings.weight);
        assert_ne!(a.embeddings.weight, c.embeddings.weight);
    }

    #[test]
    fn test_transformer_logits_per_position() {
        let vocab = Vocabulary::from_corpus(CORPUS);
        let model = ToyTransformer::new(&Config::toy_transformer(vocab.len()));
        let ids = vocab.encode("the cat sat on the mat").unwrap();

        let logits = model.forward(&ids).unwrap();
        assert_eq!(logits.shape, vec![ids.len(), vocab.len()]);
        assert!(logits.data.iter().all(|x| x.is_finite()));

        let predicted = model.predict(&ids).unwrap();
        assert_eq!(predicted.len(), ids.len());
        assert!(predicted.iter().all(|&id| id < vocab.len()));
    }

    #[test]
    fn test_transformer_is_causal() {
        // Appending words must not change the logits of earlier positions
        let vocab = Vocabulary::from_corpus(CORPUS);
        let model = ToyTransformer::new(&Config::toy_transformer(vocab.len()));
        let short = model.forward(&vocab.encode("the cat").unwrap()).unwrap();
        let long = model.forward(&vocab.encode("the cat sat on").unwrap()).unwrap();
        for i in 0..2 {
            for (a, b) in short.row_slice(i).iter().zip(long.row_slice(i)) {
                assert!((a - b).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_transformer_rejects_unknown_ids() {
        let model = ToyTransformer::new(&Config::toy_transformer(4));
        assert_eq!(model.forward(&[0, 4]), Err(Error::token_out_of_range(4, 4)));
    }

    #[test]
    fn test_transformer_parameter_count() {
        let model = ToyTransformer::new(&Config::toy_transformer(7));
        // embedding + 2 heads × 3 × (8×4) + W_o + up + down + lm_head
        let expected = 7 * 8 + 2 * 3 * 8 * 4 + 8 * 8 + 8 * 16 + 16 * 8 + 8 * 7;
        assert_eq!(model.count_parameters(), expected);
    }
}
