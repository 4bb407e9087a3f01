//! Neural Network Layers
//!
//! Every building block the demos compose, each in its own module:
//!
//! - **activation**: ReLU and its positive mask
//! - **linear**: Bias-free projection `x @ W` with seeded N(0, 1) init
//! - **layer_norm**: Layer normalization
//! - **position**: Additive position patterns and rotary encoding (RoPE)
//! - **attention**: Scaled dot-product, single-head, and multi-head attention
//! - **mlp**: ReLU feed-forward block
//!
//! ## Design Pattern
//!
//! Layers are plain structs that own their weight tensors and expose a
//! `forward` method:
//!
//! ```rust,ignore
//! pub struct Layer {
//!     // Parameters (weight tensors)
//! }
//!
//! impl Layer {
//!     pub fn new(/* hand-written weights */) -> Self { }
//!     pub fn random(/* shape */, rng: &mut StdRng) -> Self { }
//!     pub fn forward(&self, x: &Tensor) -> Tensor { }
//! }
//! ```
//!
//! `new` lets a demo spell out every weight so the printed numbers can be
//! followed by hand; `random` builds the same layer from a seeded generator.

pub mod activation;
pub mod attention;
pub mod layer_norm;
pub mod linear;
pub mod mlp;
pub mod position;

// Re-export main types for convenience
pub use activation::{positive_mask, relu};
pub use attention::{scaled_dot_product_attention, AttentionHead, MultiHeadAttention, MASK_VALUE};
pub use layer_norm::{normalize, LayerNorm};
pub use linear::{randn, Linear};
pub use mlp::FeedForward;
pub use position::{add_position, position_pattern, rotate_pair, Rope};
