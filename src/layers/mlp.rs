//! Feed-Forward Block (MLP)
//!
//! After attention has mixed information between positions, the feed-forward
//! block processes each position on its own.
//!
//! ## Architecture
//!
//! ```text
//! x [seq, d_model] → up (x @ W_up) → ReLU → down (@ W_down) → y [seq, d_model]
//!                    [seq, hidden]
//! ```
//!
//! The up-projection widens the vector so ReLU has more features to switch on
//! and off; the down-projection brings it back to the model width so the
//! result can be added to the residual stream.

use super::activation::relu;
use super::linear::Linear;
use crate::tensor::Tensor;
use rand::rngs::StdRng;

/// Two-layer feed-forward network with ReLU in between
#[derive(Clone, Debug)]
pub struct FeedForward {
    pub up: Linear,
    pub down: Linear,
}

impl FeedForward {
    /// Build from hand-written `W_up [d_model, hidden]` and `W_down [hidden, d_model]`
    ///
    /// # Panics
    ///
    /// Panics if the hidden widths disagree.
    pub fn new(w_up: Tensor, w_down: Tensor) -> Self {
        let up = Linear::from_weight(w_up);
        let down = Linear::from_weight(w_down);
        assert_eq!(
            up.out_features(),
            down.in_features(),
            "Up projection produces {} features but down projection reads {}",
            up.out_features(),
            down.in_features()
        );
        Self { up, down }
    }

    /// Random N(0, 1) block `d_model → hidden → d_model`
    pub fn random(d_model: usize, hidden: usize, rng: &mut StdRng) -> Self {
        Self {
            up: Linear::random(d_model, hidden, rng),
            down: Linear::random(hidden, d_model, rng),
        }
    }

    /// Hidden activations `relu(x @ W_up)`
    pub fn hidden(&self, x: &Tensor) -> Tensor {
        relu(&self.up.forward(x))
    }

    /// Forward pass: `relu(x @ W_up) @ W_down`
    pub fn forward(&self, x: &Tensor) -> Tensor {
        self.down.forward(&self.hidden(x))
    }
}
