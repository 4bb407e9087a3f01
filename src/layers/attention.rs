//! Self-Attention Mechanism
//!
//! Attention lets each position build a new vector out of a weighted blend of
//! every other position's content. It is the one place in a transformer where
//! words talk to each other.
//!
//! ## Scaled Dot-Product Attention
//!
//! ```text
//! Q, K, V = x @ W_q, x @ W_k, x @ W_v     the query, key, and value of every word
//! scores  = (Q @ K^T) / √d_head            how well each query matches each key
//! weights = softmax(scores)                per row: who looks at whom
//! output  = weights @ V                    blend the values by those weights
//! ```
//!
//! ## Why Scaling?
//!
//! Dot products grow with the vector width. Dividing by `√d_head` keeps the
//! scores in a range where softmax still spreads its weight instead of
//! snapping onto a single position.
//!
//! ## Causal Masking
//!
//! When predicting the next word, position `i` must not peek at positions
//! after it. Scores for those positions are overwritten with `-1e9` before
//! the softmax, so their weight comes out as (numerically) zero.
//!
//! ## Multi-Head Attention
//!
//! Several heads run side by side, each with its own small projections into
//! a `d_head = d_model / n_heads` space. One head may learn to track nouns,
//! another verbs. Their outputs are glued back together along the feature
//! axis and mixed by one final projection:
//!
//! ```text
//! head_h  = Attention(x @ W_q^h, x @ W_k^h, x @ W_v^h)   [seq, d_head]
//! concat  = [head_1 | head_2 | ... ]                      [seq, d_model]
//! output  = concat @ W_o                                  [seq, d_model]
//! ```

use super::linear::Linear;
use crate::tensor::Tensor;
use rand::rngs::StdRng;
use tracing::debug;

/// Score given to masked (future) positions before softmax
pub const MASK_VALUE: f32 = -1e9;

/// Scaled dot-product attention over already-projected Q, K, V
///
/// # Arguments
///
/// * `q`, `k` - Queries and keys `[seq_len, d_head]`
/// * `v` - Values `[seq_len, d_value]`
/// * `causal` - Hide later positions from earlier ones
///
/// # Returns
///
/// Tuple of (output `[seq_len, d_value]`, weights `[seq_len, seq_len]`)
pub fn scaled_dot_product_attention(
    q: &Tensor,
    k: &Tensor,
    v: &Tensor,
    causal: bool,
) -> (Tensor, Tensor) {
    let seq_len = q.rows();
    let d_head = k.cols();

    let scores = q.matmul(&k.transpose()).div_scalar((d_head as f32).sqrt());
    let scores = if causal {
        scores.masked_fill(&Tensor::causal_mask(seq_len), MASK_VALUE)
    } else {
        scores
    };

    let weights = scores.softmax();
    let output = weights.matmul(v);
    (output, weights)
}

/// One attention head: three projections and a blend
#[derive(Clone, Debug)]
pub struct AttentionHead {
    pub q_proj: Linear,
    pub k_proj: Linear,
    pub v_proj: Linear,
}

impl AttentionHead {
    /// Build a head from hand-written projection matrices `[d_model, d_head]`
    ///
    /// # Panics
    ///
    /// Panics if the query and key projections disagree in shape, or the
    /// value projection has a different input width.
    pub fn new(w_q: Tensor, w_k: Tensor, w_v: Tensor) -> Self {
        assert_eq!(
            w_q.shape, w_k.shape,
            "Query {:?} and key {:?} projections must match",
            w_q.shape, w_k.shape
        );
        assert_eq!(
            w_q.shape[0], w_v.shape[0],
            "Value projection {:?} must read the same input width as {:?}",
            w_v.shape, w_q.shape
        );
        Self {
            q_proj: Linear::from_weight(w_q),
            k_proj: Linear::from_weight(w_k),
            v_proj: Linear::from_weight(w_v),
        }
    }

    /// Random N(0, 1) head projecting `d_model → d_head`
    pub fn random(d_model: usize, d_head: usize, rng: &mut StdRng) -> Self {
        Self {
            q_proj: Linear::random(d_model, d_head, rng),
            k_proj: Linear::random(d_model, d_head, rng),
            v_proj: Linear::random(d_model, d_head, rng),
        }
    }

    /// Width of this head's output
    pub fn d_head(&self) -> usize {
        self.v_proj.out_features()
    }

    /// Forward pass
    ///
    /// # Arguments
    ///
    /// * `x` - Input tensor [seq_len, d_model]
    /// * `causal` - Apply the causal mask
    ///
    /// # Returns
    ///
    /// Tuple of (output [seq_len, d_head], weights [seq_len, seq_len])
    pub fn forward(&self, x: &Tensor, causal: bool) -> (Tensor, Tensor) {
        let q = self.q_proj.forward(x);
        let k = self.k_proj.forward(x);
        let v = self.v_proj.forward(x);
        scaled_dot_product_attention(&q, &k, &v, causal)
    }
}

/// Multi-head self-attention
#[derive(Clone, Debug)]
pub struct MultiHeadAttention {
    pub heads: Vec<AttentionHead>,
    /// Output projection: [d_model, d_model]
    pub out_proj: Linear,
}

impl MultiHeadAttention {
    /// Combine heads with an output projection
    ///
    /// # Panics
    ///
    /// Panics if there are no heads or the concatenated head width does not
    /// match the output projection's input.
    pub fn new(heads: Vec<AttentionHead>, out_proj: Linear) -> Self {
        assert!(!heads.is_empty(), "Multi-head attention needs at least one head");
        let concat_width: usize = heads.iter().map(AttentionHead::d_head).sum();
        assert_eq!(
            concat_width,
            out_proj.in_features(),
            "Heads produce {} features but the output projection reads {}",
            concat_width,
            out_proj.in_features()
        );
        Self { heads, out_proj }
    }

    /// Combine heads with no mixing afterwards (identity output projection)
    pub fn with_identity_output(heads: Vec<AttentionHead>) -> Self {
        let width = heads.iter().map(AttentionHead::d_head).sum();
        Self::new(heads, Linear::identity(width))
    }

    /// Random N(0, 1) attention with `n_heads` heads of width `d_model / n_heads`
    ///
    /// # Panics
    ///
    /// Panics if `d_model` is not divisible by `n_heads`.
    pub fn random(d_model: usize, n_heads: usize, rng: &mut StdRng) -> Self {
        assert!(
            n_heads > 0 && d_model % n_heads == 0,
            "d_model ({}) must be divisible by n_heads ({})",
            d_model,
            n_heads
        );
        let d_head = d_model / n_heads;
        let heads = (0..n_heads)
            .map(|_| AttentionHead::random(d_model, d_head, rng))
            .collect();
        Self::new(heads, Linear::random(d_model, d_model, rng))
    }

    /// Number of heads
    pub fn n_heads(&self) -> usize {
        self.heads.len()
    }

    /// Forward pass: run every head, concatenate, project
    ///
    /// # Arguments
    ///
    /// * `x` - Input tensor [seq_len, d_model]
    /// * `causal` - Apply the causal mask in every head
    ///
    /// # Returns
    ///
    /// Tuple of (output [seq_len, d_model], per-head weights)
    pub fn forward(&self, x: &Tensor, causal: bool) -> (Tensor, Vec<Tensor>) {
        let (outputs, weights): (Vec<Tensor>, Vec<Tensor>) =
            self.heads.iter().map(|head| head.forward(x, causal)).unzip();

        let concat = Tensor::concat_cols(&outputs);
        debug!(
            n_heads = self.heads.len(),
            concat_shape = ?concat.shape,
            causal,
            "multi-head attention"
        );
        (self.out_proj.forward(&concat), weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn sentence() -> Tensor {
        // "The", "cat", "sat"
        Tensor::from_rows(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0, 0.0],
        ])
    }

    fn pick(rows: usize, cols: usize, ones: &[(usize, usize)]) -> Tensor {
        let mut t = Tensor::zeros(vec![rows, cols]);
        for &(r, c) in ones {
            t.data[r * cols + c] = 1.0;
        }
        t
    }

    #[test]
    fn test_noun_feature_attention() {
        let x = sentence();
        let head = AttentionHead::new(pick(4, 4, &[(1, 1)]), pick(4, 4, &[(1, 1)]), Tensor::eye(4));
        let (output, weights) = head.forward(&x, false);

        assert_eq!(output.shape, vec![3, 4]);
        for i in 0..3 {
            assert!((weights.row_slice(i).iter().sum::<f32>() - 1.0).abs() < 1e-6);
        }
        // "The" has no noun feature: it spreads evenly
        for &w in weights.row_slice(0) {
            assert!((w - 1.0 / 3.0).abs() < 1e-6);
        }
        // "sat" leans on "cat" (and itself) rather than "The"
        let sat = weights.row_slice(2);
        assert!(sat[1] > sat[0]);
        let expected = 0.5f32.exp() / (1.0 + 2.0 * 0.5f32.exp());
        assert!((sat[1] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_causal_mask_hides_future() {
        let x = sentence();
        let head = AttentionHead::new(Tensor::eye(4), Tensor::eye(4), Tensor::eye(4));
        let (_, weights) = head.forward(&x, true);

        assert!((weights.data[0] - 1.0).abs() < 1e-6);
        assert!(weights.data[1] < 1e-6);
        assert!(weights.data[2] < 1e-6);
        assert!(weights.row_slice(1)[2] < 1e-6);
        for i in 0..3 {
            assert!((weights.row_slice(i).iter().sum::<f32>() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_causal_first_output_is_own_value() {
        let x = sentence();
        let head = AttentionHead::new(Tensor::eye(4), Tensor::eye(4), Tensor::eye(4));
        let (output, _) = head.forward(&x, true);
        for (a, b) in output.row_slice(0).iter().zip(x.row_slice(0)) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_multi_head_output_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let mha = MultiHeadAttention::random(8, 4, &mut rng);
        let x = crate::layers::linear::randn(5, 8, &mut rng);
        let (out, weights) = mha.forward(&x, true);
        assert_eq!(out.shape, vec![5, 8]);
        assert_eq!(mha.n_heads(), 4);
        assert_eq!(weights.len(), mha.n_heads());
        assert!(weights.iter().all(|w| w.shape == vec![5, 5]));
    }

    #[test]
    fn test_two_specialist_heads_concatenate() {
        let x = sentence();
        let head1 = AttentionHead::new(
            pick(4, 2, &[(1, 0)]),
            pick(4, 2, &[(1, 0)]),
            pick(4, 2, &[(0, 0), (1, 1)]),
        );
        let head2 = AttentionHead::new(
            pick(4, 2, &[(3, 1)]),
            pick(4, 2, &[(3, 1)]),
            pick(4, 2, &[(2, 0), (3, 1)]),
        );
        let (h1_out, _) = head1.forward(&x, false);
        let (h2_out, _) = head2.forward(&x, false);

        let mha = MultiHeadAttention::with_identity_output(vec![head1, head2]);
        let (out, _) = mha.forward(&x, false);

        assert_eq!(out.shape, vec![3, 4]);
        for i in 0..3 {
            assert_eq!(&out.row_slice(i)[..2], h1_out.row_slice(i));
            assert_eq!(&out.row_slice(i)[2..], h2_out.row_slice(i));
        }
    }

    #[test]
    #[should_panic(expected = "divisible")]
    fn test_heads_must_divide_model_dim() {
        MultiHeadAttention::random(6, 4, &mut StdRng::seed_from_u64(0));
    }
}
