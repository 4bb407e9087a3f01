//! Linear Projection
//!
//! The linear layer is the workhorse of every model in this crate. It is a
//! single weight matrix applied with the input row on the left:
//!
//! ```text
//! Input:  x [seq_len, in_features]   (or a single row [in_features])
//! Weight: W [in_features, out_features]
//! Output: y = x @ W [seq_len, out_features]
//! ```
//!
//! Each column of `W` is one output's weight vector, so `y[j]` is the dot
//! product of the input row with column `j`.
//!
//! There is no bias term: the toy models only ever scale and mix features.
//!
//! ## Initialization
//!
//! Weights are drawn from the standard normal N(0, 1) through a seeded
//! [`StdRng`], so a given seed always builds the same model.

use crate::tensor::Tensor;
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;

/// Matrix of N(0, 1) samples
///
/// # Arguments
///
/// * `rows`, `cols` - Shape of the matrix
/// * `rng` - Seeded generator shared by everything built for one model
pub fn randn(rows: usize, cols: usize, rng: &mut StdRng) -> Tensor {
    let data = (0..rows * cols)
        .map(|_| rng.sample::<f32, _>(StandardNormal))
        .collect();
    Tensor::new(data, vec![rows, cols])
}

/// Bias-free linear layer: `y = x @ W`
#[derive(Clone, Debug)]
pub struct Linear {
    /// Weight matrix: [in_features, out_features]
    pub weight: Tensor,
}

impl Linear {
    /// Create a linear layer with N(0, 1) weights
    pub fn random(in_features: usize, out_features: usize, rng: &mut StdRng) -> Self {
        Self {
            weight: randn(in_features, out_features, rng),
        }
    }

    /// Wrap a hand-written weight matrix
    ///
    /// # Panics
    ///
    /// Panics if `weight` is not a matrix.
    pub fn from_weight(weight: Tensor) -> Self {
        assert_eq!(
            weight.shape.len(),
            2,
            "Linear weight must be a matrix, got {:?}",
            weight.shape
        );
        Self { weight }
    }

    /// Pass-through layer (`W` is the identity matrix)
    pub fn identity(features: usize) -> Self {
        Self::from_weight(Tensor::eye(features))
    }

    /// Input dimension
    pub fn in_features(&self) -> usize {
        self.weight.shape[0]
    }

    /// Output dimension
    pub fn out_features(&self) -> usize {
        self.weight.shape[1]
    }

    /// Forward pass: `x @ W`
    ///
    /// Accepts a single row `[in_features]` or a sequence of rows
    /// `[seq_len, in_features]` and keeps the same rank on the way out.
    pub fn forward(&self, x: &Tensor) -> Tensor {
        if x.shape.len() == 1 {
            x.vecmat(&self.weight)
        } else {
            x.matmul(&self.weight)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_forward_row_and_sequence_agree() {
        let layer = Linear::from_weight(Tensor::from_rows(&[[1.0, -1.0], [0.5, 2.0], [0.0, 1.0]]));
        let row = Tensor::vector(vec![2.0, 5.0, 1.0]);
        let seq = Tensor::from_rows(&[[2.0, 5.0, 1.0], [0.0, 0.0, 1.0]]);

        assert_eq!(layer.forward(&row).data, vec![4.5, 9.0]);
        let out = layer.forward(&seq);
        assert_eq!(out.shape, vec![2, 2]);
        assert_eq!(out.row_slice(0), &[4.5, 9.0]);
        assert_eq!(out.row_slice(1), &[0.0, 1.0]);
    }

    #[test]
    fn test_identity_passes_through() {
        let x = Tensor::from_rows(&[[1.0, 2.0, 3.0]]);
        assert_eq!(Linear::identity(3).forward(&x), x);
    }

    #[test]
    fn test_seeded_init_is_reproducible() {
        let a = Linear::random(4, 8, &mut StdRng::seed_from_u64(7));
        let b = Linear::random(4, 8, &mut StdRng::seed_from_u64(7));
        let c = Linear::random(4, 8, &mut StdRng::seed_from_u64(8));
        assert_eq!(a.weight, b.weight);
        assert_ne!(a.weight, c.weight);
        assert_eq!((a.in_features(), a.out_features()), (4, 8));
    }
}
