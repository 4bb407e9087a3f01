//! Layer Normalization
//!
//! Activations drift as they pass through a network: some features grow
//! huge, others shrink to nothing. Layer normalization re-centers each row of
//! features to zero mean and unit variance, then lets the model re-scale and
//! re-shift them with learned parameters.
//!
//! ## Forward Pass
//!
//! ```text
//! 1. mean = sum(x) / N
//! 2. var = sum((x - mean)²) / N
//! 3. x_norm = (x - mean) / √(var + ε)
//! 4. y = γ * x_norm + β
//! ```
//!
//! where:
//! - ε (epsilon) prevents division by zero for a constant row
//! - γ (gamma) is the learned scale
//! - β (beta) is the learned shift
//!
//! ## Example
//!
//! ```text
//! x      = [10.5, -2.2, 50.1, 0.1]     mean 14.63, variance 442.39
//! x_norm = [-0.2, -0.8, 1.69, -0.69]   mean 0,     variance 1
//! ```

use crate::tensor::Tensor;

/// Re-center each row of `x` to zero mean and unit variance
///
/// Works on a single vector or on every row of a matrix. A constant row comes
/// out as all zeros because `eps` keeps the denominator positive.
pub fn normalize(x: &Tensor, eps: f32) -> Tensor {
    let rows = x.rows();
    let mut data = Vec::with_capacity(x.data.len());

    for i in 0..rows {
        let row = Tensor::vector(x.row_slice(i).to_vec());
        let mean = row.mean();
        let std = (row.variance() + eps).sqrt();
        data.extend(row.data.iter().map(|&v| (v - mean) / std));
    }

    Tensor::new(data, x.shape.clone())
}

/// Layer normalization with learned scale and shift
#[derive(Clone, Debug)]
pub struct LayerNorm {
    pub gamma: Tensor, // Scale parameter [features]
    pub beta: Tensor,  // Shift parameter [features]
    pub eps: f32,      // Small constant for numerical stability
}

impl LayerNorm {
    /// Create a layer norm with gamma = 1, beta = 0, eps = 1e-5
    pub fn new(features: usize) -> Self {
        Self {
            gamma: Tensor::vector(vec![1.0; features]),
            beta: Tensor::vector(vec![0.0; features]),
            eps: 1e-5,
        }
    }

    /// Create a layer norm with hand-picked gamma and beta
    ///
    /// # Panics
    ///
    /// Panics if gamma and beta have different lengths.
    pub fn with_affine(gamma: Tensor, beta: Tensor) -> Self {
        assert_eq!(
            gamma.shape, beta.shape,
            "gamma {:?} and beta {:?} must match",
            gamma.shape, beta.shape
        );
        Self {
            gamma,
            beta,
            eps: 1e-5,
        }
    }

    /// Forward pass: normalize each row, then `γ * x_norm + β`
    ///
    /// # Arguments
    ///
    /// * `x` - Input `[features]` or `[seq_len, features]`
    pub fn forward(&self, x: &Tensor) -> Tensor {
        normalize(x, self.eps).mul(&self.gamma).add(&self.beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_mean_unit_variance() {
        let x = Tensor::vector(vec![10.5, -2.2, 50.1, 0.1]);
        let y = normalize(&x, 1e-5);
        assert!(y.mean().abs() < 1e-5);
        assert!((y.variance() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_each_row_normalized_independently() {
        let x = Tensor::from_rows(&[[1.0, 2.0, 3.0, 4.0], [100.0, 0.0, -50.0, 7.0]]);
        let y = LayerNorm::new(4).forward(&x);
        assert_eq!(y.shape, vec![2, 4]);
        for i in 0..2 {
            let row = y.row(i);
            assert!(row.mean().abs() < 1e-5);
            assert!((row.variance() - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_constant_input_does_not_divide_by_zero() {
        let y = normalize(&Tensor::vector(vec![3.0; 4]), 1e-5);
        assert!(y.data.iter().all(|v| v.is_finite() && *v == 0.0));
    }

    #[test]
    fn test_gamma_beta_applied() {
        let ln = LayerNorm::with_affine(
            Tensor::vector(vec![1.0, 1.0, 2.0, 1.0]),
            Tensor::vector(vec![0.0, 0.5, 0.0, 0.0]),
        );
        let x = Tensor::vector(vec![10.5, -2.2, 50.1, 0.1]);
        let plain = normalize(&x, 1e-5);
        let y = ln.forward(&x);
        assert!((y.data[1] - (plain.data[1] + 0.5)).abs() < 1e-6);
        assert!((y.data[2] - plain.data[2] * 2.0).abs() < 1e-6);
        assert_eq!(y.data[0], plain.data[0]);
    }
}
