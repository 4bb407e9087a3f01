//! Positional Encoding
//!
//! Attention compares every word with every other word, but a dot product
//! has no idea where a word sits in the sentence. "dog bites man" and
//! "man bites dog" would look identical. Positional encoding stamps each
//! vector with its position before attention sees it.
//!
//! ## Additive Patterns
//!
//! The oldest trick: add a position-specific pattern to the word vector.
//!
//! ```text
//! cat         = [0.5, -0.2, 0.1, 0.8]
//! position 0  = [0.1,  0.1, 0.1, 0.1]   → cat@0 = [0.6, -0.1, 0.2, 0.9]
//! position 1  = [0.2,  0.2, 0.2, 0.2]   → cat@1 = [0.7,  0.0, 0.3, 1.0]
//! ```
//!
//! The meaning of "cat" is still there, but the numbers are now unique to the
//! spot it occupies.
//!
//! ## Rotary Encoding (RoPE)
//!
//! Modern models rotate instead of add. The features are grouped into
//! adjacent pairs `(x0, x1)` and each pair is treated as a 2D point, rotated
//! by an angle proportional to the position:
//!
//! ```text
//! angle = position × θ_i
//! x0' = x0·cos(angle) − x1·sin(angle)
//! x1' = x0·sin(angle) + x1·cos(angle)
//! ```
//!
//! Each pair `i` has its own speed `θ_i = base^(−i/d)`: the first pair spins
//! fast, later pairs progressively slower, so the combination of angles is a
//! unique signature for every position.
//!
//! Rotation never changes length, so position is encoded without changing
//! the word's "energy", and position 0 leaves the vector untouched.

use crate::tensor::Tensor;

/// Additive position pattern: every feature set to `0.1 × (position + 1)`
pub fn position_pattern(position: usize, dim: usize) -> Tensor {
    Tensor::vector(vec![0.1 * (position + 1) as f32; dim])
}

/// Word vector plus its additive position pattern
pub fn add_position(word: &Tensor, position: usize) -> Tensor {
    word.add(&position_pattern(position, word.data.len()))
}

/// Rotate one 2D point by `angle` radians
pub fn rotate_pair(x0: f32, x1: f32, angle: f32) -> (f32, f32) {
    let (sin, cos) = angle.sin_cos();
    (x0 * cos - x1 * sin, x0 * sin + x1 * cos)
}

/// Rotary positional encoding
///
/// Holds one rotation speed (radians per position) per feature pair.
#[derive(Clone, Debug)]
pub struct Rope {
    /// Angle per position step for each pair
    pub frequencies: Vec<f32>,
}

impl Rope {
    /// Speeds `θ_i = base^(−i/dim)` for pair index `i` in `0..dim / 2`
    ///
    /// # Panics
    ///
    /// Panics if `dim` is odd: features must pair up.
    pub fn new(dim: usize, base: f32) -> Self {
        assert!(
            dim % 2 == 0,
            "Rotary encoding needs an even feature count, got {}",
            dim
        );
        let frequencies = (0..dim / 2)
            .map(|i| base.powf(-(i as f32) / dim as f32))
            .collect();
        Self { frequencies }
    }

    /// Hand-picked speeds in degrees per position (one per pair)
    ///
    /// `Rope::from_degrees(&[45.0, 10.0])` gives a 4-feature encoding whose
    /// first pair turns 45° per step and second pair 10° per step.
    pub fn from_degrees(degrees: &[f32]) -> Self {
        Self {
            frequencies: degrees.iter().map(|d| d.to_radians()).collect(),
        }
    }

    /// Feature dimension this encoding expects
    pub fn dim(&self) -> usize {
        self.frequencies.len() * 2
    }

    /// Rotation angle of every pair at `position`, in radians
    pub fn angles(&self, position: usize) -> Vec<f32> {
        self.frequencies
            .iter()
            .map(|&theta| position as f32 * theta)
            .collect()
    }

    /// Rotate one vector as if it sat at `position`
    ///
    /// # Panics
    ///
    /// Panics if the vector length is not [`Rope::dim`].
    pub fn rotate(&self, x: &Tensor, position: usize) -> Tensor {
        Tensor::vector(self.rotate_slice(&x.data, position))
    }

    fn rotate_slice(&self, x: &[f32], position: usize) -> Vec<f32> {
        assert_eq!(
            x.len(),
            self.dim(),
            "Rotary encoding expects {} features, got {}",
            self.dim(),
            x.len()
        );
        let mut out = Vec::with_capacity(x.len());
        for (pair, angle) in x.chunks_exact(2).zip(self.angles(position)) {
            let (a, b) = rotate_pair(pair[0], pair[1], angle);
            out.push(a);
            out.push(b);
        }
        out
    }

    /// Rotate every row of `[seq_len, dim]`, row `p` by position `p`
    pub fn apply(&self, seq: &Tensor) -> Tensor {
        let mut data = Vec::with_capacity(seq.data.len());
        for p in 0..seq.rows() {
            data.extend(self.rotate_slice(seq.row_slice(p), p));
        }
        Tensor::new(data, seq.shape.clone())
    }
}
