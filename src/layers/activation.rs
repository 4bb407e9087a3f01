//! Activation Functions
//!
//! ## ReLU (Rectified Linear Unit)
//!
//! ```text
//! relu(x) = max(0, x)
//! ```
//!
//! Without a non-linearity between them, any stack of linear layers collapses
//! into a single linear layer (a product of matrices is just another matrix).
//! ReLU is the simplest function that breaks that collapse: it passes positive
//! values through and zeroes the rest.
//!
//! ## Positive Mask
//!
//! [`positive_mask`] marks which entries are strictly positive with 1.0 and
//! the rest with 0.0. It is the derivative of ReLU everywhere except at zero,
//! and the toy training nudge uses it to decide which hidden units to push.

use crate::tensor::Tensor;

/// ReLU activation applied element-wise
///
/// ```rust
/// # use abacus::{Tensor, layers::relu};
/// let y = relu(&Tensor::vector(vec![-1.0, 0.0, 2.5]));
/// assert_eq!(y.data, vec![0.0, 0.0, 2.5]);
/// ```
pub fn relu(x: &Tensor) -> Tensor {
    x.map(|v| v.max(0.0))
}

/// 1.0 where `x > 0`, 0.0 elsewhere
pub fn positive_mask(x: &Tensor) -> Tensor {
    x.map(|v| if v > 0.0 { 1.0 } else { 0.0 })
}
