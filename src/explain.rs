//! Narration Helpers
//!
//! The demos print their arithmetic the way you would write it on paper.
//! These helpers turn numbers into those lines so each demo stays a short
//! list of `println!` calls.

use crate::tensor::dot;

const RULE_WIDTH: usize = 70;

/// Title block: a `=` rule above and below
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("\n{}\n  {}\n{}", rule, title, rule)
}

/// Section header: a `─` rule above and below
pub fn section(title: &str) -> String {
    let rule = "─".repeat(RULE_WIDTH);
    format!("\n{}\n{}\n{}", rule, title, rule)
}

/// Vector with a fixed number of decimals, e.g. `[0.50, 1.20]`
pub fn fmt_vector(values: &[f32], decimals: usize) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| format!("{:.*}", decimals, v))
        .collect();
    format!("[{}]", parts.join(", "))
}

/// A dot product written out term by term
///
/// ```rust
/// use abacus::explain::dot_steps;
/// assert_eq!(dot_steps(&[10.0, 20.0], &[1.0, 2.0]), "(10 * 1) + (20 * 2) = 50");
/// ```
///
/// # Panics
///
/// Panics if the lengths differ.
pub fn dot_steps(a: &[f32], b: &[f32]) -> String {
    let total = dot(a, b);
    let terms: Vec<String> = a
        .iter()
        .zip(b)
        .map(|(x, y)| format!("({} * {})", x, y))
        .collect();
    format!("{} = {}", terms.join(" + "), total)
}

/// The three stages of a softmax, kept for printing
#[derive(Clone, Debug, PartialEq)]
pub struct SoftmaxSteps {
    /// `e^x` for every logit
    pub exponentials: Vec<f32>,
    /// Sum of the exponentials
    pub total: f32,
    /// Each exponential divided by the total
    pub probabilities: Vec<f32>,
}

/// Softmax the long way: exponentiate, add up, divide
///
/// The exponentials are of the raw logits so they match a hand calculation.
/// That overflows for logits past ~88; [`crate::Tensor::softmax`] shifts by
/// the maximum first and is the one the models use.
pub fn softmax_steps(logits: &[f32]) -> SoftmaxSteps {
    let exponentials: Vec<f32> = logits.iter().map(|x| x.exp()).collect();
    let total: f32 = exponentials.iter().sum();
    let probabilities = exponentials.iter().map(|e| e / total).collect();
    SoftmaxSteps {
        exponentials,
        total,
        probabilities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::Tensor;

    #[test]
    fn test_dot_steps_reads_like_paper() {
        assert_eq!(dot_steps(&[10.0, 20.0], &[1.0, 2.0]), "(10 * 1) + (20 * 2) = 50");
        assert_eq!(dot_steps(&[0.5], &[-2.0]), "(0.5 * -2) = -1");
    }

    #[test]
    fn test_fmt_vector() {
        assert_eq!(fmt_vector(&[0.5, 1.2], 2), "[0.50, 1.20]");
        assert_eq!(fmt_vector(&[1.0, -0.26], 1), "[1.0, -0.3]");
        assert_eq!(fmt_vector(&[], 3), "[]");
    }

    #[test]
    fn test_headers() {
        let b = banner("Softmax");
        assert!(b.contains("  Softmax"));
        assert_eq!(b.matches('=').count(), 2 * RULE_WIDTH);
        let s = section("1. Exponentiate");
        assert_eq!(s.lines().count(), 4);
        assert!(s.lines().nth(1).is_some_and(|line| line.chars().count() == RULE_WIDTH));
    }

    #[test]
    fn test_softmax_steps_match_tensor_softmax() {
        let logits = [5.2, -1.2, 0.4];
        let steps = softmax_steps(&logits);
        assert!((steps.exponentials[0] - 181.272).abs() < 1e-2);
        assert!((steps.total - steps.exponentials.iter().sum::<f32>()).abs() < 1e-6);

        let stable = Tensor::vector(logits.to_vec()).softmax();
        for (a, b) in steps.probabilities.iter().zip(&stable.data) {
            assert!((a - b).abs() < 1e-6);
        }
        assert_eq!(Tensor::vector(steps.probabilities).argmax(), 0);
    }
}
