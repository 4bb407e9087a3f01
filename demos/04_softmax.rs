//! Softmax: Turning Scores into Probabilities
//!
//! # Usage
//!
//! ```bash
//! cargo run --example 04_softmax
//! ```

use abacus::explain::{banner, fmt_vector, section, softmax_steps};
use abacus::Tensor;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("{}", banner("Softmax: Scores to Probabilities"));

    let words = ["the", "cat", "dog"];
    let logits = [5.2, -1.2, 0.4];

    // ========== The Recipe ==========
    println!("{}", section("1. Exponentiate, add up, divide"));

    let steps = softmax_steps(&logits);
    for ((word, logit), e) in words.iter().zip(&logits).zip(&steps.exponentials) {
        println!("  {:<4} logit {:>5.1}   e^x = {:>8.3}", word, logit, e);
    }
    println!("  total = {:.3}", steps.total);
    for (word, p) in words.iter().zip(&steps.probabilities) {
        println!("  P({}) = {:.4}", word, p);
    }

    // ========== Properties ==========
    println!("{}", section("2. Properties"));

    let probs = Tensor::vector(logits.to_vec()).softmax();
    println!("Sum of probabilities: {:.6}", probs.data.iter().sum::<f32>());

    let shifted = Tensor::vector(logits.to_vec()).add_scalar(100.0).softmax();
    println!("Logits + 100:         {}", fmt_vector(&shifted.data, 4));
    println!("Original:             {}", fmt_vector(&probs.data, 4));

    let huge = Tensor::vector(vec![1000.0, 999.0, 998.0]).softmax();
    println!("Logits near 1000:     {}   (max is subtracted first)", fmt_vector(&huge.data, 4));

    println!("\nMost likely next word: {}", words[probs.argmax()]);
    println!();
    Ok(())
}
