//! Scaled Dot-Product Attention, Step by Step
//!
//! Three words, four features each. Features 1 and 3 mark nouns and verbs.
//! One head whose queries and keys only read the "noun" feature.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example 06_attention
//! ```

use abacus::explain::{banner, fmt_vector, section};
use abacus::layers::{scaled_dot_product_attention, AttentionHead};
use abacus::Tensor;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("{}", banner("Scaled Dot-Product Attention"));

    let words = ["The", "cat", "sat"];
    let x = Tensor::from_rows(&[
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 1.0],
        [0.0, 1.0, 1.0, 0.0],
    ]);

    let mut w_qk = Tensor::zeros(vec![4, 4]);
    w_qk.data[4 + 1] = 1.0;
    let head = AttentionHead::new(w_qk.clone(), w_qk, Tensor::eye(4));

    // ========== Projections ==========
    println!("{}", section("1. Queries, keys, values"));

    let q = head.q_proj.forward(&x);
    let k = head.k_proj.forward(&x);
    let v = head.v_proj.forward(&x);
    for (i, word) in words.iter().enumerate() {
        println!(
            "  {:<4} Q {}  K {}  V {}",
            word,
            fmt_vector(q.row_slice(i), 0),
            fmt_vector(k.row_slice(i), 0),
            fmt_vector(v.row_slice(i), 0)
        );
    }

    // ========== Scores ==========
    println!("{}", section("2. Scores = Q @ K^T / √4"));

    let scores = q.matmul(&k.transpose()).div_scalar(2.0);
    for (i, word) in words.iter().enumerate() {
        println!("  {:<4} {}", word, fmt_vector(scores.row_slice(i), 2));
    }

    // ========== Weights and Output ==========
    println!("{}", section("3. Softmax per row, then blend the values"));

    let (output, weights) = scaled_dot_product_attention(&q, &k, &v, false);
    for (i, word) in words.iter().enumerate() {
        println!(
            "  {:<4} weights {}  →  output {}",
            word,
            fmt_vector(weights.row_slice(i), 3),
            fmt_vector(output.row_slice(i), 3)
        );
    }

    // ========== Causal ==========
    println!("{}", section("4. With a causal mask: no peeking ahead"));

    let (_, causal) = head.forward(&x, true);
    for (i, word) in words.iter().enumerate() {
        println!("  {:<4} {}", word, fmt_vector(causal.row_slice(i), 3));
    }

    println!();
    Ok(())
}
