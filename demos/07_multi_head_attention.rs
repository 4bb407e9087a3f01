//! Two Heads Are Better Than One
//!
//! One head watches the noun feature, the other the verb feature. Their
//! outputs are placed side by side.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example 07_multi_head_attention
//! ```

use abacus::explain::{banner, fmt_vector, section};
use abacus::layers::{AttentionHead, MultiHeadAttention};
use abacus::Tensor;
use tracing_subscriber::EnvFilter;

/// `[rows, cols]` zeros with ones at the given positions
fn pick(rows: usize, cols: usize, ones: &[(usize, usize)]) -> Tensor {
    let mut t = Tensor::zeros(vec![rows, cols]);
    for &(r, c) in ones {
        t.data[r * cols + c] = 1.0;
    }
    t
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("{}", banner("Multi-Head Attention"));

    let words = ["The", "cat", "sat"];
    let x = Tensor::from_rows(&[
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 1.0],
        [0.0, 1.0, 1.0, 0.0],
    ]);

    let noun_head = AttentionHead::new(
        pick(4, 2, &[(1, 0)]),
        pick(4, 2, &[(1, 0)]),
        pick(4, 2, &[(0, 0), (1, 1)]),
    );
    let verb_head = AttentionHead::new(
        pick(4, 2, &[(3, 1)]),
        pick(4, 2, &[(3, 1)]),
        pick(4, 2, &[(2, 0), (3, 1)]),
    );
    let mha = MultiHeadAttention::with_identity_output(vec![noun_head, verb_head]);

    let (output, weights) = mha.forward(&x, false);
    println!("{} heads of width {}", mha.n_heads(), mha.heads[0].d_head());

    for (h, (name, w)) in ["noun head", "verb head"].iter().zip(&weights).enumerate() {
        println!("{}", section(&format!("{}. Weights of the {}", h + 1, name)));
        for (i, word) in words.iter().enumerate() {
            println!("  {:<4} {}", word, fmt_vector(w.row_slice(i), 3));
        }
    }

    println!("{}", section("3. Concatenated output [noun | verb]"));
    println!("Shape: {:?}", output.shape);
    for (i, word) in words.iter().enumerate() {
        let row = output.row_slice(i);
        println!("  {:<4} {} | {}", word, fmt_vector(&row[..2], 3), fmt_vector(&row[2..], 3));
    }

    println!();
    Ok(())
}
