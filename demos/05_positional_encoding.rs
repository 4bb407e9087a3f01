//! Where Is This Word? Positional Encoding
//!
//! Attention has no sense of order on its own, so each word vector is tagged
//! with its position. Two ways: add a pattern, or rotate the vector.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example 05_positional_encoding
//! ```

use abacus::explain::{banner, fmt_vector, section};
use abacus::layers::{add_position, position_pattern, Rope};
use abacus::Tensor;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("{}", banner("Positional Encoding"));

    // ========== Additive ==========
    println!("{}", section("1. Add a position pattern"));

    let cat = Tensor::vector(vec![0.5, -0.2, 0.1, 0.8]);
    println!("cat            = {}", fmt_vector(&cat.data, 2));
    for position in 0..2 {
        println!(
            "cat @ pos {}    = {} + {} = {}",
            position,
            fmt_vector(&cat.data, 2),
            fmt_vector(&position_pattern(position, 4).data, 1),
            fmt_vector(&add_position(&cat, position).data, 2)
        );
    }
    println!("The same word now looks different at each position, but its length changes too.");

    // ========== Rotary ==========
    println!("{}", section("2. Rotate by the position (RoPE)"));

    let rope = Rope::from_degrees(&[45.0, 10.0]);
    let cat = Tensor::vector(vec![1.0, 0.0, 1.0, 0.0]);
    println!("Pair 0 turns 45° per step, pair 1 turns 10° per step.");
    for position in 0..4 {
        let rotated = rope.rotate(&cat, position);
        println!(
            "  pos {}: {}   norm {:.4}",
            position,
            fmt_vector(&rotated.data, 3),
            rotated.norm()
        );
    }
    println!("The norm never changes: rotation moves a vector without stretching it.");

    // ========== Standard Frequencies ==========
    println!("{}", section("3. Standard frequencies θ_i = 10000^(-i/d)"));

    let rope = Rope::new(8, 10_000.0);
    println!("Radians per step: {}", fmt_vector(&rope.frequencies, 4));
    println!("Angles at pos 3:  {}", fmt_vector(&rope.angles(3), 4));

    println!();
    Ok(())
}
