//! The Dot Product
//!
//! Every number a neural network produces is built from one move: multiply
//! two lists pairwise and add the results.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example 01_dot_product
//! ```

use abacus::explain::{banner, dot_steps, fmt_vector, section};
use abacus::{dot, Tensor};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("{}", banner("The Dot Product"));

    // ========== Two Lists ==========
    println!("{}", section("1. Multiply the partners, add the results"));

    let a = [10.0, 20.0];
    let b = [1.0, 2.0];
    println!("a = {}", fmt_vector(&a, 0));
    println!("b = {}", fmt_vector(&b, 0));
    println!("a · b = {}", dot_steps(&a, &b));

    // ========== A Weighted Vote ==========
    println!("{}", section("2. A row of weights meets an input"));

    let weights = Tensor::vector(vec![0.1, 0.8]);
    let input = Tensor::vector(vec![10.0, 20.0]);
    println!("weights = {}   (cares a little about feature 0, a lot about feature 1)", fmt_vector(&weights.data, 1));
    println!("input   = {}", fmt_vector(&input.data, 0));
    println!("score   = {}", dot_steps(&weights.data, &input.data));

    // ========== Similarity ==========
    println!("{}", section("3. Dot product as similarity"));

    let cat = [0.9, 0.1, 0.8];
    let dog = [0.8, 0.2, 0.9];
    let car = [0.0, 0.9, -0.2];
    println!("cat · dog = {:.2}   (similar directions)", dot(&cat, &dog));
    println!("cat · car = {:.2}   (unrelated)", dot(&cat, &car));

    println!();
    Ok(())
}
