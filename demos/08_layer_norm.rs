//! Layer Normalization
//!
//! Wildly different feature sizes are brought back to mean 0 and variance 1,
//! then rescaled by a learned gamma and shifted by a learned beta.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example 08_layer_norm
//! ```

use abacus::explain::{banner, fmt_vector, section};
use abacus::layers::{normalize, LayerNorm};
use abacus::Tensor;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("{}", banner("Layer Normalization"));

    let x = Tensor::vector(vec![10.5, -2.2, 50.1, 0.1]);

    // ========== Statistics ==========
    println!("{}", section("1. Mean and variance"));

    println!("x        = {}", fmt_vector(&x.data, 2));
    println!("mean     = {:.4}", x.mean());
    println!("variance = {:.4}", x.variance());

    // ========== Normalize ==========
    println!("{}", section("2. (x - mean) / √(variance + ε)"));

    let x_norm = normalize(&x, 1e-5);
    println!("x_norm   = {}", fmt_vector(&x_norm.data, 4));
    println!("mean {:.4}, variance {:.4}", x_norm.mean(), x_norm.variance());

    // ========== Scale and Shift ==========
    println!("{}", section("3. × gamma + beta"));

    let ln = LayerNorm::with_affine(
        Tensor::vector(vec![1.0, 1.0, 2.0, 1.0]),
        Tensor::vector(vec![0.0, 0.5, 0.0, 0.0]),
    );
    println!("gamma    = {}", fmt_vector(&ln.gamma.data, 1));
    println!("beta     = {}", fmt_vector(&ln.beta.data, 1));
    println!("output   = {}", fmt_vector(&ln.forward(&x).data, 4));

    // ========== Edge Case ==========
    println!("{}", section("4. A constant input"));

    let flat = Tensor::vector(vec![3.0; 4]);
    println!("normalize({}) = {}", fmt_vector(&flat.data, 1), fmt_vector(&normalize(&flat, 1e-5).data, 1));

    println!();
    Ok(())
}
