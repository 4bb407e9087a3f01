//! Matrices in Both Orientations
//!
//! A matrix is a stack of dot products. Textbooks write the weights on the
//! left (`W @ x`), model code writes the input on the left (`x @ W`). This
//! demo runs both and shows they are the same arithmetic read differently.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example 02_matrix_orientation
//! ```

use abacus::explain::{banner, dot_steps, fmt_vector, section};
use abacus::Tensor;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("{}", banner("Matrices in Both Orientations"));

    // ========== Weights on the Left ==========
    println!("{}", section("1. W @ x: each weight row meets the input"));

    let w = Tensor::from_rows(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
    let x = Tensor::vector(vec![10.0, 20.0]);
    for i in 0..w.rows() {
        println!("  row {}: {}", i, dot_steps(w.row_slice(i), &x.data));
    }
    println!("W @ x = {}", fmt_vector(&w.matvec(&x).data, 0));

    // ========== Input on the Left ==========
    println!("{}", section("2. x @ W: the input meets each weight column"));

    let hidden = Tensor::vector(vec![0.5, 1.2, 0.0, 2.1]);
    let w_out = Tensor::from_rows(&[[0.1, 0.9], [0.8, -0.1], [-0.5, 0.2], [0.4, 0.7]]);
    for j in 0..w_out.cols() {
        let column = w_out.column(j);
        println!("  column {}: {}", j, dot_steps(&hidden.data, &column.data));
    }
    println!("x @ W = {}", fmt_vector(&hidden.vecmat(&w_out).data, 2));

    // ========== Same Numbers, Transposed ==========
    println!("{}", section("3. x @ W equals W^T @ x"));

    let x = Tensor::vector(vec![2.0, 5.0, 1.0]);
    let w = Tensor::from_rows(&[[1.0, -1.0], [0.5, 2.0], [0.0, 1.0]]);
    println!("x @ W    = {}", fmt_vector(&x.vecmat(&w).data, 2));
    println!("W^T @ x  = {}", fmt_vector(&w.transpose().matvec(&x).data, 2));

    // ========== Many Inputs at Once ==========
    println!("{}", section("4. Matrix @ matrix: one row of output per input row"));

    let batch = Tensor::from_rows(&[[2.0, 5.0, 1.0], [1.0, 0.0, 0.0]]);
    let out = batch.matmul(&w);
    for i in 0..out.rows() {
        println!("  {} @ W = {}", fmt_vector(batch.row_slice(i), 0), fmt_vector(out.row_slice(i), 2));
    }

    let size = 128;
    let a = Tensor::new((0..size * size).map(|i| (i % 7) as f32).collect(), vec![size, size]);
    let start = Instant::now();
    let c = a.matmul(&Tensor::eye(size));
    println!(
        "\n{}×{} product (parallel blocked kernel): {:.2?}, identity preserved: {}",
        size,
        size,
        start.elapsed(),
        c == a
    );

    println!();
    Ok(())
}
