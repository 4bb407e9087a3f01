//! A One-Block Transformer, End to End
//!
//! Embedding, rotary positions, causal multi-head attention, a feed-forward
//! block, and a projection back to the vocabulary, all with random weights.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example 10_toy_transformer
//! ```

use abacus::explain::{banner, fmt_vector, section};
use abacus::{Config, ToyTransformer, Vocabulary};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("{}", banner("A One-Block Transformer"));

    let vocab = Vocabulary::from_corpus("the cat sat on the mat. the cat ate. the dog sat.");

    // ========== Configuration ==========
    println!("{}", section("1. Configuration"));

    let config = Config::toy_transformer(vocab.len());
    println!("{}", serde_json::to_string_pretty(&config)?);
    let model = ToyTransformer::new(&config);
    println!("Parameters: {}", model.count_parameters());

    // ========== Forward ==========
    println!("{}", section("2. Logits for \"the cat sat\""));

    let ids = vocab.encode("the cat sat")?;
    let logits = model.forward(&ids)?;
    println!("Input ids:    {:?}", ids);
    println!("Logits shape: {:?}", logits.shape);
    let probs = logits.softmax();
    for (i, &id) in ids.iter().enumerate() {
        println!("  after {:<4} {}", vocab.decode(&[id]), fmt_vector(probs.row_slice(i), 2));
    }

    // ========== Predictions ==========
    println!("{}", section("3. Guess at every position"));

    let predicted = model.predict(&ids)?;
    for (i, &id) in predicted.iter().enumerate() {
        println!("  \"{}\" → {}", vocab.decode(&ids[..=i]), vocab.decode(&[id]));
    }

    // ========== Causality ==========
    println!("{}", section("4. Later words cannot change earlier guesses"));

    let longer = vocab.encode("the cat sat on")?;
    let longer_logits = model.forward(&longer)?;
    let unchanged = (0..ids.len()).all(|i| {
        logits
            .row_slice(i)
            .iter()
            .zip(longer_logits.row_slice(i))
            .all(|(a, b)| (a - b).abs() < 1e-4)
    });
    println!("First {} rows identical after appending \"on\": {}", ids.len(), unchanged);
    println!("\nThe weights are random, so the guesses are too: this shows the plumbing, not a trained model.");

    println!();
    Ok(())
}
