//! From Text to a Next-Word Guess (and One Nudge)
//!
//! Build a vocabulary, look a word up, run it through a hidden layer, score
//! every word, and push the parameters once toward the right answer.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example 09_text_to_model
//! RUST_LOG=abacus=debug cargo run --example 09_text_to_model
//! ```

use abacus::explain::{banner, fmt_vector, section};
use abacus::{nudge, Config, NextWordModel, Vocabulary};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("{}", banner("From Text to a Next-Word Guess"));

    // ========== Vocabulary ==========
    println!("{}", section("1. Words to ids"));

    let corpus = "the cat sat on the mat. the cat ate. the dog sat.";
    let vocab = Vocabulary::from_corpus(corpus);
    println!("Corpus: {:?}", corpus);
    for (id, word) in vocab.words().iter().enumerate() {
        println!("  {} = {}", id, word);
    }

    // ========== Model ==========
    println!("{}", section("2. The model"));

    let config = Config::next_word(vocab.len());
    println!("{}", serde_json::to_string_pretty(&config)?);
    let mut model = NextWordModel::new(&config);
    println!("Parameters: {}", model.count_parameters());

    // ========== Forward ==========
    println!("{}", section("3. What comes after \"the\"?"));

    let the = vocab.id("the")?;
    let cat = vocab.id("cat")?;
    let guess = model.forward(the)?;
    println!("vector  = {}", fmt_vector(&guess.vector.data, 3));
    println!("hidden  = {}", fmt_vector(&guess.hidden.data, 3));
    println!("logits  = {}", fmt_vector(&guess.logits.data, 3));
    println!("guess   = {}", vocab.decode(&[guess.predicted_id]));

    // ========== Nudge ==========
    println!("{}", section("4. One nudge toward \"cat\""));

    let report = nudge(&mut model, the, cat, config.learning_rate)?;
    if report.updated {
        println!("Wrong guess: output column, hidden weights, and embedding moved.");
    } else {
        println!("Already right: nothing to change.");
    }
    println!("logits before = {}", fmt_vector(&report.before.logits.data, 3));
    println!("logits after  = {}", fmt_vector(&report.after.logits.data, 3));
    println!(
        "logit for \"cat\": {:.3} → {:.3}",
        report.before.logits.data[cat], report.after.logits.data[cat]
    );
    println!("guess now = {}", vocab.decode(&[report.after.predicted_id]));

    println!("\nThis is an illustrative push, not a gradient: one step may or may not fix the guess.");
    println!();
    Ok(())
}
