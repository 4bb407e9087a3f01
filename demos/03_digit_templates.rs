//! Recognizing Digits with a Stack of Templates
//!
//! The simplest "model": draw a 16x16 picture of each digit, flatten the
//! pictures into the rows of a matrix, and score an image by multiplying.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example 03_digit_templates
//! ```

use abacus::digits::{noisy_digit, SIDE};
use abacus::explain::{banner, fmt_vector, section};
use abacus::{digit_template, TemplateBank};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Normal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("{}", banner("Recognizing Digits with Templates"));

    // ========== Templates ==========
    println!("{}", section("1. Hand-drawn templates"));

    for digit in [0, 1] {
        println!("\nDigit {}:", digit);
        let template = digit_template(digit);
        for row in template.data.chunks(SIDE).skip(2).take(12) {
            let line: String = row.iter().map(|&p| if p > 0.5 { '#' } else { '.' }).collect();
            println!("  {}", line);
        }
    }

    // ========== Scoring ==========
    println!("{}", section("2. Scores = templates @ image"));

    let bank = TemplateBank::new(&[0, 1]);
    println!("Template matrix shape: {:?}", bank.templates.shape);

    let noise = Normal::new(0.0, 0.1)?;
    let mut rng = StdRng::seed_from_u64(42);
    for digit in [0, 1] {
        let image = noisy_digit(digit, &noise, &mut rng);
        let scores = bank.scores(&image);
        println!(
            "  noisy {} → scores {} → recognized as {}",
            digit,
            fmt_vector(&scores.data, 2),
            bank.recognize(&image)
        );
    }

    println!("\nEach score counts the bright pixels an image shares with a template.");
    println!();
    Ok(())
}
