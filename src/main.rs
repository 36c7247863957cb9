//! Cardioscreen: Heart-disease risk screening core
//!
//! Main entry point: loads the trained model artifact, reads an answers
//! document, and prints the risk label.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardioscreen::adapters::gbt::GbtClassifier;
use cardioscreen::application::ScreeningService;
use cardioscreen::{RawAnswers, Screening};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let answers_path = std::env::args()
        .nth(1)
        .context("usage: cardioscreen <answers.json>")?;
    let model_dir =
        std::env::var("CARDIOSCREEN_MODEL_DIR").unwrap_or_else(|_| "models".to_string());

    tracing::info!("Starting cardioscreen...");

    let screening = run(Path::new(&model_dir), Path::new(&answers_path))?;

    println!("{}", screening.label);
    println!("{}", screening.label.description());
    println!("Caution: this is just a prediction, not medical advice.");

    Ok(())
}

/// Load the model, parse the answers document, and run one screening.
fn run(model_dir: &Path, answers_path: &Path) -> cardioscreen::Result<Screening> {
    let classifier = GbtClassifier::load(model_dir)?;
    let service = ScreeningService::new(Arc::new(classifier));

    let raw = std::fs::read_to_string(answers_path)?;
    let answers: RawAnswers = serde_json::from_str(&raw)?;

    service.screen(&answers)
}
