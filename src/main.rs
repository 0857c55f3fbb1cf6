//! Binary entry point: resolve paths, start logging, load the corpus
//! once, and drive the Ratatui event loop until the user exits.
use std::sync::Arc;

use anyhow::Context;
use quran_reader::config::AppConfig;
use quran_reader::corpus::load;
use quran_reader::{logging, run_app, App};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::resolve()?;
    logging::init(&config)?;

    let corpus = Arc::new(load(&config.corpus_path).context("failed to load corpus")?);
    let mut app = App::new(corpus, &config)?;

    info!("starting event loop");
    run_app(&mut app)
}
