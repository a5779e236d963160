//! Pitch Deck - Investor Presentation Viewer
//!
//! Shows the deck in a desktop window, or exports it to PowerPoint with
//! `--export`.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use pitch_deck::deck::DeckLoader;
use pitch_deck::gui::DeckApp;
use pitch_deck::ppt::{PptGenerator, DECK_TITLE};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pitch-deck", version, about = "Investor pitch deck viewer")]
struct Args {
    /// Deck JSON file (defaults to the built-in deck)
    #[arg(long, value_name = "FILE")]
    deck: Option<PathBuf>,

    /// Slide to open first, 1-based
    #[arg(long, value_name = "N", default_value_t = 1)]
    slide: usize,

    /// Write the deck to a PPTX file and exit without opening a window
    #[arg(long, value_name = "FILE.pptx")]
    export: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let deck = DeckLoader::load(args.deck.as_deref());

    if let Some(output) = &args.export {
        let slides = deck.context("Failed to load deck")?;
        PptGenerator::export_deck(&slides, output, DECK_TITLE)
            .with_context(|| format!("Failed to export {}", output.display()))?;
        return Ok(());
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Pitch Deck"),
        ..Default::default()
    };

    let start = args.slide.saturating_sub(1);
    eframe::run_native(
        "Pitch Deck",
        options,
        Box::new(move |cc| Ok(Box::new(DeckApp::new(cc, deck, start)))),
    )
    .map_err(|e| anyhow!("Viewer failed: {}", e))
}
