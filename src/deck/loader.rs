//! Deck Loader Module
//! Loads the slide list from the embedded default deck or a JSON file.

use crate::deck::Slide;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Deck shipped with the binary.
const EMBEDDED_DECK: &str = include_str!("../../assets/deck.json");

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to read deck file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid deck JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Deck contains no slides")]
    Empty,
    #[error("Slide at position {position} has id {id}")]
    IdMismatch { position: usize, id: u32 },
}

/// Loads and validates slide decks.
pub struct DeckLoader;

impl DeckLoader {
    /// Parse the deck compiled into the binary.
    pub fn load_embedded() -> Result<Vec<Slide>, DeckError> {
        let slides = Self::parse(EMBEDDED_DECK)?;
        log::info!("Loaded embedded deck ({} slides)", slides.len());
        Ok(slides)
    }

    /// Read a deck from a JSON file.
    pub fn load_file(path: &Path) -> Result<Vec<Slide>, DeckError> {
        let text = fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let slides = Self::parse(&text)?;
        log::info!("Loaded deck {} ({} slides)", path.display(), slides.len());
        Ok(slides)
    }

    /// Load from `path` when given, otherwise the embedded deck.
    pub fn load(path: Option<&Path>) -> Result<Vec<Slide>, DeckError> {
        match path {
            Some(path) => Self::load_file(path),
            None => Self::load_embedded(),
        }
    }

    /// Parse deck JSON and check that ids follow slide positions.
    pub fn parse(json: &str) -> Result<Vec<Slide>, DeckError> {
        let slides: Vec<Slide> = serde_json::from_str(json)?;
        Self::validate(&slides)?;
        Ok(slides)
    }

    fn validate(slides: &[Slide]) -> Result<(), DeckError> {
        if slides.is_empty() {
            return Err(DeckError::Empty);
        }
        for (idx, slide) in slides.iter().enumerate() {
            let position = idx + 1;
            if slide.id as usize != position {
                return Err(DeckError::IdMismatch {
                    position,
                    id: slide.id,
                });
            }
        }
        Ok(())
    }
}
