//! Deck module - Slide content and navigation

mod loader;
mod model;
mod navigator;

pub use loader::{DeckError, DeckLoader};
pub use model::{CellValue, ChartSpec, ChartType, DataRow, SeriesSpec, Slide};
pub use navigator::{NavKey, Navigator};
