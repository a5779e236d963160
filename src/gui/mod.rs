//! GUI module - User interface components

mod app;
mod control_bar;
mod slide_view;

pub use app::DeckApp;
pub use control_bar::{ControlBar, ControlBarAction};
pub use slide_view::SlideView;
