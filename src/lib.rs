//! Pitch deck viewer: slides with two data-driven charts each, keyboard
//! navigation and PowerPoint export.

pub mod charts;
pub mod deck;
pub mod gui;
pub mod ppt;
