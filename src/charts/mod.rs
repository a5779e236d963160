//! Charts module - Chart layout, value formatting and rendering

pub mod color;
pub mod format;
pub mod layout;
mod plotter;
mod renderer;

pub use format::{format_value, Suffix, ValueFormatter};
pub use layout::ChartLayout;
pub use plotter::{to_color32, ChartPlotter, AXIS_TEXT, LABEL_TEXT};
pub use renderer::{RenderError, StaticChartRenderer};
