//! Control Bar Widget
//! Footer with Previous/Next buttons, slide position markers, the export
//! button and a status line.

use crate::deck::Navigator;
use egui::{Color32, RichText, Sense};

const ACTIVE_MARKER: Color32 = Color32::from_rgb(16, 185, 129); // Emerald 500
const IDLE_MARKER: Color32 = Color32::from_rgb(203, 213, 225); // Slate 300

/// Footer controls for moving through the deck.
pub struct ControlBar {
    pub status: String,
}

impl Default for ControlBar {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
        }
    }
}

impl ControlBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control bar
    pub fn show(&mut self, ui: &mut egui::Ui, navigator: &Navigator) -> ControlBarAction {
        let mut action = ControlBarAction::None;

        ui.horizontal(|ui| {
            ui.add_enabled_ui(!navigator.is_first(), |ui| {
                let button = egui::Button::new(RichText::new("◀ Previous").size(14.0))
                    .min_size(egui::vec2(110.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlBarAction::Previous;
                }
            });

            ui.add_space(12.0);

            // Position markers, the current one drawn wide
            for idx in 0..navigator.total() {
                let active = idx == navigator.current();
                let size = egui::vec2(if active { 24.0 } else { 10.0 }, 10.0);
                let (rect, response) = ui.allocate_exact_size(size, Sense::click());
                let fill = if active {
                    ACTIVE_MARKER
                } else if response.hovered() {
                    ACTIVE_MARKER.gamma_multiply(0.5)
                } else {
                    IDLE_MARKER
                };
                ui.painter().rect_filled(rect, 5.0, fill);
                if response
                    .on_hover_text(format!("Slide {}", idx + 1))
                    .clicked()
                {
                    action = ControlBarAction::GoTo(idx);
                }
            }

            ui.add_space(12.0);

            ui.add_enabled_ui(!navigator.is_last(), |ui| {
                let button = egui::Button::new(RichText::new("Next ▶").size(14.0))
                    .min_size(egui::vec2(110.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlBarAction::Next;
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let export = egui::Button::new(RichText::new("📄 Export PPTX").size(14.0))
                    .min_size(egui::vec2(140.0, 30.0));
                if ui.add(export).clicked() {
                    action = ControlBarAction::ExportPptx;
                }

                ui.add_space(10.0);
                ui.label(
                    RichText::new(&self.status)
                        .size(11.0)
                        .color(status_color(&self.status)),
                );
            });
        });

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

fn status_color(status: &str) -> Color32 {
    if status.contains("Error") {
        Color32::from_rgb(220, 53, 69)
    } else if status.contains("exported") {
        Color32::from_rgb(40, 167, 69)
    } else {
        Color32::GRAY
    }
}

/// Actions triggered by the control bar
#[derive(Debug, Clone, PartialEq)]
pub enum ControlBarAction {
    None,
    Previous,
    Next,
    GoTo(usize),
    ExportPptx,
}
