//! Pitch Deck Main Application
//! Header with the slide indicator, the current slide in the center and the
//! control bar in the footer. Slide rendering runs behind an error boundary.

use crate::deck::{DeckError, NavKey, Navigator, Slide};
use crate::gui::{ControlBar, ControlBarAction, SlideView};
use crate::ppt::{PptGenerator, DECK_TITLE};
use egui::{Color32, Key, Modifiers, RichText, TopBottomPanel};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

const ERROR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Keys consumed every frame for navigation.
const NAV_KEYS: [Key; 7] = [
    Key::ArrowRight,
    Key::PageDown,
    Key::Space,
    Key::ArrowLeft,
    Key::PageUp,
    Key::Home,
    Key::End,
];

fn nav_key(key: Key) -> Option<NavKey> {
    match key {
        Key::ArrowRight | Key::PageDown | Key::Space => Some(NavKey::Forward),
        Key::ArrowLeft | Key::PageUp => Some(NavKey::Back),
        Key::Home => Some(NavKey::Home),
        Key::End => Some(NavKey::End),
        _ => None,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Main application window.
pub struct DeckApp {
    slides: Vec<Slide>,
    navigator: Navigator,
    slide_view: SlideView,
    control_bar: ControlBar,
    /// Set once a deck load or a slide render fails; the app then shows only
    /// the error screen.
    failure: Option<String>,
}

impl DeckApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        deck: Result<Vec<Slide>, DeckError>,
        start: usize,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self::from_deck(deck, start)
    }

    fn from_deck(deck: Result<Vec<Slide>, DeckError>, start: usize) -> Self {
        let (slides, failure) = match deck {
            Ok(slides) => (slides, None),
            Err(e) => {
                log::error!("Failed to load deck: {}", e);
                (Vec::new(), Some(e.to_string()))
            }
        };

        Self {
            navigator: Navigator::starting_at(slides.len(), start),
            slides,
            slide_view: SlideView::new(),
            control_bar: ControlBar::new(),
            failure,
        }
    }

    /// Navigation keys are consumed here, before any widget is drawn, so a
    /// focused button never also sees them as a click.
    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let pressed = ctx.input_mut(|i| {
            let mut pressed = None;
            for key in NAV_KEYS {
                if i.consume_key(Modifiers::NONE, key) {
                    pressed = pressed.or(nav_key(key));
                }
            }
            pressed
        });
        if let Some(key) = pressed {
            self.navigator.handle_key(key);
        }
    }

    /// Export the deck to a user-chosen PPTX file and open it.
    fn handle_export_pptx(&mut self) {
        let output_path = match rfd::FileDialog::new()
            .add_filter("PowerPoint", &["pptx"])
            .set_file_name("pitch_deck.pptx")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match PptGenerator::export_deck(&self.slides, &output_path, DECK_TITLE) {
            Ok(()) => {
                self.control_bar
                    .set_status(&format!("PPTX exported: {} slides", self.slides.len()));
                if let Err(e) = open::that(&output_path) {
                    log::warn!("Could not open {}: {}", output_path.display(), e);
                }
            }
            Err(e) => {
                log::error!("PPTX export failed: {}", e);
                self.control_bar.set_status(&format!("Export Error: {}", e));
            }
        }
    }

    fn show_deck(&mut self, ctx: &egui::Context) {
        let current = self.navigator.current();

        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("📊 Pitch Deck")
                        .size(20.0)
                        .strong()
                        .color(Color32::from_rgb(5, 150, 105)),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!(
                            "Slide {} of {}",
                            current + 1,
                            self.navigator.total()
                        ))
                        .size(14.0)
                        .color(Color32::GRAY),
                    );
                });
            });
            ui.add_space(6.0);
        });

        TopBottomPanel::bottom("control_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            let action = self.control_bar.show(ui, &self.navigator);
            ui.add_space(6.0);

            match action {
                ControlBarAction::Previous => {
                    self.navigator.previous();
                }
                ControlBarAction::Next => {
                    self.navigator.next();
                }
                ControlBarAction::GoTo(index) => {
                    self.navigator.go_to(index);
                }
                ControlBarAction::ExportPptx => self.handle_export_pptx(),
                ControlBarAction::None => {}
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(slide) = self.slides.get(self.navigator.current()) {
                self.slide_view.show(ui, slide);
            }
        });
    }

    fn show_failure(ctx: &egui::Context, message: &str) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(120.0);
                ui.label(
                    RichText::new("Application Error")
                        .size(28.0)
                        .strong()
                        .color(ERROR_RED),
                );
                ui.add_space(8.0);
                ui.label(
                    RichText::new("The presentation could not be displayed.")
                        .size(14.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(16.0);
                egui::Frame::none()
                    .rounding(8.0)
                    .stroke(egui::Stroke::new(1.0, ERROR_RED))
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new(message).monospace());
                    });
            });
        });
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(message) = &self.failure {
            Self::show_failure(ctx, message);
            return;
        }

        self.handle_keyboard(ctx);

        let rendered = panic::catch_unwind(AssertUnwindSafe(|| self.show_deck(ctx)));
        if let Err(payload) = rendered {
            let message = panic_message(payload.as_ref());
            log::error!(
                "Rendering slide {} failed: {}",
                self.navigator.current() + 1,
                message
            );
            self.failure = Some(message);
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::DeckLoader;

    #[test]
    fn test_nav_key_bindings() {
        assert_eq!(nav_key(Key::ArrowRight), Some(NavKey::Forward));
        assert_eq!(nav_key(Key::PageDown), Some(NavKey::Forward));
        assert_eq!(nav_key(Key::Space), Some(NavKey::Forward));
        assert_eq!(nav_key(Key::ArrowLeft), Some(NavKey::Back));
        assert_eq!(nav_key(Key::PageUp), Some(NavKey::Back));
        assert_eq!(nav_key(Key::Home), Some(NavKey::Home));
        assert_eq!(nav_key(Key::End), Some(NavKey::End));
        assert_eq!(nav_key(Key::A), None);
    }

    #[test]
    fn test_every_polled_key_is_bound() {
        for key in NAV_KEYS {
            assert!(nav_key(key).is_some(), "{:?} is polled but unbound", key);
        }
    }

    fn key_event(key: Key) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    fn run_frame(ctx: &egui::Context, app: &mut DeckApp, events: Vec<egui::Event>) {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            app.handle_keyboard(ctx);
            app.show_deck(ctx);
        });
    }

    #[test]
    fn test_space_advances_once_whatever_has_focus() {
        // Walk keyboard focus across every footer control in turn.
        for tabs in 0..12 {
            let ctx = egui::Context::default();
            let mut app = DeckApp::from_deck(DeckLoader::load_embedded(), 0);
            run_frame(&ctx, &mut app, Vec::new());
            for _ in 0..tabs {
                run_frame(&ctx, &mut app, vec![key_event(Key::Tab)]);
            }

            run_frame(&ctx, &mut app, vec![key_event(Key::Space)]);
            assert_eq!(app.navigator.current(), 1, "after {} tabs", tabs);
            assert_eq!(app.control_bar.status, "Ready", "after {} tabs", tabs);
        }
    }

    #[test]
    fn test_arrow_keys_move_one_slide() {
        let ctx = egui::Context::default();
        let mut app = DeckApp::from_deck(DeckLoader::load_embedded(), 3);
        run_frame(&ctx, &mut app, Vec::new());

        run_frame(&ctx, &mut app, vec![key_event(Key::ArrowRight)]);
        assert_eq!(app.navigator.current(), 4);
        run_frame(&ctx, &mut app, vec![key_event(Key::ArrowLeft)]);
        assert_eq!(app.navigator.current(), 3);
        run_frame(&ctx, &mut app, vec![key_event(Key::End)]);
        assert_eq!(app.navigator.current(), 6);
        run_frame(&ctx, &mut app, vec![key_event(Key::Home)]);
        assert_eq!(app.navigator.current(), 0);
    }

    #[test]
    fn test_deck_load_failure_shows_error_screen() {
        let app = DeckApp::from_deck(Err(DeckError::Empty), 0);
        assert_eq!(app.failure.as_deref(), Some("Deck contains no slides"));
    }

    #[test]
    fn test_panic_message() {
        let payload = panic::catch_unwind(|| panic!("bad slide")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "bad slide");

        let payload = panic::catch_unwind(|| panic!("slide {}", 3)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "slide 3");
    }
}
