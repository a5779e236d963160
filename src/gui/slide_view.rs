//! Slide View Widget
//! Central scrollable area showing one slide: headline block, two chart
//! cards side by side, key takeaways and keyword tags.

use crate::charts::{ChartLayout, ChartPlotter, AXIS_TEXT, LABEL_TEXT};
use crate::deck::{ChartSpec, Slide};
use egui::{Color32, RichText, ScrollArea};

const CHART_HEIGHT: f32 = 320.0;
const CARD_SPACING: f32 = 15.0;

const ACCENT: Color32 = Color32::from_rgb(5, 150, 105); // Emerald 600
const MUTED: Color32 = Color32::from_rgb(100, 116, 139); // Slate 500
const QUOTE_FILL: Color32 = Color32::from_rgb(236, 253, 245); // Emerald 50
const TAG_FILL: Color32 = Color32::from_rgb(241, 245, 249); // Slate 100

/// Displays a slide. Chart layouts are rebuilt only when the slide changes.
#[derive(Default)]
pub struct SlideView {
    slide_id: Option<u32>,
    layouts: Vec<ChartLayout>,
}

impl SlideView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `slide` filling the available space.
    pub fn show(&mut self, ui: &mut egui::Ui, slide: &Slide) {
        if self.slide_id != Some(slide.id) {
            self.layouts = slide
                .charts()
                .iter()
                .map(|spec| ChartLayout::build(spec))
                .collect();
            self.slide_id = Some(slide.id);
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(10.0);
                Self::draw_headline(ui, slide);
                ui.add_space(20.0);

                let layouts = &self.layouts;
                ui.columns(2, |columns| {
                    for (idx, (column, spec)) in
                        columns.iter_mut().zip(slide.charts()).enumerate()
                    {
                        if let Some(layout) = layouts.get(idx) {
                            let id = format!("{}_{}", slide.id, idx + 1);
                            Self::draw_chart_card(column, &id, spec, layout);
                        }
                    }
                });

                ui.add_space(CARD_SPACING);
                Self::draw_takeaways(ui, slide);
                ui.add_space(CARD_SPACING);
                Self::draw_keywords(ui, &slide.keywords);
                ui.add_space(CARD_SPACING);
            });
    }

    fn draw_headline(ui: &mut egui::Ui, slide: &Slide) {
        ui.label(RichText::new(&slide.title).size(30.0).strong().color(ACCENT));
        if let Some(sub_title) = &slide.sub_title {
            ui.label(RichText::new(sub_title).size(18.0).color(MUTED));
        }

        ui.add_space(12.0);

        egui::Frame::none()
            .rounding(8.0)
            .fill(QUOTE_FILL)
            .stroke(egui::Stroke::new(1.0, ACCENT))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(format!("\u{201c}{}\u{201d}", slide.main_message))
                        .size(16.0)
                        .italics()
                        .color(LABEL_TEXT),
                );
            });
    }

    fn draw_chart_card(ui: &mut egui::Ui, id: &str, spec: &ChartSpec, layout: &ChartLayout) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(&spec.title).size(16.0).strong());
                ui.add_space(8.0);

                ChartPlotter::draw(ui, id, layout, CHART_HEIGHT);

                if !spec.note.is_empty() {
                    ui.add_space(8.0);
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new("Analysis:").size(12.0).strong().color(ACCENT));
                        ui.label(RichText::new(&spec.note).size(12.0).color(AXIS_TEXT));
                    });
                }
            });
    }

    fn draw_takeaways(ui: &mut egui::Ui, slide: &Slide) {
        if slide.key_takeaways.is_empty() {
            return;
        }
        ui.label(RichText::new("Key Takeaways").size(18.0).strong().color(ACCENT));
        ui.add_space(6.0);
        for point in &slide.key_takeaways {
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new("•").size(14.0).strong().color(ACCENT));
                ui.label(RichText::new(point).size(14.0).color(LABEL_TEXT));
            });
        }
    }

    fn draw_keywords(ui: &mut egui::Ui, keywords: &[String]) {
        ui.horizontal_wrapped(|ui| {
            for keyword in keywords {
                egui::Frame::none()
                    .rounding(12.0)
                    .fill(TAG_FILL)
                    .inner_margin(egui::Margin::symmetric(10.0, 4.0))
                    .show(ui, |ui| {
                        ui.label(RichText::new(format!("#{}", keyword)).size(12.0).color(MUTED));
                    });
            }
        });
    }
}
