//! Chart Plotter Module
//! Draws chart layouts interactively using egui_plot.

use crate::charts::color::Rgb;
use crate::charts::format::ValueFormatter;
use crate::charts::layout::{
    CartesianLayout, ChartLayout, RadialLayout, SeriesKind, AREA_FILL_ALPHA,
};
use egui::{Align2, Color32, RichText, Stroke};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points,
    Polygon, Text,
};

/// Axis and label text (Slate 600)
pub const AXIS_TEXT: Color32 = Color32::from_rgb(71, 85, 105);
/// Bar value labels (Slate 700)
pub const LABEL_TEXT: Color32 = Color32::from_rgb(51, 65, 85);

pub fn to_color32([r, g, b]: Rgb) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Tooltip text for a point at category position `x`.
fn hover_text(formatter: &ValueFormatter, name: &str, x: f64, value: f64) -> String {
    let row = x.round();
    let row = (row >= 0.0).then_some(row as usize);
    let text = formatter.number(value, row);
    if name.is_empty() {
        text
    } else {
        format!("{}: {}", name, text)
    }
}

/// Draws `ChartLayout`s with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw a chart layout. `id` must be unique per visible chart.
    pub fn draw(ui: &mut egui::Ui, id: &str, layout: &ChartLayout, height: f32) {
        match layout {
            ChartLayout::Cartesian(chart) => Self::draw_cartesian(ui, id, chart, height),
            ChartLayout::Radial(chart) => Self::draw_radial(ui, id, chart, height),
            ChartLayout::Empty => {
                ui.allocate_space(egui::vec2(ui.available_width(), height));
            }
        }
    }

    fn draw_cartesian(ui: &mut egui::Ui, id: &str, chart: &CartesianLayout, height: f32) {
        let categories = chart.categories.clone();
        let category_count = categories.len();
        let tick_formatter = chart.formatter.clone();
        let hover_formatter = chart.formatter.clone();
        let (low, high) = chart.value_range;

        Plot::new(format!("chart_{}", id))
            .height(height)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .show_grid([false, true])
            .include_x(-0.5)
            .include_x(category_count as f64 - 0.5)
            .include_y(low)
            .include_y(high)
            // One tick per category
            .x_grid_spacer(move |_input| {
                (0..category_count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (idx - mark.value).abs() < 1e-6 {
                    categories.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .y_axis_formatter(move |mark, _range| tick_formatter.tick(mark.value))
            .label_formatter(move |name, value| {
                hover_text(&hover_formatter, name, value.x, value.y)
            })
            .show(ui, |plot_ui| {
                for series in &chart.series {
                    let color = to_color32(series.color);
                    let coords: Vec<[f64; 2]> =
                        series.points.iter().map(|p| [p.x, p.value]).collect();

                    match series.kind {
                        SeriesKind::Bar => {
                            let bars: Vec<Bar> = series
                                .points
                                .iter()
                                .map(|p| {
                                    Bar::new(p.x, p.value).width(series.bar_width).fill(color)
                                })
                                .collect();
                            // Bar charts ignore the plot-level label formatter.
                            let formatter = chart.formatter.clone();
                            let name = series.name.clone();
                            plot_ui.bar_chart(
                                BarChart::new(bars)
                                    .color(color)
                                    .name(&series.name)
                                    .element_formatter(Box::new(
                                        move |bar: &Bar, _chart: &BarChart| {
                                            hover_text(&formatter, &name, bar.argument, bar.value)
                                        },
                                    )),
                            );
                        }
                        SeriesKind::Line => {
                            plot_ui.line(
                                Line::new(PlotPoints::from(coords.clone()))
                                    .color(color)
                                    .width(4.0)
                                    .name(&series.name),
                            );
                            plot_ui.points(
                                Points::new(PlotPoints::from(coords))
                                    .shape(MarkerShape::Circle)
                                    .filled(true)
                                    .radius(5.0)
                                    .color(color)
                                    .name(&series.name),
                            );
                        }
                        SeriesKind::Area => {
                            plot_ui.line(
                                Line::new(PlotPoints::from(coords))
                                    .color(color)
                                    .width(3.0)
                                    .fill(0.0_f32)
                                    .fill_alpha(AREA_FILL_ALPHA)
                                    .name(&series.name),
                            );
                        }
                    }

                    // Value label above every point
                    let label_color = if series.kind == SeriesKind::Bar {
                        LABEL_TEXT
                    } else {
                        color
                    };
                    for p in &series.points {
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(p.x, p.value),
                                RichText::new(&p.label).size(15.0).strong(),
                            )
                            .color(label_color)
                            .anchor(Align2::CENTER_BOTTOM),
                        );
                    }
                }
            });
    }

    fn draw_radial(ui: &mut egui::Ui, id: &str, chart: &RadialLayout, height: f32) {
        let inner = chart.inner_ratio;
        let hover_labels: Vec<(String, String)> = chart
            .wedges
            .iter()
            .map(|w| (w.category.clone(), w.label.clone()))
            .collect();

        Plot::new(format!("chart_{}", id))
            .height(height)
            .data_aspect(1.0)
            .legend(Legend::default())
            .show_axes(false)
            .show_grid(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_x(-2.2)
            .include_x(2.2)
            .include_y(-1.3)
            .include_y(1.3)
            .label_formatter(move |name, _value| {
                hover_labels
                    .iter()
                    .find(|(category, _)| category == name)
                    .map(|(_, label)| label.clone())
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for wedge in &chart.wedges {
                    let color = to_color32(wedge.color);
                    // Pieces share the wedge name so the legend lists each wedge once.
                    for piece in wedge.convex_pieces(inner, 1.0) {
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::from(piece))
                                .fill_color(color)
                                .stroke(Stroke::new(1.0, color))
                                .name(&wedge.category),
                        );
                    }

                    let mid = wedge.mid_angle();
                    let anchor = if mid.cos() >= 0.0 {
                        Align2::LEFT_CENTER
                    } else {
                        Align2::RIGHT_CENTER
                    };
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(1.15 * mid.cos(), 1.15 * mid.sin()),
                            RichText::new(&wedge.label).size(14.0).strong(),
                        )
                        .color(LABEL_TEXT)
                        .anchor(anchor),
                    );
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::charts::format::Suffix;

    #[test]
    fn test_to_color32() {
        assert_eq!(to_color32([16, 185, 129]), Color32::from_rgb(16, 185, 129));
    }

    #[test]
    fn test_hover_text_uses_chart_formatter() {
        let formatter = ValueFormatter::new(Suffix::Millions, vec!["2024".into(), "2025".into()]);
        assert_eq!(hover_text(&formatter, "Revenue", 1.2, 1660.0), "Revenue: 1.7B");
        assert_eq!(hover_text(&formatter, "", 0.0, 832.0), "832M");
    }

    #[test]
    fn test_hover_text_bar_offsets_map_to_their_row() {
        let formatter = ValueFormatter::new(
            Suffix::Mixed,
            vec!["CAGR %".into(), "EBITDA Mult".into()],
        );
        // Grouped bars sit up to 0.4 from the category center.
        assert_eq!(hover_text(&formatter, "Target", -0.3, 13.5), "Target: 13.5%");
        assert_eq!(hover_text(&formatter, "Target", 1.3, 23.5), "Target: 23.5x");
    }
}
