//! Chart Layout Module
//! Turns a `ChartSpec` into a renderer-neutral plan: plotted series with
//! pre-formatted labels and a shared value range, or pie/donut wedges.
//! Both the interactive plotter and the static renderer draw from this.

use crate::charts::color::{self, Rgb};
use crate::charts::format::ValueFormatter;
use crate::deck::{ChartSpec, ChartType, SeriesSpec};
use std::f64::consts::TAU;

/// Wedge colors, cycled by row.
pub const WEDGE_PALETTE: [Rgb; 5] = [
    [16, 185, 129], // #10b981
    [59, 130, 246], // #3b82f6
    [239, 68, 68],  // #ef4444
    [245, 158, 11], // #f59e0b
    [139, 92, 246], // #8b5cf6
];

/// Donut hole as a fraction of the outer radius.
pub const DONUT_INNER_RATIO: f64 = 0.7;

/// Gap between wedges.
pub const WEDGE_PADDING: f64 = 5.0 * std::f64::consts::PI / 180.0;

/// Share of a category slot covered by its bar group.
const GROUP_WIDTH: f64 = 0.8;

/// Width of the single bar series in a composed chart.
const COMPOSED_BAR_WIDTH: f64 = 0.6;

/// Fill opacity under area series, shared by both back ends.
pub const AREA_FILL_ALPHA: f32 = 0.2;

/// Room above the tallest value for labels.
const VALUE_HEADROOM: f64 = 1.15;

/// Segments per full circle when tessellating wedges.
const ARC_SEGMENTS: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Bar,
    Line,
    Area,
}

/// One numeric point of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub row: usize,
    /// Horizontal position in category units (bars are offset within the slot).
    pub x: f64,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub name: String,
    pub color: Rgb,
    pub kind: SeriesKind,
    /// Bar width in category units; zero for lines and areas.
    pub bar_width: f64,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone)]
pub struct CartesianLayout {
    pub categories: Vec<String>,
    pub series: Vec<PlotSeries>,
    /// Shared value axis: (low, high).
    pub value_range: (f64, f64),
    pub formatter: ValueFormatter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub row: usize,
    pub category: String,
    pub value: f64,
    /// `"<category>: <formatted value>"`
    pub label: String,
    pub color: Rgb,
    /// Radians, counter-clockwise from 3 o'clock.
    pub start_angle: f64,
    pub sweep: f64,
}

impl Wedge {
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep / 2.0
    }

    fn arc_steps(&self) -> usize {
        ((self.sweep / TAU) * ARC_SEGMENTS).ceil().max(2.0) as usize
    }

    fn arc_point(&self, radius: f64, i: usize, steps: usize) -> [f64; 2] {
        let angle = self.start_angle + self.sweep * i as f64 / steps as f64;
        [radius * angle.cos(), radius * angle.sin()]
    }

    /// Closed outline of the wedge as a ring segment around the origin.
    /// With `inner == 0` the outline closes at the center (a pie slice).
    pub fn outline(&self, inner: f64, outer: f64) -> Vec<[f64; 2]> {
        let steps = self.arc_steps();
        let mut points: Vec<[f64; 2]> = (0..=steps)
            .map(|i| self.arc_point(outer, i, steps))
            .collect();
        if inner > 0.0 {
            points.extend((0..=steps).rev().map(|i| self.arc_point(inner, i, steps)));
        } else {
            points.push([0.0, 0.0]);
        }
        points
    }

    /// The same area as `outline`, split into convex pieces (one per arc
    /// step) for back ends that only fill convex polygons.
    pub fn convex_pieces(&self, inner: f64, outer: f64) -> Vec<Vec<[f64; 2]>> {
        let steps = self.arc_steps();
        (0..steps)
            .map(|i| {
                let a = self.arc_point(outer, i, steps);
                let b = self.arc_point(outer, i + 1, steps);
                if inner > 0.0 {
                    vec![
                        a,
                        b,
                        self.arc_point(inner, i + 1, steps),
                        self.arc_point(inner, i, steps),
                    ]
                } else {
                    vec![[0.0, 0.0], a, b]
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct RadialLayout {
    /// Zero for pie charts.
    pub inner_ratio: f64,
    pub wedges: Vec<Wedge>,
    pub formatter: ValueFormatter,
}

/// Renderer-neutral chart plan.
#[derive(Debug, Clone)]
pub enum ChartLayout {
    Cartesian(CartesianLayout),
    Radial(RadialLayout),
    /// Nothing to draw (unsupported chart type).
    Empty,
}

impl ChartLayout {
    /// Dispatch on the chart type. Same spec, same layout.
    pub fn build(spec: &ChartSpec) -> Self {
        let formatter = ValueFormatter::for_chart(spec);
        match spec.chart_type {
            ChartType::Bar => Self::cartesian(spec, formatter, |_| SeriesKind::Bar),
            ChartType::Line => Self::cartesian(spec, formatter, |_| SeriesKind::Line),
            ChartType::Area => Self::cartesian(spec, formatter, |_| SeriesKind::Area),
            ChartType::Composed => Self::cartesian(spec, formatter, |idx| {
                if idx == 0 {
                    SeriesKind::Bar
                } else {
                    SeriesKind::Line
                }
            }),
            ChartType::Donut => Self::radial(spec, formatter, DONUT_INNER_RATIO),
            ChartType::Pie => Self::radial(spec, formatter, 0.0),
            ChartType::Scatter | ChartType::Unsupported => {
                log::warn!(
                    "Chart '{}' has type {:?}, which has no renderer; drawing nothing",
                    spec.title,
                    spec.chart_type
                );
                ChartLayout::Empty
            }
        }
    }

    fn cartesian(
        spec: &ChartSpec,
        formatter: ValueFormatter,
        kind_of: impl Fn(usize) -> SeriesKind,
    ) -> Self {
        let kinds: Vec<SeriesKind> = (0..spec.data_keys.len()).map(kind_of).collect();
        let bar_count = kinds.iter().filter(|k| **k == SeriesKind::Bar).count();
        let mixed_kinds = bar_count > 0 && bar_count < kinds.len();
        let bar_width = if mixed_kinds {
            COMPOSED_BAR_WIDTH
        } else {
            GROUP_WIDTH / bar_count.max(1) as f64
        };

        let mut bar_slot = 0;
        let series = spec
            .data_keys
            .iter()
            .zip(kinds.iter())
            .map(|(series_spec, &kind)| {
                let (offset, width) = if kind == SeriesKind::Bar {
                    let offset = bar_offset(bar_slot, bar_count, bar_width);
                    bar_slot += 1;
                    (offset, bar_width)
                } else {
                    (0.0, 0.0)
                };
                Self::plot_series(spec, series_spec, kind, offset, width, &formatter)
            })
            .collect::<Vec<_>>();

        let value_range = value_range(&series);

        ChartLayout::Cartesian(CartesianLayout {
            categories: spec.categories(),
            series,
            value_range,
            formatter,
        })
    }

    fn plot_series(
        spec: &ChartSpec,
        series_spec: &SeriesSpec,
        kind: SeriesKind,
        offset: f64,
        bar_width: f64,
        formatter: &ValueFormatter,
    ) -> PlotSeries {
        let points = spec
            .data
            .iter()
            .enumerate()
            .filter_map(|(row, data_row)| {
                let cell = data_row.get(&series_spec.key)?;
                let value = cell.as_number()?;
                Some(SeriesPoint {
                    row,
                    x: row as f64 + offset,
                    value,
                    label: formatter.cell(cell, Some(row)),
                })
            })
            .collect();

        PlotSeries {
            name: series_spec.display_name().to_string(),
            color: color::rgb_or_fallback(&series_spec.color),
            kind,
            bar_width,
            points,
        }
    }

    fn radial(spec: &ChartSpec, formatter: ValueFormatter, inner_ratio: f64) -> Self {
        let Some(series_spec) = spec.data_keys.first() else {
            log::warn!("Chart '{}' has no series to draw wedges from", spec.title);
            return ChartLayout::Empty;
        };

        let values: Vec<(usize, f64)> = spec
            .data
            .iter()
            .enumerate()
            .filter_map(|(row, data_row)| {
                let value = data_row.get(&series_spec.key)?.as_number()?;
                Some((row, value.max(0.0)))
            })
            .collect();

        let total: f64 = values.iter().map(|(_, v)| v).sum();
        let padding = if values.len() > 1 { WEDGE_PADDING } else { 0.0 };
        let available = (TAU - padding * values.len() as f64).max(0.0);

        let mut angle = 0.0;
        let mut wedges = Vec::with_capacity(values.len());
        if total > 0.0 {
            for (row, value) in values {
                let sweep = available * value / total;
                let category = spec.category(row).unwrap_or_default();
                wedges.push(Wedge {
                    row,
                    label: format!("{}: {}", category, formatter.number(value, Some(row))),
                    category,
                    value,
                    color: WEDGE_PALETTE[row % WEDGE_PALETTE.len()],
                    start_angle: angle,
                    sweep,
                });
                angle += sweep + padding;
            }
        }

        ChartLayout::Radial(RadialLayout {
            inner_ratio,
            wedges,
            formatter,
        })
    }
}

/// Center offset of bar `slot` among `count` bars of width `width`.
fn bar_offset(slot: usize, count: usize, width: f64) -> f64 {
    (slot as f64 - (count as f64 - 1.0) / 2.0) * width
}

fn value_range(series: &[PlotSeries]) -> (f64, f64) {
    let values = series.iter().flat_map(|s| s.points.iter().map(|p| p.value));
    let (min, max) = values.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let high = if max > 0.0 { max * VALUE_HEADROOM } else { 1.0 };
    let low = if min < 0.0 { min * VALUE_HEADROOM } else { 0.0 };
    (low, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{CellValue, DataRow};

    fn row(category: &str, values: &[(&str, f64)]) -> DataRow {
        let mut r = DataRow::new();
        r.insert("cat".into(), CellValue::from(category));
        for (k, v) in values {
            r.insert(k.to_string(), CellValue::Number(*v));
        }
        r
    }

    fn series(key: &str) -> SeriesSpec {
        SeriesSpec {
            key: key.into(),
            color: "#10b981".into(),
            name: None,
        }
    }

    fn spec(chart_type: ChartType, data: Vec<DataRow>, keys: &[&str]) -> ChartSpec {
        ChartSpec {
            title: "test".into(),
            chart_type,
            data,
            data_keys: keys.iter().map(|k| series(k)).collect(),
            x_axis_key: "cat".into(),
            note: String::new(),
            suffix: None,
        }
    }

    fn cartesian(layout: ChartLayout) -> CartesianLayout {
        match layout {
            ChartLayout::Cartesian(c) => c,
            other => panic!("expected cartesian layout, got {:?}", other),
        }
    }

    fn radial(layout: ChartLayout) -> RadialLayout {
        match layout {
            ChartLayout::Radial(r) => r,
            other => panic!("expected radial layout, got {:?}", other),
        }
    }

    #[test]
    fn test_composed_first_series_bars_rest_lines() {
        let data = vec![
            row("2026", &[("a", 4.0), ("b", 22.0), ("c", -3.0)]),
            row("2028", &[("a", 5.0), ("b", 30.0), ("c", 2.0)]),
        ];
        let layout = cartesian(ChartLayout::build(&spec(ChartType::Composed, data, &["a", "b", "c"])));

        let kinds: Vec<SeriesKind> = layout.series.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SeriesKind::Bar, SeriesKind::Line, SeriesKind::Line]);

        let (low, high) = layout.value_range;
        for s in &layout.series {
            for p in &s.points {
                assert!(p.value >= low && p.value <= high);
            }
        }
        assert!(high >= 30.0);
        assert!(low <= -3.0);
        // The lone bar series sits centered in its slot.
        assert_eq!(layout.series[0].points[1].x, 1.0);
    }

    #[test]
    fn test_bar_groups_are_spread_symmetrically() {
        let data = vec![row("Year 1", &[("base", 409.0), ("green", 166.0)])];
        let layout = cartesian(ChartLayout::build(&spec(ChartType::Bar, data, &["base", "green"])));

        let xs: Vec<f64> = layout.series.iter().map(|s| s.points[0].x).collect();
        assert!((xs[0] + 0.2).abs() < 1e-9);
        assert!((xs[1] - 0.2).abs() < 1e-9);
        assert!(layout.series.iter().all(|s| (s.bar_width - 0.4).abs() < 1e-9));
    }

    #[test]
    fn test_line_and_area_kinds_and_labels() {
        let data = vec![row("Y1", &[("rev", 202.0)]), row("Y5", &[("rev", 1070.0)])];
        let mut line = spec(ChartType::Line, data.clone(), &["rev"]);
        line.suffix = Some("M".into());
        let layout = cartesian(ChartLayout::build(&line));

        assert_eq!(layout.categories, vec!["Y1".to_string(), "Y5".to_string()]);
        assert_eq!(layout.series[0].kind, SeriesKind::Line);
        let labels: Vec<&str> = layout.series[0].points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["202M", "1.1B"]);

        let area = cartesian(ChartLayout::build(&spec(ChartType::Area, data, &["rev"])));
        assert_eq!(area.series[0].kind, SeriesKind::Area);
        assert_eq!(area.series[0].bar_width, 0.0);
    }

    #[test]
    fn test_mixed_suffix_labels_follow_rows() {
        let data = vec![
            row("CAGR %", &[("blitz", 13.5)]),
            row("EBITDA Mult", &[("blitz", 23.5)]),
        ];
        let mut chart = spec(ChartType::Bar, data, &["blitz"]);
        chart.suffix = Some("mixed".into());
        let layout = cartesian(ChartLayout::build(&chart));

        let labels: Vec<&str> = layout.series[0].points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["13.5%", "23.5x"]);
    }

    #[test]
    fn test_non_numeric_cells_are_skipped() {
        let mut bad = row("Q2", &[]);
        bad.insert("v".into(), CellValue::from("n/a"));
        let data = vec![row("Q1", &[("v", 3.0)]), bad];
        let layout = cartesian(ChartLayout::build(&spec(ChartType::Bar, data, &["v"])));

        assert_eq!(layout.series[0].points.len(), 1);
        assert_eq!(layout.categories.len(), 2);
    }

    #[test]
    fn test_donut_and_pie_wedges() {
        let data = vec![
            row("New Installs", &[("value", 59.5)]),
            row("Modernization", &[("value", 15.2)]),
            row("The Dirty Gap", &[("value", 158.2)]),
        ];
        let mut donut_spec = spec(ChartType::Donut, data.clone(), &["value", "ignored"]);
        donut_spec.suffix = Some("B".into());
        let donut = radial(ChartLayout::build(&donut_spec));

        assert_eq!(donut.inner_ratio, DONUT_INNER_RATIO);
        assert_eq!(donut.wedges.len(), 3);
        assert_eq!(donut.wedges[0].label, "New Installs: 59.5B");
        assert_eq!(donut.wedges[2].color, WEDGE_PALETTE[2]);

        let swept: f64 = donut.wedges.iter().map(|w| w.sweep).sum();
        assert!((swept + 3.0 * WEDGE_PADDING - TAU).abs() < 1e-9);
        assert!(donut.wedges[2].sweep > donut.wedges[0].sweep);

        let pie = radial(ChartLayout::build(&spec(ChartType::Pie, data, &["value"])));
        assert_eq!(pie.inner_ratio, 0.0);
        assert_eq!(pie.wedges[1].label, "Modernization: 15.2");
    }

    #[test]
    fn test_pie_without_series_is_empty() {
        let data = vec![row("a", &[("v", 1.0)])];
        assert!(matches!(
            ChartLayout::build(&spec(ChartType::Pie, data, &[])),
            ChartLayout::Empty
        ));
    }

    #[test]
    fn test_unsupported_types_render_nothing() {
        let data = vec![row("a", &[("v", 1.0)])];
        for chart_type in [ChartType::Scatter, ChartType::Unsupported] {
            let layout = ChartLayout::build(&spec(chart_type, data.clone(), &["v"]));
            assert!(matches!(layout, ChartLayout::Empty));
        }
    }

    #[test]
    fn test_series_colors_resolved_at_build() {
        let data = vec![row("a", &[("v", 1.0), ("w", 2.0)])];
        let mut chart = spec(ChartType::Bar, data, &["v", "w"]);
        chart.data_keys[1].color = "teal".into();
        let layout = cartesian(ChartLayout::build(&chart));

        assert_eq!(layout.series[0].color, [16, 185, 129]);
        assert_eq!(layout.series[1].color, color::FALLBACK_RGB);
    }

    #[test]
    fn test_area_fill_is_translucent() {
        assert!((AREA_FILL_ALPHA - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let data = vec![row("a", &[("v", 1.0), ("w", 2.0)]), row("b", &[("v", 3.0), ("w", 4.0)])];
        let chart = spec(ChartType::Composed, data, &["v", "w"]);
        let first = cartesian(ChartLayout::build(&chart));
        let second = cartesian(ChartLayout::build(&chart));

        assert_eq!(first.series, second.series);
        assert_eq!(first.value_range, second.value_range);
    }

    fn wedge(start_angle: f64, sweep: f64) -> Wedge {
        Wedge {
            row: 0,
            category: "a".into(),
            value: 1.0,
            label: "a: 1".into(),
            color: WEDGE_PALETTE[0],
            start_angle,
            sweep,
        }
    }

    #[test]
    fn test_pie_slice_outline_closes_at_center() {
        let outline = wedge(0.0, std::f64::consts::FRAC_PI_2).outline(0.0, 1.0);
        assert_eq!(outline.last(), Some(&[0.0, 0.0]));
        let first = outline[0];
        assert!((first[0] - 1.0).abs() < 1e-9 && first[1].abs() < 1e-9);
    }

    #[test]
    fn test_donut_outline_returns_along_inner_arc() {
        let outline = wedge(0.0, 1.0).outline(DONUT_INNER_RATIO, 1.0);
        let last = outline.last().unwrap();
        let radius = (last[0] * last[0] + last[1] * last[1]).sqrt();
        assert!((radius - DONUT_INNER_RATIO).abs() < 1e-9);
        assert_eq!(outline.len() % 2, 0);
    }

    #[test]
    fn test_convex_pieces_cover_the_sweep() {
        for (inner, corners) in [(0.0, 3), (DONUT_INNER_RATIO, 4)] {
            let w = wedge(0.5, 2.0);
            let pieces = w.convex_pieces(inner, 1.0);
            assert!(pieces.len() >= 2);
            assert!(pieces.iter().all(|p| p.len() == corners));

            let angle = |p: [f64; 2]| p[1].atan2(p[0]);
            let first_outer = pieces[0][if inner > 0.0 { 0 } else { 1 }];
            let last_outer = pieces[pieces.len() - 1][if inner > 0.0 { 1 } else { 2 }];
            assert!((angle(first_outer) - 0.5).abs() < 1e-9);
            assert!((angle(last_outer) - 2.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_data_has_unit_range() {
        let layout = cartesian(ChartLayout::build(&spec(ChartType::Line, Vec::new(), &["v"])));
        assert_eq!(layout.value_range, (0.0, 1.0));
        assert!(layout.series[0].points.is_empty());
    }
}
