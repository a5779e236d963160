//! Static Chart Renderer
//! Renders chart layouts to PNG images with plotters for the PPTX export.
//!
//! Layout:
//! 1. Chart title centered at the top
//! 2. Plot area: bars / lines / areas with value labels, or pie/donut wedges
//! 3. Series legend (cartesian) or wedge labels beside each wedge (radial)

use crate::charts::color::Rgb;
use crate::charts::layout::{
    CartesianLayout, ChartLayout, RadialLayout, SeriesKind, AREA_FILL_ALPHA,
};
use crate::deck::ChartSpec;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use thiserror::Error;

const FONT: &str = "sans-serif";
const LABEL_COLOR: RGBColor = RGBColor(51, 65, 85); // Slate 700
const AXIS_COLOR: RGBColor = RGBColor(100, 116, 139); // Slate 500
const GRID_COLOR: RGBColor = RGBColor(226, 232, 240); // Slate 200

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart drawing failed: {0}")]
    Drawing(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Rendered buffer does not match {0}x{1}")]
    Buffer(u32, u32),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(err.to_string())
    }
}

fn rgb([r, g, b]: Rgb) -> RGBColor {
    RGBColor(r, g, b)
}

/// Renders chart specs to static images.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one chart to PNG bytes.
    pub fn render_png(spec: &ChartSpec, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let layout = ChartLayout::build(spec);
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;
            let body = root.titled(&spec.title, (FONT, 26).into_font().color(&LABEL_COLOR))?;

            match &layout {
                ChartLayout::Cartesian(chart) => Self::draw_cartesian(&body, chart)?,
                ChartLayout::Radial(chart) => Self::draw_radial(&body, chart)?,
                ChartLayout::Empty => {}
            }
            root.present()?;
        }

        let image =
            RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer(width, height))?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn draw_cartesian<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        chart: &CartesianLayout,
    ) -> Result<(), RenderError>
    where
        DB::ErrorType: 'static,
    {
        let (low, high) = chart.value_range;
        let count = chart.categories.len().max(1);
        let categories = &chart.categories;
        let formatter = &chart.formatter;

        let mut ctx = ChartBuilder::on(area)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5f64..(count as f64 - 0.5), low..high)?;

        let x_label = |x: &f64| {
            let idx = x.round();
            if idx >= 0.0 && (idx - x).abs() < 1e-6 {
                categories.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        };
        let y_label = |y: &f64| formatter.tick(*y);

        ctx.configure_mesh()
            .disable_x_mesh()
            .light_line_style(GRID_COLOR)
            .bold_line_style(GRID_COLOR)
            .axis_style(AXIS_COLOR.stroke_width(2))
            .x_labels(count)
            .x_label_formatter(&x_label)
            .y_label_formatter(&y_label)
            .label_style((FONT, 16).into_font().color(&LABEL_COLOR))
            .draw()?;

        for series in &chart.series {
            let color = rgb(series.color);
            let coords: Vec<(f64, f64)> = series.points.iter().map(|p| (p.x, p.value)).collect();

            let drawn = match series.kind {
                SeriesKind::Bar => {
                    let half = series.bar_width / 2.0;
                    ctx.draw_series(coords.iter().map(|&(x, v)| {
                        Rectangle::new([(x - half, 0.0), (x + half, v)], color.filled())
                    }))?
                }
                SeriesKind::Line => {
                    ctx.draw_series(
                        coords
                            .iter()
                            .map(|&(x, v)| Circle::new((x, v), 5, color.filled())),
                    )?;
                    ctx.draw_series(LineSeries::new(coords.clone(), color.stroke_width(4)))?
                }
                SeriesKind::Area => ctx.draw_series(
                    AreaSeries::new(coords.clone(), 0.0, color.mix(AREA_FILL_ALPHA as f64))
                        .border_style(color.stroke_width(3)),
                )?,
            };
            drawn.label(series.name.clone()).legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled())
            });

            let label_color = if series.kind == SeriesKind::Bar {
                LABEL_COLOR
            } else {
                color
            };
            let style = TextStyle::from((FONT, 18).into_font())
                .color(&label_color)
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            ctx.draw_series(
                series
                    .points
                    .iter()
                    .map(|p| Text::new(p.label.clone(), (p.x, p.value), style.clone())),
            )?;
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(GRID_COLOR)
            .label_font((FONT, 16).into_font().color(&LABEL_COLOR))
            .draw()?;
        Ok(())
    }

    fn draw_radial<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        chart: &RadialLayout,
    ) -> Result<(), RenderError>
    where
        DB::ErrorType: 'static,
    {
        let (w, h) = area.dim_in_pixel();
        let center = (w as f64 / 2.0, h as f64 / 2.0);
        let outer = (w.min(h) as f64 * 0.32).max(1.0);

        // Screen y grows downward, so angles are mirrored.
        let to_px = |angle: f64, radius: f64| {
            (
                (center.0 + radius * angle.cos()).round() as i32,
                (center.1 - radius * angle.sin()).round() as i32,
            )
        };

        for wedge in &chart.wedges {
            let outline: Vec<(i32, i32)> = wedge
                .outline(chart.inner_ratio, 1.0)
                .into_iter()
                .map(|[x, y]| {
                    (
                        (center.0 + outer * x).round() as i32,
                        (center.1 - outer * y).round() as i32,
                    )
                })
                .collect();
            area.draw(&Polygon::new(outline, rgb(wedge.color).filled()))?;

            let mid = wedge.mid_angle();
            let hpos = if mid.cos() >= 0.0 { HPos::Left } else { HPos::Right };
            let style = TextStyle::from((FONT, 18).into_font())
                .color(&LABEL_COLOR)
                .pos(Pos::new(hpos, VPos::Center));
            area.draw(&Text::new(wedge.label.clone(), to_px(mid, outer * 1.15), style))?;
        }
        Ok(())
    }
}
