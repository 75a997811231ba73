use std::error::Error;
use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;

use crate::error::RenderError;

const FONT: &str = "sans-serif";

// 8 x 6 inches at 300 DPI. Sizes below are points scaled to that density.
const PLOT_WIDTH: u32 = 2400;
const PLOT_HEIGHT: u32 = 1800;
const TITLE_SIZE: f64 = 58.0;
const AXIS_DESC_SIZE: f64 = 50.0;
const TICK_SIZE: f64 = 42.0;
const LEGEND_SIZE: f64 = 46.0;
const LINE_WIDTH: u32 = 8;
const MARKER_RADIUS: u32 = 17;
const CROP_PAD: u32 = 30;

pub const PROCESS_COLOR: RGBColor = RGBColor(0x8B, 0x5C, 0xF6);
pub const THREAD_COLOR: RGBColor = RGBColor(0x14, 0xB8, 0xA6);
const GRID_COLOR: RGBColor = RGBColor(0xB0, 0xB0, 0xB0);

/// One labelled line on a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: &'static str,
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub x_desc: &'static str,
    pub y_desc: &'static str,
    pub series: Vec<Series>,
}

impl ChartData {
    fn x_range(&self) -> Range<f64> {
        axis_range(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)))
    }

    fn y_range(&self) -> Range<f64> {
        axis_range(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.1)))
    }
}

/// Draws `chart` and writes it to `path` as a PNG cropped to its content.
/// An existing file at `path` is overwritten.
pub fn render(chart: &ChartData, path: &Path) -> Result<(), RenderError> {
    let mut buffer = vec![0u8; (PLOT_WIDTH * PLOT_HEIGHT * 3) as usize];

    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
        draw_chart(&root, chart).map_err(|e| RenderError::Draw {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    }

    let (x0, y0, x1, y1) = content_bounds(&buffer, PLOT_WIDTH, PLOT_HEIGHT, CROP_PAD)
        .unwrap_or((0, 0, PLOT_WIDTH, PLOT_HEIGHT));
    let size = (x1 - x0, y1 - y0);
    let cropped = crop(&buffer, PLOT_WIDTH, (x0, y0, x1, y1));

    write_png(path, size, cropped).map_err(|e| RenderError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn draw_chart(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    chart: &ChartData,
) -> Result<(), Box<dyn Error>> {
    root.fill(&WHITE)?;

    let mut cc = ChartBuilder::on(root)
        .margin(40)
        .caption(&chart.title, (FONT, TITLE_SIZE, FontStyle::Bold))
        .x_label_area_size(150)
        .y_label_area_size(200)
        .build_cartesian_2d(chart.x_range(), chart.y_range())?;

    cc.configure_mesh()
        .light_line_style(WHITE)
        .bold_line_style(GRID_COLOR.mix(0.3))
        .x_desc(chart.x_desc)
        .y_desc(chart.y_desc)
        .axis_desc_style((FONT, AXIS_DESC_SIZE).into_font())
        .label_style((FONT, TICK_SIZE).into_font())
        .x_label_formatter(&|v| tick_label(*v))
        .y_label_formatter(&|v| tick_label(*v))
        .draw()?;

    for series in &chart.series {
        let color = series.color;
        cc.draw_series(LineSeries::new(
            series.points.iter().copied(),
            color.stroke_width(LINE_WIDTH),
        ))?
        .label(series.label)
        .legend(move |(x, y)| {
            EmptyElement::at((x, y))
                + PathElement::new(vec![(0, 0), (60, 0)], color.stroke_width(LINE_WIDTH))
                + Circle::new((30, 0), MARKER_RADIUS, color.filled())
        });

        cc.draw_series(
            series
                .points
                .iter()
                .map(|&p| Circle::new(p, MARKER_RADIUS, color.filled())),
        )?;
    }

    cc.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT, LEGEND_SIZE))
        .legend_area_size(80)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.2))
        .draw()?;

    root.present()?;
    Ok(())
}

fn write_png(path: &Path, size: (u32, u32), pixels: Vec<u8>) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    let image: BitMapElement<'_, (i32, i32)> =
        BitMapElement::with_owned_buffer((0, 0), size, pixels)
            .ok_or("cropped buffer does not match image size")?;
    root.draw(&image)?;
    root.present()?;
    Ok(())
}

/// Autoscaled axis extent with 5% padding on each side.
fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let mut bounds: Option<(f64, f64)> = None;
    for v in values.filter(|v| v.is_finite()) {
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }

    match bounds {
        None => 0.0..1.0,
        Some((lo, hi)) if hi - lo <= f64::EPSILON * hi.abs().max(1.0) => {
            let pad = if lo == 0.0 { 0.5 } else { lo.abs() * 0.05 };
            lo - pad..hi + pad
        }
        Some((lo, hi)) => {
            let pad = (hi - lo) * 0.05;
            lo - pad..hi + pad
        }
    }
}

fn tick_label(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Smallest box around every non-white pixel, grown by `pad` and clamped to
/// the image. Returns `(x0, y0, x1, y1)` with exclusive ends.
fn content_bounds(
    rgb: &[u8],
    width: u32,
    height: u32,
    pad: u32,
) -> Option<(u32, u32, u32, u32)> {
    let mut found: Option<(u32, u32, u32, u32)> = None;

    for y in 0..height {
        for x in 0..width {
            let i = ((y * width + x) * 3) as usize;
            if rgb[i..i + 3] == [255u8; 3] {
                continue;
            }
            found = Some(match found {
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
                None => (x, y, x + 1, y + 1),
            });
        }
    }

    found.map(|(x0, y0, x1, y1)| {
        (
            x0.saturating_sub(pad),
            y0.saturating_sub(pad),
            (x1 + pad).min(width),
            (y1 + pad).min(height),
        )
    })
}

fn crop(rgb: &[u8], width: u32, (x0, y0, x1, y1): (u32, u32, u32, u32)) -> Vec<u8> {
    let row_len = ((x1 - x0) * 3) as usize;
    let mut out = Vec::with_capacity(row_len * (y1 - y0) as usize);
    for y in y0..y1 {
        let start = ((y * width + x0) * 3) as usize;
        out.extend_from_slice(&rgb[start..start + row_len]);
    }
    out
}
