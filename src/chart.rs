// Line chart rasterizer: several series on one shared set of axes.
// Visual: white background, framed plot area with ticks and labels,
// each series as a 2 px colored polyline, legend in the top-left corner.

use crate::draw::{
    GLYPH_HEIGHT, draw_line, draw_rect, draw_text_5x7, draw_thick_line, fill_rect, text_width,
};
use crate::error::Error;
use crate::types::{FrameBuffer, Series};
use log::debug;

pub const BACKGROUND: u32 = 0x00_FF_FF_FF;
pub const FOREGROUND: u32 = 0x00_00_00_00;
const LEGEND_FRAME: u32 = 0x00_CC_CC_CC;

/// Default color cycle (first two entries of matplotlib's "tab10").
pub const SERIES_COLORS: [u32; 2] = [0x00_1F_77_B4, 0x00_FF_7F_0E];

const LINE_WIDTH: i32 = 2;
const TICK_LENGTH: i32 = 4;
const MAX_TICKS: usize = 8;
const MARGIN_FRACTION: f64 = 0.05;

// Space around the plot area (pixels).
const LEFT: i32 = 48;
const RIGHT: i32 = 16;
const TOP: i32 = 24;
const BOTTOM: i32 = 36;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(MinMax { min: v, max: v }),
            Some(MinMax { min, max }) => Some(MinMax { min: min.min(v), max: max.max(v) }),
        })
    }

    /// Widen by `fraction` of the span on each side; a zero span becomes +-0.5.
    fn padded(self, fraction: f64) -> Self {
        let span = self.max - self.min;
        if span == 0.0 {
            return MinMax { min: self.min - 0.5, max: self.max + 0.5 };
        }
        MinMax { min: self.min - span * fraction, max: self.max + span * fraction }
    }
}

fn linear_step(MinMax { min, max }: MinMax, v: f64) -> f64 {
    (v - min) / (max - min)
}

/// "Nice" tick positions inside `range`: steps of 1, 2, 2.5 or 5 times a power of ten,
/// at most `max_ticks` intervals.
pub fn nice_ticks(range: MinMax, max_ticks: usize) -> Vec<f64> {
    let step = nice_step(range, max_ticks);
    let first = (range.min / step).ceil();
    let eps = step * 1e-9;
    (0..)
        .map(|i| (first + i as f64) * step)
        .take_while(|v| *v <= range.max + eps)
        .map(|v| if v.abs() < eps { 0.0 } else { v })
        .collect()
}

fn nice_step(range: MinMax, max_ticks: usize) -> f64 {
    let raw = (range.max - range.min) / max_ticks.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|f| normalized <= f + 1e-9)
        .unwrap_or(10.0);
    factor * magnitude
}

/// Tick label with just enough decimals to tell neighbouring ticks apart.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = (0..=6)
        .find(|&d| {
            let scaled = step * 10f64.powi(d);
            (scaled - scaled.round()).abs() < 1e-6 * scaled.max(1.0)
        })
        .unwrap_or(6) as usize;
    format!("{value:.decimals$}")
}

/// Data bounds mapped onto the pixel rectangle of the plot area.
#[derive(Clone, Copy, Debug)]
pub struct Axes {
    pub x: MinMax,
    pub y: MinMax,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Axes {
    /// Data coordinates -> pixel coordinates (y grows downwards on screen).
    pub fn to_px(&self, x: f64, y: f64) -> (i32, i32) {
        let px = self.left as f64 + linear_step(self.x, x) * (self.width - 1) as f64;
        let py = (self.top + self.height - 1) as f64 - linear_step(self.y, y) * (self.height - 1) as f64;
        (px.round() as i32, py.round() as i32)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Chart {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub series: Vec<Series>,
}

impl Chart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Add a line series; all series share the same axes.
    pub fn plot(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Axes covering every point of every series, padded like matplotlib's autoscale.
    pub fn axes(&self, width: u32, height: u32) -> Result<Axes, Error> {
        let points = || self.series.iter().flat_map(|s| s.points.iter());
        let x = MinMax::of(points().map(|p| p.0)).ok_or(Error::EmptyChart)?;
        let y = MinMax::of(points().map(|p| p.1)).ok_or(Error::EmptyChart)?;
        Ok(Axes {
            x: x.padded(MARGIN_FRACTION),
            y: y.padded(MARGIN_FRACTION),
            left: LEFT,
            top: TOP,
            width: (width as i32 - LEFT - RIGHT).max(2),
            height: (height as i32 - TOP - BOTTOM).max(2),
        })
    }

    /// Rasterize the whole chart into a new buffer.
    pub fn render(&self, width: u32, height: u32) -> Result<FrameBuffer, Error> {
        let axes = self.axes(width, height)?;
        debug!("chart axes: x {:?}, y {:?}", axes.x, axes.y);

        let mut fb = FrameBuffer::filled(width as usize, height as usize, BACKGROUND);
        draw_rect(&mut fb, axes.left - 1, axes.top - 1, axes.width + 2, axes.height + 2, FOREGROUND);
        draw_x_ticks(&mut fb, &axes);
        draw_y_ticks(&mut fb, &axes);

        for series in &self.series {
            let px: Vec<(i32, i32)> = series.points.iter().map(|&(x, y)| axes.to_px(x, y)).collect();
            match px.as_slice() {
                [] => {}
                [(x, y)] => draw_thick_line(&mut fb, *x, *y, *x, *y, LINE_WIDTH, series.color),
                _ => {
                    for w in px.windows(2) {
                        let ((x0, y0), (x1, y1)) = (w[0], w[1]);
                        draw_thick_line(&mut fb, x0, y0, x1, y1, LINE_WIDTH, series.color);
                    }
                }
            }
        }

        self.draw_legend(&mut fb, &axes);

        if let Some(title) = &self.title {
            let x = (width as i32 - text_width(title)) / 2;
            draw_text_5x7(&mut fb, x, (TOP - GLYPH_HEIGHT) / 2, title, FOREGROUND);
        }
        if let Some(caption) = &self.caption {
            let x = axes.left + axes.width - text_width(caption);
            draw_text_5x7(&mut fb, x, height as i32 - GLYPH_HEIGHT - 4, caption, FOREGROUND);
        }
        Ok(fb)
    }

    fn draw_legend(&self, fb: &mut FrameBuffer, axes: &Axes) {
        if self.series.is_empty() {
            return;
        }
        let swatch = 16;
        let row = GLYPH_HEIGHT + 5;
        let label_w = self.series.iter().map(|s| text_width(&s.label)).max().unwrap_or(0);
        let (x, y) = (axes.left + 8, axes.top + 8);
        let (w, h) = (swatch + label_w + 14, row * self.series.len() as i32 + 6);

        fill_rect(fb, x, y, w, h, BACKGROUND);
        draw_rect(fb, x, y, w, h, LEGEND_FRAME);
        for (i, series) in self.series.iter().enumerate() {
            let cy = y + 4 + row * i as i32 + GLYPH_HEIGHT / 2;
            draw_thick_line(fb, x + 4, cy, x + 4 + swatch, cy, LINE_WIDTH, series.color);
            draw_text_5x7(fb, x + swatch + 9, cy - GLYPH_HEIGHT / 2, &series.label, FOREGROUND);
        }
    }
}

fn draw_x_ticks(fb: &mut FrameBuffer, axes: &Axes) {
    let step = nice_step(axes.x, MAX_TICKS);
    let base = axes.top + axes.height;
    for v in nice_ticks(axes.x, MAX_TICKS) {
        let (px, _) = axes.to_px(v, axes.y.min);
        draw_line(fb, px, base, px, base + TICK_LENGTH, FOREGROUND);
        let label = format_tick(v, step);
        draw_text_5x7(fb, px - text_width(&label) / 2, base + TICK_LENGTH + 3, &label, FOREGROUND);
    }
}

fn draw_y_ticks(fb: &mut FrameBuffer, axes: &Axes) {
    let step = nice_step(axes.y, MAX_TICKS);
    let edge = axes.left - 1;
    for v in nice_ticks(axes.y, MAX_TICKS) {
        let (_, py) = axes.to_px(axes.x.min, v);
        draw_line(fb, edge - TICK_LENGTH, py, edge, py, FOREGROUND);
        let label = format_tick(v, step);
        let lx = edge - TICK_LENGTH - 3 - text_width(&label);
        draw_text_5x7(fb, lx, py - GLYPH_HEIGHT / 2, &label, FOREGROUND);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn unit_range_ticks_by_fifths() {
        let ticks = nice_ticks(MinMax { min: 0.0, max: 1.0 }, 8);
        assert!(close(&ticks, &[0.0, 0.2, 0.4, 0.6, 0.8, 1.0]), "{ticks:?}");
    }

    #[test]
    fn padded_index_range_ticks_by_twos() {
        let range = MinMax { min: 0.0, max: 10.0 }.padded(0.05);
        let ticks = nice_ticks(range, 8);
        assert!(close(&ticks, &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]), "{ticks:?}");
    }

    #[test]
    fn tick_labels_drop_needless_decimals() {
        assert_eq!(format_tick(0.2, 0.2), "0.2");
        assert_eq!(format_tick(4.0, 2.0), "4");
        assert_eq!(format_tick(0.25, 0.25), "0.25");
        assert_eq!(format_tick(0.0, 0.2), "0.0");
    }

    #[test]
    fn zero_span_is_widened() {
        let r = MinMax { min: 1.0, max: 1.0 }.padded(0.05);
        assert_eq!(r, MinMax { min: 0.5, max: 1.5 });
    }

    #[test]
    fn empty_chart_is_an_error() {
        assert!(matches!(Chart::new().render(100, 100), Err(Error::EmptyChart)));
    }

    #[test]
    fn axes_cover_all_series_with_margin() {
        let chart = Chart::new()
            .plot(Series::indexed("a", SERIES_COLORS[0], &[0.0, 1.0, 0.5]))
            .plot(Series::xy("b", SERIES_COLORS[1], &[0.0, 1.0], &[0.0, 2.0]));
        let axes = chart.axes(200, 100).unwrap();
        assert!((axes.x.min + 0.1).abs() < 1e-12 && (axes.x.max - 2.1).abs() < 1e-12);
        assert!((axes.y.min + 0.1).abs() < 1e-12 && (axes.y.max - 2.1).abs() < 1e-12);
        assert_eq!(axes.width, 200 - LEFT - RIGHT);
    }

    #[test]
    fn data_corners_map_to_plot_corners() {
        let axes = Axes {
            x: MinMax { min: 0.0, max: 1.0 },
            y: MinMax { min: 0.0, max: 1.0 },
            left: 10,
            top: 20,
            width: 101,
            height: 51,
        };
        assert_eq!(axes.to_px(0.0, 0.0), (10, 70));
        assert_eq!(axes.to_px(1.0, 1.0), (110, 20));
        assert_eq!(axes.to_px(0.5, 0.5), (60, 45));
    }

    #[test]
    fn render_paints_every_series_color() {
        let chart = Chart::new()
            .title("GAMMA")
            .plot(Series::indexed("LUT", SERIES_COLORS[0], &[0.0, 0.5, 1.0]))
            .plot(Series::xy("REF", SERIES_COLORS[1], &[0.0, 2.0], &[1.0, 0.0]));
        let fb = chart.render(320, 240).unwrap();
        assert_eq!(fb.pixels.len(), 320 * 240);
        for color in SERIES_COLORS {
            assert!(fb.pixels.iter().any(|&p| p == color));
        }
        assert!(fb.pixels.iter().any(|&p| p == FOREGROUND));
        assert_eq!(fb.get(0, 0), Some(BACKGROUND));
    }
}
