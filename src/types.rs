// Core types shared by the renderer, the window and the exporter.

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // chart width on screen (pixels)
    pub height: usize,     // chart height on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer filled with a single color.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

/// One line series: ordered (x, y) points drawn as connected segments.
/// Visual: a single colored polyline on the chart, named in the legend.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: u32,             // 0x00RRGGBB
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Pair each `y` with its position in the slice (0, 1, 2, ...).
    pub fn indexed(label: &str, color: u32, ys: &[f64]) -> Self {
        let points = ys.iter().enumerate().map(|(i, &y)| (i as f64, y)).collect();
        Self { label: label.to_string(), color, points }
    }

    /// Pair `xs[i]` with `ys[i]`. Both slices must have the same length.
    pub fn xy(label: &str, color: u32, xs: &[f64], ys: &[f64]) -> Self {
        debug_assert_eq!(xs.len(), ys.len(), "series {label:?}: x and y lengths differ");
        let points = xs.iter().copied().zip(ys.iter().copied()).collect();
        Self { label: label.to_string(), color, points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_series_uses_positions_as_x() {
        let s = Series::indexed("lut", 0, &[0.0, 0.5, 1.0]);
        assert_eq!(s.points, vec![(0.0, 0.0), (1.0, 0.5), (2.0, 1.0)]);
    }

    #[test]
    fn xy_series_pairs_by_position() {
        let s = Series::xy("ref", 0, &[0.0, 0.5, 1.0], &[0.0, 0.7, 1.0]);
        assert_eq!(s.points, vec![(0.0, 0.0), (0.5, 0.7), (1.0, 1.0)]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "x and y lengths differ")]
    fn xy_series_rejects_unequal_lengths() {
        Series::xy("ref", 0, &[0.0, 0.5, 1.0], &[0.0, 1.0]);
    }

    #[test]
    fn framebuffer_get_is_bounds_checked() {
        let fb = FrameBuffer::filled(4, 3, 0x00_12_34_56);
        assert_eq!(fb.get(3, 2), Some(0x00_12_34_56));
        assert_eq!(fb.get(4, 0), None);
        assert_eq!(fb.get(0, 3), None);
    }
}
