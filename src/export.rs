// Headless output: write the rendered chart to an image file instead of a window.

use crate::error::Error;
use crate::types::FrameBuffer;
use image::{Rgb, RgbImage};
use log::info;
use std::path::Path;

/// Convert 0x00RRGGBB pixels into an RGB image.
pub fn to_rgb_image(fb: &FrameBuffer) -> RgbImage {
    RgbImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let p = fb.get(x as usize, y as usize).unwrap_or(0);
        Rgb([(p >> 16) as u8, (p >> 8) as u8, p as u8])
    })
}

/// Save the chart; the format follows the file extension (PNG expected).
pub fn save(fb: &FrameBuffer, path: &Path) -> Result<(), Error> {
    to_rgb_image(fb).save(path)?;
    info!("wrote {}x{} chart to {}", fb.width, fb.height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_unpack_from_0rgb() {
        let mut fb = FrameBuffer::filled(2, 1, 0x00_FF_FF_FF);
        fb.pixels[1] = 0x00_1F_77_B4;
        let img = to_rgb_image(&fb);
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([0x1F, 0x77, 0xB4]));
    }

    #[test]
    fn png_is_written_and_reads_back() {
        let mut fb = FrameBuffer::filled(7, 5, 0x00_FF_FF_FF);
        fb.pixels[7 * 4 + 6] = 0x00_FF_7F_0E;
        let path = std::env::temp_dir().join(format!("gamma-plot-test-{}.png", std::process::id()));
        save(&fb, &path).unwrap();

        let back = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();
        assert_eq!(back.dimensions(), (7, 5));
        assert_eq!(back.get_pixel(6, 4), &Rgb([0xFF, 0x7F, 0x0E]));
    }

    #[test]
    fn unknown_extension_is_an_export_error() {
        let fb = FrameBuffer::filled(1, 1, 0);
        let path = std::env::temp_dir().join("gamma-plot-test.not-an-image-format");
        assert!(matches!(save(&fb, &path), Err(Error::Export(_))));
    }
}
