//! Turns a picture of a single digit into a network input.
//!
//! The image is converted to 8-bit grayscale and inverted, so dark ink on a
//! light background becomes high activation, then normalized like the
//! training pixels. No resizing happens: the caller must supply an image
//! whose pixel count equals the network's input count.

use std::path::Path;

use crate::data::encoding::normalize_pixel;
use crate::data::sample::DataError;

/// Decodes image bytes (PNG/JPEG/BMP/GIF) into a row-major input vector.
pub fn image_bytes_to_input(bytes: &[u8]) -> Result<Vec<f64>, DataError> {
    let img = image::load_from_memory(bytes).map_err(|e| DataError::Image(e.to_string()))?;
    Ok(grayscale_input(&img))
}

/// Reads and decodes an image file into a row-major input vector.
pub fn image_to_input(path: &Path) -> Result<Vec<f64>, DataError> {
    let img = image::open(path)
        .map_err(|e| DataError::Image(format!("{}: {}", path.display(), e)))?;
    Ok(grayscale_input(&img))
}

fn grayscale_input(img: &image::DynamicImage) -> Vec<f64> {
    let gray = img.to_luma8();
    gray.pixels()
        .map(|p| normalize_pixel(f64::from(255 - p.0[0])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageOutputFormat, Luma};
    use std::io::Cursor;

    fn png_bytes(img: &GrayImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageLuma8(img.clone())
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn dark_pixels_become_strong_inputs() {
        let mut img = GrayImage::from_pixel(3, 2, Luma([255u8]));
        img.put_pixel(1, 0, Luma([0u8]));
        let input = image_bytes_to_input(&png_bytes(&img)).unwrap();

        assert_eq!(input.len(), 6);
        assert_eq!(input[0], 0.001);
        assert!((input[1] - 1.0).abs() < 1e-12);
        assert!(input.iter().enumerate().all(|(i, v)| i == 1 || *v == 0.001));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(image_bytes_to_input(b"not an image"), Err(DataError::Image(_))));
    }
}
