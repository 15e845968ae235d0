//! Snapshot encoding to transport formats.
//!
//! Turns a rendered [`Pixmap`] into PNG or JPEG bytes suitable for saving or
//! sending to a host application.

use image::ImageEncoder;
use tiny_skia::Pixmap;

use crate::error::{RenderError, RenderResult};

/// JPEG stores dimensions in 16-bit fields.
const JPEG_MAX_DIMENSION: u32 = 65_535;

/// Encode a pixmap as PNG bytes.
///
/// # Errors
///
/// Returns an error if PNG encoding fails.
pub fn encode_png(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))
}

/// Encode a pixmap as JPEG bytes.
///
/// JPEG carries no alpha channel, so pixels are blended over `background`
/// first. Pixmap data is premultiplied, so the blend adds the remaining
/// background contribution to the stored color.
///
/// # Errors
///
/// Returns an error if the pixmap exceeds JPEG's dimension limit or if
/// encoding fails.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn encode_jpeg(pixmap: &Pixmap, quality: u8, background: [u8; 4]) -> RenderResult<Vec<u8>> {
    let (width, height) = (pixmap.width(), pixmap.height());
    if width > JPEG_MAX_DIMENSION || height > JPEG_MAX_DIMENSION {
        return Err(RenderError::InvalidDimensions);
    }

    let mut rgb_data = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in pixmap.data().chunks_exact(4) {
        let inv = 1.0 - f32::from(pixel[3]) / 255.0;
        rgb_data.push(f32::from(background[0]).mul_add(inv, f32::from(pixel[0])) as u8);
        rgb_data.push(f32::from(background[1]).mul_add(inv, f32::from(pixel[1])) as u8);
        rgb_data.push(f32::from(background[2]).mul_add(inv, f32::from(pixel[2])) as u8);
    }

    let mut buf = std::io::Cursor::new(Vec::new());
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality);
    encoder
        .write_image(&rgb_data, width, height, image::ColorType::Rgb8.into())
        .map_err(|e| RenderError::Encode(format!("JPEG encoding failed: {e}")))?;

    Ok(buf.into_inner())
}
