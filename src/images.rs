//! Evidence image decoding and sizing.

use crate::types::Evidence;
use image::ImageFormat;
use log::debug;

/// Pixels of a decoded evidence image, alpha flattened onto white
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB triplets, `width * height * 3` bytes
    pub rgb: Vec<u8>,
}

/// Decode an evidence blob.
///
/// The format is sniffed from the content and falls back to the declared
/// media type; blobs not declared as `image/*` are rejected.
pub fn decode_image(evidence: &Evidence) -> Result<DecodedImage, String> {
    if !evidence.media_type.trim().to_lowercase().starts_with("image/") {
        return Err(format!("{}: unsupported media type '{}'", evidence.name, evidence.media_type));
    }
    if evidence.bytes.is_empty() {
        return Err(format!("{}: empty file", evidence.name));
    }

    let format = image::guess_format(&evidence.bytes)
        .ok()
        .or_else(|| ImageFormat::from_mime_type(&evidence.media_type))
        .ok_or_else(|| format!("{}: unrecognized image type '{}'", evidence.name, evidence.media_type))?;

    let decoded = image::load_from_memory_with_format(&evidence.bytes, format)
        .map_err(|e| format!("{}: failed to decode {:?} image: {}", evidence.name, format, e))?;

    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(format!("{}: image has no pixels", evidence.name));
    }
    debug!("Decoded {} as {:?} ({}x{})", evidence.name, format, width, height);

    let rgba = decoded.to_rgba8();
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        rgb.extend([blend_on_white(r, a), blend_on_white(g, a), blend_on_white(b, a)]);
    }

    Ok(DecodedImage { width, height, rgb })
}

fn blend_on_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (channel as u32, alpha as u32);
    ((c * a + 255 * (255 - a)) / 255) as u8
}

/// Size in millimetres for an image of `width` x `height` pixels.
///
/// Pixels are converted at `dpi`, then the image is shrunk to `max_width`
/// if wider, and further to `max_height` if still taller, keeping the
/// aspect ratio. Images already within both limits keep their natural size.
pub fn fit_image(width: u32, height: u32, dpi: f32, max_width: f32, max_height: f32) -> (f32, f32) {
    let mut w = width as f32 * 25.4 / dpi;
    let mut h = height as f32 * 25.4 / dpi;

    if w > max_width {
        let ratio = max_width / w;
        w = max_width;
        h *= ratio;
    }

    if h > max_height {
        let ratio = max_height / h;
        h = max_height;
        w *= ratio;
    }

    (w, h)
}
