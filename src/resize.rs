//! Size-bounded image resizing
//!
//! A pure byte-in/byte-out transform. Anything that goes wrong — unknown
//! codec, corrupt data, encode failure — degrades to returning the
//! original bytes untouched; no error ever leaves this module.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};
use std::io::Cursor;
use tracing::{info, warn};

use crate::config::ImageLimits;

/// Outcome of [`resize_if_needed`].
#[derive(Debug, Clone)]
pub struct ResizedImage {
    /// Bytes to store: re-encoded if resized, otherwise the input.
    pub data: Vec<u8>,

    /// Whether the bytes were re-encoded.
    pub was_resized: bool,
}

impl ResizedImage {
    /// Byte count of the data to store.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Bound an image's byte size and dimensions.
///
/// Input at or under the size threshold passes through untouched.
/// Oversized input is decoded, flattened onto white if it carries
/// transparency, proportionally scaled so neither axis exceeds the
/// configured maximum, and re-encoded as quality-compressed JPEG.
#[must_use]
pub fn resize_if_needed(data: Vec<u8>, limits: &ImageLimits) -> ResizedImage {
    let original_size = data.len() as u64;
    if original_size <= limits.max_size_bytes() {
        return ResizedImage {
            data,
            was_resized: false,
        };
    }

    match reencode(&data, limits) {
        Ok(resized) => {
            info!(
                original_size,
                resized_size = resized.len(),
                "resized oversized image attachment"
            );
            ResizedImage {
                data: resized,
                was_resized: true,
            }
        }
        Err(err) => {
            warn!(%err, "image resize failed, keeping original bytes");
            ResizedImage {
                data,
                was_resized: false,
            }
        }
    }
}

fn reencode(data: &[u8], limits: &ImageLimits) -> Result<Vec<u8>, image::ImageError> {
    let decoded = image::load_from_memory(data)?;
    let flattened = flatten_to_rgb(&decoded);

    let (width, height) = (flattened.width(), flattened.height());
    let bounded = if width > limits.max_dimension || height > limits.max_dimension {
        let (new_width, new_height) = bounded_dimensions(width, height, limits.max_dimension);
        image::imageops::resize(&flattened, new_width, new_height, FilterType::Lanczos3)
    } else {
        flattened
    };

    let mut buffer = Cursor::new(Vec::new());
    bounded.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, limits.quality))?;
    Ok(buffer.into_inner())
}

/// Scale proportionally so the longer axis lands on `max_dimension`.
fn bounded_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let scaled = |long: u32, short: u32| {
        let side = (u64::from(short) * u64::from(max_dimension)) / u64::from(long);
        u32::try_from(side).unwrap_or(max_dimension).max(1)
    };

    if width > height {
        (max_dimension, scaled(width, height))
    } else {
        (scaled(height, width), max_dimension)
    }
}

/// Composite transparent images onto a white background.
fn flatten_to_rgb(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let mut flattened = RgbImage::from_pixel(rgba.width(), rgba.height(), Rgb([255, 255, 255]));

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = f32::from(pixel[3]) / 255.0;
        let blend = |channel: u8| {
            let value = f32::from(channel).mul_add(alpha, 255.0 * (1.0 - alpha));
            value.round().clamp(0.0, 255.0) as u8
        };
        flattened.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }

    flattened
}
