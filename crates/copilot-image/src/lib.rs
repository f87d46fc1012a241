//! Resize-and-encode for image attachments.
//!
//! Uploaded images are decoded, scaled down to fit a bounding box while
//! keeping their aspect ratio, and re-encoded as a base64 `data:` URL that can
//! be embedded straight into a message part.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine};
use copilot_types::{CopilotError, Result};
use image::{imageops::FilterType, DynamicImage, ImageFormat};

/// Bounding box applied to attachments from the question input.
pub const MAX_IMAGE_WIDTH: u32 = 800;
pub const MAX_IMAGE_HEIGHT: u32 = 800;

/// An image after resizing and encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data_url: String,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Resize `bytes` to fit within `max_width` x `max_height` and return it as a
/// `data:` URL.
pub fn resize_image(bytes: &[u8], max_width: u32, max_height: u32) -> Result<String> {
    encode_resized(bytes, max_width, max_height).map(|encoded| encoded.data_url)
}

/// Like [`resize_image`] but keeps the output dimensions and media type.
///
/// Images with an alpha channel are written as PNG, everything else as JPEG.
pub fn encode_resized(bytes: &[u8], max_width: u32, max_height: u32) -> Result<EncodedImage> {
    if max_width == 0 || max_height == 0 {
        return Err(CopilotError::InvalidDimensions {
            max_width,
            max_height,
        });
    }
    if bytes.is_empty() {
        return Err(CopilotError::EmptyImage);
    }

    let format = image::guess_format(bytes)
        .map_err(|e| CopilotError::UnsupportedImageFormat(e.to_string()))?;
    let source = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| CopilotError::ImageDecode(e.to_string()))?;

    let (width, height) = fit_within(source.width(), source.height(), max_width, max_height);
    let resized = if (width, height) == (source.width(), source.height()) {
        source
    } else {
        tracing::debug!(
            from_width = source.width(),
            from_height = source.height(),
            width,
            height,
            "Scaling image attachment"
        );
        source.resize_exact(width, height, FilterType::Triangle)
    };

    let (output, target) = if resized.color().has_alpha() {
        (resized, ImageFormat::Png)
    } else {
        // JPEG has no alpha channel and rejects anything but 8-bit luma/RGB.
        (DynamicImage::ImageRgb8(resized.to_rgb8()), ImageFormat::Jpeg)
    };

    let mut buf = Vec::new();
    output
        .write_to(&mut Cursor::new(&mut buf), target)
        .map_err(|e| CopilotError::ImageEncode {
            format: format!("{target:?}"),
            message: e.to_string(),
        })?;

    let mime_type = target.to_mime_type();
    Ok(EncodedImage {
        data_url: data_url(mime_type, &buf),
        mime_type,
        width,
        height,
    })
}

/// Largest size that fits inside the bounds with the same aspect ratio.
/// Images already inside the bounds are left alone; nothing is scaled up.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );
    let scaled = |side: u32, bound: u32| ((f64::from(side) * scale).round() as u32).clamp(1, bound);
    (scaled(width, max_width), scaled(height, max_height))
}

/// Media type to export when the browser redraws an attachment on a canvas.
///
/// The canvas cannot tell whether the source had transparency, so only JPEG
/// sources are exported as JPEG and everything else as PNG.
pub fn canvas_output_type(source_mime: &str) -> &'static str {
    match source_mime.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "image/jpeg",
        _ => "image/png",
    }
}

/// `data:<mime>;base64,<payload>`
pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}
