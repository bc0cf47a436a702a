//! Inline images for browser consoles
//!
//! An image file is read, its pixel size sniffed from the header and the
//! bytes embedded as a base64 data URL in a CSS background.

use super::error::{LoggerError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

/// Decoded image header and embeddable data
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub mime: String,
    pub width: u32,
    pub height: u32,
    pub data_url: String,
}

impl ImageData {
    /// Display size after scaling, at least one pixel each way
    pub fn scaled(&self, scale: f64) -> (u32, u32) {
        let scale_dim = |dim: u32| ((f64::from(dim) * scale).round() as u32).max(1);
        (scale_dim(self.width), scale_dim(self.height))
    }

    /// CSS drawing the image as the background of a padded blank
    pub fn css(&self, scale: f64) -> String {
        let (width, height) = self.scaled(scale);
        format!(
            "font-size: 1px; padding: {}px {}px; background: url({}) no-repeat; \
             background-size: {}px {}px; color: transparent;",
            height / 2,
            width / 2,
            self.data_url,
            width,
            height
        )
    }
}

/// Read and decode an image file.
///
/// The MIME type comes from the file extension when it names an image type,
/// otherwise from the sniffed header.
pub fn load_image(path: &Path) -> Result<ImageData> {
    let display = path.display().to_string();
    let bytes = std::fs::read(path)
        .map_err(|e| LoggerError::image(&display, format!("failed to read file: {}", e)))?;
    let guessed = mime_guess::from_path(path)
        .first()
        .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .map(|mime| mime.essence_str().to_string());
    decode_image(&display, &bytes, guessed)
}

/// Decode image bytes already in memory
pub fn decode_image(source: &str, bytes: &[u8], mime_hint: Option<String>) -> Result<ImageData> {
    let (sniffed, width, height) = sniff(bytes)
        .ok_or_else(|| LoggerError::image(source, "unsupported or truncated image data"))?;
    if width == 0 || height == 0 {
        return Err(LoggerError::image(source, "image has no pixels"));
    }

    let mime = mime_hint.unwrap_or_else(|| sniffed.to_string());
    Ok(ImageData {
        data_url: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
        mime,
        width,
        height,
    })
}

/// Validate a display scale
pub fn check_scale(source: &str, scale: f64) -> Result<f64> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(LoggerError::image(
            source,
            format!("scale must be a positive number (got {})", scale),
        ))
    }
}

fn sniff(bytes: &[u8]) -> Option<(&'static str, u32, u32)> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        return png_size(bytes).map(|(w, h)| ("image/png", w, h));
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return gif_size(bytes).map(|(w, h)| ("image/gif", w, h));
    }
    if bytes.starts_with(&[0xFF, 0xD8]) {
        return jpeg_size(bytes).map(|(w, h)| ("image/jpeg", w, h));
    }
    None
}

fn be_u16(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 2)?;
    Some(u32::from(u16::from_be_bytes([b[0], b[1]])))
}

fn be_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 4)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

fn le_u16(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 2)?;
    Some(u32::from(u16::from_le_bytes([b[0], b[1]])))
}

// IHDR is always the first chunk
fn png_size(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.get(12..16)? != b"IHDR" {
        return None;
    }
    Some((be_u32(bytes, 16)?, be_u32(bytes, 20)?))
}

fn gif_size(bytes: &[u8]) -> Option<(u32, u32)> {
    Some((le_u16(bytes, 6)?, le_u16(bytes, 8)?))
}

/// Walk the marker segments until a start-of-frame
fn jpeg_size(bytes: &[u8]) -> Option<(u32, u32)> {
    let mut pos = 2;
    loop {
        while *bytes.get(pos)? != 0xFF {
            pos += 1;
        }
        while *bytes.get(pos)? == 0xFF {
            pos += 1;
        }
        let marker = *bytes.get(pos)?;
        pos += 1;

        match marker {
            0xD8 | 0x01 | 0xD0..=0xD7 => continue,
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                let height = be_u16(bytes, pos + 3)?;
                let width = be_u16(bytes, pos + 5)?;
                return Some((width, height));
            }
            0xD9 | 0xDA => return None,
            _ => {
                let length = be_u16(bytes, pos)? as usize;
                pos += length;
            }
        }
    }
}
