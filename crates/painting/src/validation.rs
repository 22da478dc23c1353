use thiserror::Error;

use crate::constants::BYTES_PER_PIXEL;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid hex color: {0:?} (expected #rrggbb)")]
    InvalidHexColor(String),
    #[error("Pixel data length {actual} does not match {width}x{height} RGBA ({expected} bytes)")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Parse a `#rrggbb` color string into its three channels
pub fn parse_hex_color(s: &str) -> Result<[u8; 3], ValidationError> {
    let invalid = || ValidationError::InvalidHexColor(s.to_string());

    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Check that a raw RGBA8 byte buffer matches the given dimensions
pub fn validate_buffer_len(width: u32, height: u32, len: usize) -> Result<(), ValidationError> {
    let expected = (width as usize) * (height as usize) * BYTES_PER_PIXEL;
    if len != expected {
        return Err(ValidationError::BufferSizeMismatch {
            width,
            height,
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Clamp a flow rate into [0, 1]. NaN is treated as no paint.
pub fn clamp_flow_rate(flow_rate: f32) -> f32 {
    if flow_rate.is_nan() {
        return 0.0;
    }
    flow_rate.clamp(0.0, 1.0)
}

/// Convert a brush diameter to a mask radius
pub fn radius_from_diameter(diameter: u32) -> f32 {
    diameter as f32 / 2.0
}

/// Round a computed channel value and saturate it into 0..=255
#[inline]
pub fn quantize_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}
