use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::OPAQUE;
use crate::validation::{ValidationError, parse_hex_color};

/// Primary paint color. Alpha is not part of the color: transforms always
/// write opaque pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array, in r, g, b order
    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// The opaque pixel of this color
    #[inline]
    pub fn to_rgba(self) -> Rgba {
        Rgba::new(self.r, self.g, self.b, OPAQUE)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s).map(Color::from)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A single straight-alpha RGBA8 pixel
///
/// Layout matches the byte order of an RGBA8 texture so whole buffers can be
/// cast to bytes with bytemuck.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable,
)]
#[repr(C)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Color channels without alpha
    #[inline]
    pub fn rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Build an opaque pixel from three color channels
    #[inline]
    pub fn opaque([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b, OPAQUE)
    }
}

/// Axis-aligned rectangle in buffer coordinates
///
/// The origin may lie outside the buffer (pointer gestures can leave the
/// canvas); engines intersect with the buffer bounds before touching pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the rectangle covers no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Exclusive right edge
    #[inline]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && (x as i64) < self.right() && y >= self.y && (y as i64) < self.bottom()
    }

    /// Overlap of two rectangles. Disjoint rectangles yield an empty rect.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x0 = (self.x as i64).max(other.x as i64);
        let y0 = (self.y as i64).max(other.y as i64);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());

        if x1 <= x0 || y1 <= y0 {
            return Rect::default();
        }

        Rect::new(x0 as i32, y0 as i32, (x1 - x0) as u32, (y1 - y0) as u32)
    }

    /// Inset by `n` pixels on every side. Empty when nothing is left.
    pub fn shrink(&self, n: u32) -> Rect {
        let twice = n.saturating_mul(2);
        if self.width <= twice || self.height <= twice {
            return Rect::default();
        }
        Rect::new(
            self.x.saturating_add(n as i32),
            self.y.saturating_add(n as i32),
            self.width - twice,
            self.height - twice,
        )
    }
}
