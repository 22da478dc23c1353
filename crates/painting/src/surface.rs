//! Pixel surfaces - the host buffer seam and an owned RGBA8 canvas

use sfumato_config::CanvasConfig;

use crate::types::{Color, Rect, Rgba};
use crate::validation::{ValidationError, validate_buffer_len};

/// An RGBA8 pixel buffer owned by the host
///
/// Engines only ever read and write sub-rectangles through `get_rect` and
/// `put_rect`; both clamp to the buffer, so no access lands outside
/// `[0, width) x [0, height)`.
pub trait PixelSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Returns None if coordinates are out of bounds
    fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba>;

    /// Does nothing if coordinates are out of bounds
    fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba);

    /// The whole buffer as a rectangle
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    /// Copy out the part of `rect` that lies inside the buffer
    fn get_rect(&self, rect: Rect) -> PixelRegion {
        let rect = rect.intersect(&self.bounds());
        let mut pixels = Vec::with_capacity(rect.area() as usize);
        for y in rect.y..rect.bottom() as i32 {
            for x in rect.x..rect.right() as i32 {
                pixels.push(self.get_pixel(x as u32, y as u32).unwrap_or_default());
            }
        }
        PixelRegion { rect, pixels }
    }

    /// Write a region back with its top-left corner at (x, y).
    /// Pixels that fall outside the buffer are dropped.
    fn put_rect(&mut self, x: i32, y: i32, region: &PixelRegion) {
        let target = Rect::new(x, y, region.width(), region.height());
        let visible = target.intersect(&self.bounds());
        for py in visible.y..visible.bottom() as i32 {
            for px in visible.x..visible.right() as i32 {
                let local_x = (px - x) as u32;
                let local_y = (py - y) as u32;
                if let Some(pixel) = region.get(local_x, local_y) {
                    self.set_pixel(px as u32, py as u32, pixel);
                }
            }
        }
    }
}

/// A detached copy of a rectangle of pixels
///
/// `rect` records where the copy came from, in buffer coordinates. Pixel
/// access is region-local and row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelRegion {
    rect: Rect,
    pixels: Vec<Rgba>,
}

impl PixelRegion {
    /// Source rectangle in buffer coordinates
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.rect.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.rect.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.rect.width || y >= self.rect.height {
            return None;
        }
        Some((y as usize) * (self.rect.width as usize) + (x as usize))
    }

    /// Region-local read
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Region-local write, ignored when out of range
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = pixel;
        }
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }
}

/// An owned row-major RGBA8 buffer
///
/// Reference `PixelSurface` for hosts that do not bring their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Canvas {
    /// Create a canvas initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    /// Create a canvas filled with one pixel value
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![pixel; pixel_count],
        }
    }

    /// Create a canvas sized and filled per the editor config
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::filled(
            config.width,
            config.height,
            Color::from(config.background).to_rgba(),
        )
    }

    /// Wrap raw RGBA8 bytes (row-major, 4 bytes per pixel)
    pub fn from_raw(width: u32, height: u32, bytes: &[u8]) -> Result<Self, ValidationError> {
        validate_buffer_len(width, height, bytes.len())?;
        Ok(Self {
            width,
            height,
            pixels: bytemuck::cast_slice::<u8, Rgba>(bytes).to_vec(),
        })
    }

    /// Fill the whole canvas
    pub fn clear(&mut self, pixel: Rgba) {
        self.pixels.fill(pixel);
    }

    /// Raw bytes for texture upload or export
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }
}

impl PixelSurface for Canvas {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        Some(self.pixels[index])
    }

    #[inline]
    fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = (y as usize) * (self.width as usize) + (x as usize);
        self.pixels[index] = pixel;
    }
}

#[cfg(feature = "image")]
impl PixelSurface for image::RgbaImage {
    fn width(&self) -> u32 {
        image::RgbaImage::width(self)
    }

    fn height(&self) -> u32 {
        image::RgbaImage::height(self)
    }

    fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.get_pixel_checked(x, y)
            .map(|&image::Rgba([r, g, b, a])| Rgba::new(r, g, b, a))
    }

    fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba) {
        if let Some(target) = self.get_pixel_mut_checked(x, y) {
            *target = image::Rgba([pixel.r, pixel.g, pixel.b, pixel.a]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        for y in 0..height {
            for x in 0..width {
                canvas.set_pixel(x, y, Rgba::new(x as u8, y as u8, 0, 255));
            }
        }
        canvas
    }

    #[test]
    fn test_new_canvas() {
        let canvas = Canvas::new(100, 50);
        assert_eq!(canvas.width(), 100);
        assert_eq!(canvas.height(), 50);
        assert_eq!(canvas.pixels().len(), 5000);
        assert_eq!(canvas.get_pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_get_set_pixel() {
        let mut canvas = Canvas::new(10, 10);
        let pixel = Rgba::new(10, 20, 30, 255);

        canvas.set_pixel(5, 5, pixel);
        assert_eq!(canvas.get_pixel(5, 5), Some(pixel));

        // Out of bounds
        canvas.set_pixel(10, 0, pixel);
        assert_eq!(canvas.get_pixel(100, 100), None);
    }

    #[test]
    fn test_from_config() {
        let canvas = Canvas::from_config(&CanvasConfig::new(4, 3));
        assert_eq!(canvas.bounds(), Rect::new(0, 0, 4, 3));
        assert!(canvas.pixels().iter().all(|p| *p == Rgba::new(255, 255, 255, 255)));
    }

    #[test]
    fn test_clear() {
        let mut canvas = gradient(8, 4);
        let fill = Rgba::new(12, 34, 56, 255);
        canvas.clear(fill);
        assert!(canvas.pixels().iter().all(|p| *p == fill));
        assert_eq!(canvas.bounds(), Rect::new(0, 0, 8, 4));
    }

    #[test]
    fn test_from_raw_and_as_bytes() {
        let bytes: Vec<u8> = (0..16).collect();
        let canvas = Canvas::from_raw(2, 2, &bytes).unwrap();
        assert_eq!(canvas.get_pixel(1, 0), Some(Rgba::new(4, 5, 6, 7)));
        assert_eq!(canvas.as_bytes(), bytes.as_slice());

        assert!(Canvas::from_raw(3, 2, &bytes).is_err());
    }

    #[test]
    fn test_get_rect_clamps_to_bounds() {
        let canvas = gradient(10, 10);
        let region = canvas.get_rect(Rect::new(-2, 8, 5, 5));

        assert_eq!(region.rect(), Rect::new(0, 8, 3, 2));
        assert_eq!(region.get(0, 0), Some(Rgba::new(0, 8, 0, 255)));
        assert_eq!(region.get(2, 1), Some(Rgba::new(2, 9, 0, 255)));
        assert_eq!(region.get(3, 0), None);

        assert!(canvas.get_rect(Rect::new(20, 20, 5, 5)).is_empty());
    }

    #[test]
    fn test_put_rect_drops_outside_pixels() {
        let source = gradient(4, 4);
        let region = source.get_rect(source.bounds());

        let mut canvas = Canvas::new(4, 4);
        canvas.put_rect(2, -1, &region);

        // Region pixel (0, 1) lands at (2, 0)
        assert_eq!(canvas.get_pixel(2, 0), Some(Rgba::new(0, 1, 0, 255)));
        assert_eq!(canvas.get_pixel(3, 2), Some(Rgba::new(1, 3, 0, 255)));
        assert_eq!(canvas.get_pixel(1, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_region_roundtrip_is_identity() {
        let mut canvas = gradient(8, 8);
        let before = canvas.clone();
        let region = canvas.get_rect(Rect::new(2, 2, 4, 4));
        canvas.put_rect(2, 2, &region);
        assert_eq!(canvas, before);
    }

    #[cfg(feature = "image")]
    #[test]
    fn test_rgba_image_surface() {
        let mut image = image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 4]));
        assert_eq!(PixelSurface::get_pixel(&image, 3, 3), Some(Rgba::new(1, 2, 3, 4)));

        PixelSurface::set_pixel(&mut image, 1, 1, Rgba::new(9, 9, 9, 255));
        assert_eq!(image.get_pixel(1, 1).0, [9, 9, 9, 255]);
        assert_eq!(PixelSurface::get_pixel(&image, 4, 0), None);
    }
}
