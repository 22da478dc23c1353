use tracing::debug;

use crate::surface::PixelSurface;
use crate::types::{Rect, Rgba};

/// Invert the color channels of every pixel in `rect` and force alpha opaque
///
/// Unlike convolution there is no border exclusion: the whole (clipped)
/// rectangle is rewritten.
pub fn invert<S: PixelSurface + ?Sized>(surface: &mut S, rect: Rect) -> Option<Rect> {
    let mut region = surface.get_rect(rect);
    if region.is_empty() {
        debug!("invert: empty selection, skipped");
        return None;
    }

    for pixel in region.pixels_mut() {
        *pixel = Rgba::opaque(pixel.rgb().map(|c| 255 - c));
    }

    let area = region.rect();
    surface.put_rect(area.x, area.y, &region);

    debug!(
        "invert: region ({}, {}) {}x{}",
        area.x, area.y, area.width, area.height
    );

    Some(area)
}
