//! Kernel convolution over a selected rectangle

use tracing::debug;

use super::Kernel;
use crate::surface::{PixelRegion, PixelSurface};
use crate::types::{Rect, Rgba};
use crate::validation::quantize_channel;

/// Convolve `rect` with `kernel`
///
/// The rectangle is first clipped to the buffer. Its one-pixel perimeter is
/// left untouched since those pixels lack a full neighborhood inside the
/// selection. All neighbor reads come from a snapshot taken before any
/// write. Alpha of every filtered pixel is forced opaque.
///
/// Returns the region that was rewritten (the interior), or None.
pub fn convolve<S: PixelSurface + ?Sized>(
    surface: &mut S,
    rect: Rect,
    kernel: &Kernel,
) -> Option<Rect> {
    let rect = rect.intersect(&surface.bounds());
    let interior = rect.shrink(1);
    if interior.is_empty() {
        debug!(
            "convolve: selection {}x{} has no interior, skipped",
            rect.width, rect.height
        );
        return None;
    }

    let source = surface.get_rect(rect);
    let mut output = surface.get_rect(interior);

    for ly in 0..interior.height {
        for lx in 0..interior.width {
            // Position in the snapshot; interior is inset by one
            let sx = lx + 1;
            let sy = ly + 1;
            output.set(lx, ly, filter_pixel(&source, sx, sy, kernel));
        }
    }

    surface.put_rect(interior.x, interior.y, &output);

    debug!(
        "convolve: region ({}, {}) {}x{}, interior {}x{}, divisor={}",
        rect.x, rect.y, rect.width, rect.height, interior.width, interior.height, kernel.divisor
    );

    Some(interior)
}

/// Filtered value of snapshot pixel (x, y). Caller guarantees a full 3x3
/// neighborhood.
fn filter_pixel(source: &PixelRegion, x: u32, y: u32, kernel: &Kernel) -> Rgba {
    let mut sums = [0.0f32; 3];

    for dy in -1..=1i32 {
        for dx in -1..=1i32 {
            let nx = x.wrapping_add_signed(dx);
            let ny = y.wrapping_add_signed(dy);
            let Some(neighbor) = source.get(nx, ny) else {
                continue;
            };
            let weight = kernel.weight(dx, dy);
            for (sum, channel) in sums.iter_mut().zip(neighbor.rgb()) {
                *sum += channel as f32 * weight;
            }
        }
    }

    let [r, g, b] = sums.map(|sum| quantize_channel(sum / kernel.divisor));
    Rgba::opaque([r, g, b])
}
