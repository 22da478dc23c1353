//! Airbrush compositing - blends a flat color through a radial mask

use glam::IVec2;
use tracing::debug;

use crate::mask::RadialMask;
use crate::surface::PixelSurface;
use crate::types::{Color, Rect, Rgba};
use crate::validation::{clamp_flow_rate, quantize_channel};

/// Blend one channel toward `paint` by `coverage`
/// Formula: out = paint * coverage + dst * (1 - coverage)
#[inline]
fn blend_channel(paint: u8, dst: u8, coverage: f32) -> u8 {
    quantize_channel(paint as f32 * coverage + dst as f32 * (1.0 - coverage))
}

/// Apply one airbrush pass centered at `center`
///
/// Every mask cell whose target pixel lies inside the buffer is blended with
/// coverage `weight * flow_rate`; cells outside the buffer are skipped. Alpha
/// across the clamped footprint is forced opaque. There is no accumulation
/// between passes: each call blends against whatever the buffer holds now.
///
/// Returns the region that was written, or None if nothing was.
pub fn composite<S: PixelSurface + ?Sized>(
    surface: &mut S,
    center: IVec2,
    mask: &RadialMask,
    color: Color,
    flow_rate: f32,
) -> Option<Rect> {
    if mask.is_empty() {
        debug!("composite: empty mask, skipped");
        return None;
    }

    let origin = mask.origin(center);
    let size = mask.size() as u32;
    let footprint = Rect::new(origin.x, origin.y, size, size);

    let mut region = surface.get_rect(footprint);
    if region.is_empty() {
        debug!(
            "composite: footprint at ({}, {}) outside surface",
            origin.x, origin.y
        );
        return None;
    }

    let flow = clamp_flow_rate(flow_rate);
    let paint = color.channels();
    let area = region.rect();

    for ly in 0..area.height {
        for lx in 0..area.width {
            // Offset of this pixel inside the mask grid
            let mx = (area.x as i64 - origin.x as i64) as usize + lx as usize;
            let my = (area.y as i64 - origin.y as i64) as usize + ly as usize;
            let coverage = mask.weight(mx, my) * flow;

            let Some(dst) = region.get(lx, ly) else {
                continue;
            };
            let rgb = dst.rgb();
            let blended = Rgba::opaque([
                blend_channel(paint[0], rgb[0], coverage),
                blend_channel(paint[1], rgb[1], coverage),
                blend_channel(paint[2], rgb[2], coverage),
            ]);
            region.set(lx, ly, blended);
        }
    }

    surface.put_rect(area.x, area.y, &region);

    debug!(
        "composite: center=({}, {}), radius={:.1}, flow={:.2} -> region ({}, {}) {}x{}",
        center.x, center.y, mask.radius(), flow, area.x, area.y, area.width, area.height
    );

    Some(area)
}
