//! Radial brush masks
//!
//! A mask is a square grid of blend weights in [0, 1] centered on the brush
//! position. It is built once when an airbrush stroke starts and reused for
//! every compositing pass of that stroke.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use sfumato_config::MAX_BRUSH_DIAMETER;
use tracing::debug;

use crate::validation::radius_from_diameter;

/// How blend weight falls off with distance from the brush center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Falloff {
    /// Full weight everywhere inside the radius
    #[default]
    Constant,
    /// `1 - d/r`
    Linear,
    /// `1 - (d/r)^2`
    Quadratic,
}

impl Falloff {
    /// Weight at normalized distance `t = dist / radius`. Zero outside the radius.
    #[inline]
    pub fn weight(self, t: f32) -> f32 {
        if t > 1.0 {
            return 0.0;
        }
        match self {
            Falloff::Constant => 1.0,
            Falloff::Linear => (1.0 - t).max(0.0),
            Falloff::Quadratic => (1.0 - t * t).max(0.0),
        }
    }
}

/// Square weight matrix of side `2 * radius`, indexed `[x][y]`
#[derive(Debug, Clone, PartialEq)]
pub struct RadialMask {
    radius: f32,
    size: usize,
    falloff: Falloff,
    weights: Vec<f32>,
}

impl RadialMask {
    /// Mask for a brush diameter in pixels
    pub fn for_diameter(diameter: u32, falloff: Falloff) -> Self {
        build_mask(radius_from_diameter(diameter), falloff)
    }

    /// A zero-size mask. Compositing with it is a no-op.
    pub fn empty(falloff: Falloff) -> Self {
        Self {
            radius: 0.0,
            size: 0,
            falloff,
            weights: Vec::new(),
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Side length in cells
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn falloff(&self) -> Falloff {
        self.falloff
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Weight of cell (x, y); zero outside the grid
    #[inline]
    pub fn weight(&self, x: usize, y: usize) -> f32 {
        if x >= self.size || y >= self.size {
            return 0.0;
        }
        self.weights[x * self.size + y]
    }

    /// Buffer position of cell (0, 0) when the mask is centered at `center`
    #[inline]
    pub fn origin(&self, center: IVec2) -> IVec2 {
        // Pointer positions far off the canvas resolve to i32 extremes
        let offset = self.radius.floor() as i32;
        IVec2::new(
            center.x.saturating_sub(offset),
            center.y.saturating_sub(offset),
        )
    }
}

/// Build a radial mask of side `2 * radius` under the given falloff
///
/// Cell (x, y) sits at offset `(x - radius, y - radius)` from the center.
/// A radius of zero or less gives an empty mask.
pub fn build_mask(radius: f32, falloff: Falloff) -> RadialMask {
    if !(radius > 0.0) {
        debug!("build_mask: radius {:.1} yields an empty mask", radius);
        return RadialMask::empty(falloff);
    }

    let max_radius = radius_from_diameter(MAX_BRUSH_DIAMETER);
    if radius > max_radius {
        debug!(
            "build_mask: radius {:.1} clamped to {:.1}",
            radius, max_radius
        );
    }
    let radius = radius.min(max_radius);

    let size = (2.0 * radius) as usize;
    let mut weights = Vec::with_capacity(size * size);

    for x in 0..size {
        for y in 0..size {
            let dx = x as f32 - radius;
            let dy = y as f32 - radius;
            let dist = (dx * dx + dy * dy).sqrt();
            let weight = if dist > radius {
                0.0
            } else {
                falloff.weight(dist / radius)
            };
            weights.push(weight);
        }
    }

    debug!(
        "build_mask: radius={:.1}, size={}, falloff={:?}",
        radius, size, falloff
    );

    RadialMask {
        radius,
        size,
        falloff,
        weights,
    }
}
