//! Sfumato painting engine - raster pixel transforms driven by pointer gestures
//!
//! This crate provides:
//! - [`surface`] - the host buffer seam ([`PixelSurface`]) and an owned [`Canvas`]
//! - [`geometry`] - pointer-to-buffer coordinates and rectangle normalization
//! - [`mask`] - radial brush masks with constant, linear and quadratic falloff
//! - [`composite`] - airbrush compositing through a mask
//! - [`filters`] - 3x3 convolution presets and color inversion
//! - [`tools`] - tool registry and persistent tool parameters
//! - [`gesture`] - the start/move/end stroke state machine
//! - [`session`] - host-facing entry points tying it all together
//!
//! Everything runs on the caller's thread. Engines never fail: out-of-buffer
//! pixels are skipped and empty regions are no-ops.

pub mod composite;
pub mod constants;
pub mod filters;
pub mod geometry;
pub mod gesture;
pub mod mask;
pub mod session;
pub mod surface;
pub mod tools;
pub mod types;
pub mod validation;

pub use composite::*;
pub use constants::*;
pub use filters::*;
pub use geometry::*;
pub use gesture::*;
pub use mask::*;
pub use session::*;
pub use surface::*;
pub use tools::*;
pub use types::*;
pub use validation::*;
