//! Selection filters applied once when a gesture ends
//!
//! - [`convolve`] - generic 3x3 kernel convolution with a one-pixel border skip
//! - [`invert`] - pointwise color inversion over the full selection
//! - [`Kernel`] - weight presets for blur, edge detection and sharpening

mod convolve;
mod invert;
mod kernel;

pub use convolve::convolve;
pub use invert::invert;
pub use kernel::Kernel;
