/// Alpha written by every transform. Output pixels are always fully opaque.
pub const OPAQUE: u8 = 255;

/// Side length of convolution kernels.
pub const KERNEL_SIZE: usize = 3;

/// Number of weights in a convolution kernel.
pub const KERNEL_LEN: usize = KERNEL_SIZE * KERNEL_SIZE;

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;
