//! 3x3 convolution kernels

use serde::{Deserialize, Serialize};

use crate::constants::{KERNEL_LEN, KERNEL_SIZE};

/// A 3x3 weight matrix (row-major) and the divisor applied to each sum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kernel {
    pub weights: [f32; KERNEL_LEN],
    pub divisor: f32,
}

impl Kernel {
    /// Pre-normalized Gaussian-like blur
    pub const GAUSSIAN_BLUR: Kernel = Kernel::new(
        [0.05, 0.1, 0.05, 0.1, 0.4, 0.1, 0.05, 0.1, 0.05],
        1.0,
    );

    /// Uniform 3x3 mean
    pub const BOX_BLUR: Kernel = Kernel::new([1.0; KERNEL_LEN], 9.0);

    /// Laplacian edge detector. Flat areas go to black.
    pub const EDGE_DETECT: Kernel = Kernel::new(
        [0.0, -1.0, 0.0, -1.0, 4.0, -1.0, 0.0, -1.0, 0.0],
        1.0,
    );

    /// Sharpen/brighten. The top row is negative and the rest positive, so
    /// the kernel is intentionally asymmetric.
    pub const SHARPEN: Kernel = Kernel::new(
        [-1.0, -1.0, -1.0, 1.0, 8.0, 1.0, 1.0, 1.0, 1.0],
        9.0,
    );

    pub const fn new(weights: [f32; KERNEL_LEN], divisor: f32) -> Self {
        Self { weights, divisor }
    }

    /// Weight applied to the neighbor at offset (dx, dy), each in -1..=1
    #[inline]
    pub fn weight(&self, dx: i32, dy: i32) -> f32 {
        let col = (dx + 1) as usize;
        let row = (dy + 1) as usize;
        self.weights[row * KERNEL_SIZE + col]
    }

    /// Sum of weights divided by the divisor. 1.0 means flat areas keep
    /// their value.
    pub fn gain(&self) -> f32 {
        self.weights.iter().sum::<f32>() / self.divisor
    }
}
