//! Shared configuration for Sfumato
//!
//! This crate is the single source of truth for editor defaults: canvas
//! dimensions and background, the brush size and paint flow choices offered
//! to the host toolbar, and the tool that is active on startup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 640;

/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 480;

/// Default canvas fill (opaque white)
pub const DEFAULT_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Brush diameters offered by the toolbar, in pixels
pub const BRUSH_SIZES: [u32; 11] = [1, 2, 3, 5, 8, 12, 25, 35, 50, 75, 100];

/// Largest brush diameter accepted, in pixels. Masks are `diameter^2` weights.
pub const MAX_BRUSH_DIAMETER: u32 = 1024;

/// Brush diameter selected on startup
pub const DEFAULT_BRUSH_SIZE: u32 = 5;

/// Paint flow rates offered by the toolbar
pub const FLOW_RATES: [f32; 11] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// Paint flow rate selected on startup
pub const DEFAULT_FLOW_RATE: f32 = 0.5;

/// Tool selected on startup
pub const DEFAULT_TOOL: &str = "Constant";

/// Primary color on startup (black)
pub const DEFAULT_COLOR: [u8; 3] = [0, 0, 0];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },
    #[error("Invalid flow rate: {0} (expected 0.0-1.0)")]
    InvalidFlowRate(f32),
    #[error("Invalid brush diameter: {0}")]
    InvalidBrushDiameter(u32),
}

/// Canvas configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Initial fill color as [r, g, b]
    pub background: [u8; 3],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            background: DEFAULT_BACKGROUND,
        }
    }
}

impl CanvasConfig {
    /// Create a canvas config with the given dimensions and a white background
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: DEFAULT_BACKGROUND,
        }
    }
}

/// Tool parameters in effect when the editor starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Tool identifier, as registered with the tool registry
    pub tool: String,
    /// Primary color as [r, g, b]
    pub color: [u8; 3],
    /// Brush diameter in pixels
    pub diameter: u32,
    /// Paint flow rate (0.0-1.0)
    pub flow_rate: f32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            color: DEFAULT_COLOR,
            diameter: DEFAULT_BRUSH_SIZE,
            flow_rate: DEFAULT_FLOW_RATE,
        }
    }
}

/// Top-level editor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas: CanvasConfig,
    pub brush: BrushConfig,
}

impl EditorConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::InvalidCanvasSize {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        if !(0.0..=1.0).contains(&self.brush.flow_rate) {
            return Err(ConfigError::InvalidFlowRate(self.brush.flow_rate));
        }
        if self.brush.diameter == 0 || self.brush.diameter > MAX_BRUSH_DIAMETER {
            return Err(ConfigError::InvalidBrushDiameter(self.brush.diameter));
        }
        Ok(())
    }
}
