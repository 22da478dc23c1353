//! Tool registry - maps tool identifiers to the engine that runs them

use serde::{Deserialize, Serialize};
use sfumato_config::{BrushConfig, MAX_BRUSH_DIAMETER};

use crate::filters::Kernel;
use crate::mask::Falloff;
use crate::types::Color;
use crate::validation::clamp_flow_rate;

/// What a tool does with a gesture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ToolAction {
    /// Composite the primary color on every move
    Airbrush { falloff: Falloff },
    /// Convolve the dragged rectangle on release
    Filter { kernel: Kernel },
    /// Invert the dragged rectangle on release
    Invert,
}

impl ToolAction {
    /// True for tools that paint while the pointer moves
    pub fn paints_on_move(&self) -> bool {
        matches!(self, ToolAction::Airbrush { .. })
    }
}

/// A named registry entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub name: String,
    pub action: ToolAction,
}

/// Ordered table of tools
///
/// Order is registration order, which is the order a host toolbar lists
/// them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("Constant", ToolAction::Airbrush { falloff: Falloff::Constant });
        registry.register("Linear", ToolAction::Airbrush { falloff: Falloff::Linear });
        registry.register("Quadratic", ToolAction::Airbrush { falloff: Falloff::Quadratic });
        registry.register("GaussianBlur", ToolAction::Filter { kernel: Kernel::GAUSSIAN_BLUR });
        registry.register("NormalBlur", ToolAction::Filter { kernel: Kernel::BOX_BLUR });
        registry.register("EdgeDetection", ToolAction::Filter { kernel: Kernel::EDGE_DETECT });
        registry.register("Brighten", ToolAction::Filter { kernel: Kernel::SHARPEN });
        registry.register("Invert", ToolAction::Invert);
        registry
    }
}

impl ToolRegistry {
    /// A registry with no tools
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a tool, replacing any existing entry with the same name
    pub fn register(&mut self, name: impl Into<String>, action: ToolAction) {
        let name = name.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.action = action,
            None => self.entries.push(ToolEntry { name, action }),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<ToolAction> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.action)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Tool names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tool settings that persist across strokes until the host changes them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameters {
    /// Selected tool identifier
    pub tool: String,
    /// Primary color
    pub color: Color,
    /// Brush diameter in pixels
    pub brush_diameter: u32,
    /// Paint flow rate (0.0-1.0)
    pub flow_rate: f32,
}

impl Default for ToolParameters {
    fn default() -> Self {
        Self::from(&BrushConfig::default())
    }
}

impl From<&BrushConfig> for ToolParameters {
    fn from(config: &BrushConfig) -> Self {
        Self {
            tool: config.tool.clone(),
            color: Color::from(config.color),
            brush_diameter: config.diameter.min(MAX_BRUSH_DIAMETER),
            flow_rate: clamp_flow_rate(config.flow_rate),
        }
    }
}
