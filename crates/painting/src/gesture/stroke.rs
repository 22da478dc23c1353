//! A single in-flight stroke and its move/end handlers

use glam::IVec2;

use crate::composite::composite;
use crate::filters::{Kernel, convolve, invert};
use crate::geometry::normalize_rect;
use crate::mask::RadialMask;
use crate::surface::PixelSurface;
use crate::tools::{ToolAction, ToolParameters};
use crate::types::{Color, Rect};

/// Per-tool state latched when the stroke starts
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeKind {
    Airbrush {
        mask: RadialMask,
        color: Color,
    },
    Filter {
        kernel: Kernel,
    },
    Invert,
}

/// One gesture from start to end, bound to the tool selected at start
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    tool: String,
    anchor: IVec2,
    last: IVec2,
    kind: StrokeKind,
}

impl Stroke {
    /// Latch a stroke for `action`. Airbrush masks are built here from the
    /// current diameter and the color is fixed; flow rate is read per move.
    pub fn new(anchor: IVec2, action: ToolAction, params: &ToolParameters) -> Self {
        let kind = match action {
            ToolAction::Airbrush { falloff } => StrokeKind::Airbrush {
                mask: RadialMask::for_diameter(params.brush_diameter, falloff),
                color: params.color,
            },
            ToolAction::Filter { kernel } => StrokeKind::Filter { kernel },
            ToolAction::Invert => StrokeKind::Invert,
        };

        Self {
            tool: params.tool.clone(),
            anchor,
            last: anchor,
            kind,
        }
    }

    /// Identifier of the tool this stroke was started with
    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn anchor(&self) -> IVec2 {
        self.anchor
    }

    /// Most recent pointer position
    pub fn last(&self) -> IVec2 {
        self.last
    }

    pub fn kind(&self) -> &StrokeKind {
        &self.kind
    }

    /// Rectangle between the anchor and the last position
    pub fn selection(&self) -> Rect {
        normalize_rect(self.anchor, self.last)
    }

    /// Move handler: airbrushes composite at `point` with the current flow
    /// rate, filters only track it
    pub(crate) fn on_move<S: PixelSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        point: IVec2,
        params: &ToolParameters,
    ) -> Option<Rect> {
        self.last = point;
        match &self.kind {
            StrokeKind::Airbrush { mask, color } => {
                composite(surface, point, mask, *color, params.flow_rate)
            }
            StrokeKind::Filter { .. } | StrokeKind::Invert => None,
        }
    }

    /// End handler: filters commit over the anchor-to-release rectangle
    pub(crate) fn on_end<S: PixelSurface + ?Sized>(
        mut self,
        surface: &mut S,
        point: IVec2,
    ) -> Option<Rect> {
        self.last = point;
        let selection = self.selection();
        match &self.kind {
            StrokeKind::Airbrush { .. } => None,
            StrokeKind::Filter { kernel } => convolve(surface, selection, kernel),
            StrokeKind::Invert => invert(surface, selection),
        }
    }
}
