//! Pointer-to-buffer coordinate resolution

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::types::Rect;

/// Phase of a pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureKind {
    Start,
    Move,
    End,
}

/// A raw pointer event in screen (client) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: GestureKind,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(kind: GestureKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }
}

/// Screen-space placement of the buffer (its top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferenceFrame {
    pub left: f32,
    pub top: f32,
}

impl ReferenceFrame {
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

/// Map a pointer event into buffer-local pixel coordinates
///
/// No clamping: positions outside the buffer are returned as-is.
pub fn resolve(event: &PointerEvent, frame: &ReferenceFrame) -> IVec2 {
    let local = Vec2::new(event.x - frame.left, event.y - frame.top);
    local.floor().as_ivec2()
}

/// Rectangle spanned by two corner points, in either order
pub fn normalize_rect(p1: IVec2, p2: IVec2) -> Rect {
    let min = p1.min(p2);
    let max = p1.max(p2);
    Rect::new(
        min.x,
        min.y,
        max.x.abs_diff(min.x),
        max.y.abs_diff(min.y),
    )
}
