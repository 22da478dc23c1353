//! Gesture tracking
//!
//! A [`GestureTracker`] turns one start event, any number of move events and
//! one end event into a single [`Stroke`]. It does not know which tool is in
//! use; the stroke carries its own move and end handlers.

mod stroke;

use glam::IVec2;
use tracing::{debug, warn};

use crate::surface::PixelSurface;
use crate::tools::ToolParameters;
use crate::types::Rect;

pub use stroke::{Stroke, StrokeKind};

/// Tracker state. At most one stroke is active at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Active(Stroke),
}

/// `Idle -> Active -> Idle` state machine over pointer gestures
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    state: GestureState,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Check if a stroke is currently in progress
    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Active(_))
    }

    /// The in-flight stroke, if any
    pub fn stroke(&self) -> Option<&Stroke> {
        match &self.state {
            GestureState::Active(stroke) => Some(stroke),
            GestureState::Idle => None,
        }
    }

    /// `Idle -> Active`. Returns false (and keeps the current stroke) if a
    /// stroke is already active.
    pub fn begin(&mut self, stroke: Stroke) -> bool {
        if let GestureState::Active(current) = &self.state {
            warn!(
                "gesture start while '{}' stroke is active, ignoring",
                current.tool()
            );
            return false;
        }
        self.state = GestureState::Active(stroke);
        true
    }

    /// Deliver a move event to the active stroke. `params` carries the
    /// parameters in effect now; only its flow rate reaches a latched stroke.
    pub fn advance<S: PixelSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        point: IVec2,
        params: &ToolParameters,
    ) -> Option<Rect> {
        match &mut self.state {
            GestureState::Active(stroke) => stroke.on_move(surface, point, params),
            GestureState::Idle => {
                debug!("gesture move with no active stroke, ignoring");
                None
            }
        }
    }

    /// `Active -> Idle`, running the stroke's end handler
    pub fn finish<S: PixelSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        point: IVec2,
    ) -> Option<Rect> {
        match std::mem::take(&mut self.state) {
            GestureState::Active(stroke) => stroke.on_end(surface, point),
            GestureState::Idle => {
                debug!("gesture end with no active stroke, ignoring");
                None
            }
        }
    }
}
