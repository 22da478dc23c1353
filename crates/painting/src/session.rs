//! Paint session - the host-facing entry points
//!
//! This module connects:
//! - Tool parameters that persist across strokes (tool, color, diameter, flow)
//! - The tool registry (dispatch on the tool latched at gesture start)
//! - The gesture tracker (move/end delivery to the active stroke)
//!
//! The session never owns pixels. Every entry point that can touch the
//! image borrows the host's [`PixelSurface`] for the duration of the call.

use glam::IVec2;
use sfumato_config::{EditorConfig, MAX_BRUSH_DIAMETER};
use tracing::{debug, info, warn};

use crate::geometry::{GestureKind, PointerEvent, ReferenceFrame, resolve};
use crate::gesture::{GestureTracker, Stroke};
use crate::surface::PixelSurface;
use crate::tools::{ToolParameters, ToolRegistry};
use crate::types::{Color, Rect};
use crate::validation::clamp_flow_rate;

/// Editing session for one host buffer
#[derive(Debug, Clone, Default)]
pub struct PaintSession {
    params: ToolParameters,
    registry: ToolRegistry,
    tracker: GestureTracker,
    frame: ReferenceFrame,
}

impl PaintSession {
    /// Create a session with the default tools and parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session whose initial parameters come from the editor config
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            params: ToolParameters::from(&config.brush),
            ..Self::default()
        }
    }

    /// Create a session with a custom tool table
    pub fn with_registry(registry: ToolRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    /// Get the current tool parameters
    pub fn params(&self) -> &ToolParameters {
        &self.params
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ToolRegistry {
        &mut self.registry
    }

    /// Select the tool for the next stroke. An active stroke keeps its tool.
    pub fn select_tool(&mut self, tool: impl Into<String>) {
        self.params.tool = tool.into();
    }

    /// Set the primary color
    pub fn set_color(&mut self, color: Color) {
        self.params.color = color;
    }

    /// Set the brush diameter in pixels, capped at `MAX_BRUSH_DIAMETER`
    pub fn set_brush_diameter(&mut self, diameter: u32) {
        if diameter > MAX_BRUSH_DIAMETER {
            warn!(
                "brush diameter {} exceeds {}, capping",
                diameter, MAX_BRUSH_DIAMETER
            );
        }
        self.params.brush_diameter = diameter.min(MAX_BRUSH_DIAMETER);
    }

    /// Set the paint flow rate, clamped to 0.0-1.0. Takes effect on the next
    /// move, including mid-stroke.
    pub fn set_flow_rate(&mut self, flow_rate: f32) {
        self.params.flow_rate = clamp_flow_rate(flow_rate);
    }

    /// Set where the buffer sits in screen space, for `handle_pointer_event`
    pub fn set_reference_frame(&mut self, frame: ReferenceFrame) {
        self.frame = frame;
    }

    /// Check if a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.tracker.is_active()
    }

    /// The in-flight stroke, if any
    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.tracker.stroke()
    }

    /// Begin a stroke at `point` with the currently selected tool
    ///
    /// Returns false if no stroke was started: the tool is unknown, or a
    /// stroke is already active.
    pub fn handle_gesture_start(&mut self, point: IVec2) -> bool {
        let Some(action) = self.registry.lookup(&self.params.tool) else {
            warn!("gesture start with unknown tool '{}', ignoring", self.params.tool);
            return false;
        };

        let stroke = Stroke::new(point, action, &self.params);
        let started = self.tracker.begin(stroke);
        if started {
            info!(
                "stroke started: tool='{}' at ({}, {}), diameter={}, flow={:.2}",
                self.params.tool, point.x, point.y, self.params.brush_diameter, self.params.flow_rate
            );
        }
        started
    }

    /// Continue the active stroke at `point`
    ///
    /// Returns the region written by an airbrush pass, if any.
    pub fn handle_gesture_move<S: PixelSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        point: IVec2,
    ) -> Option<Rect> {
        self.tracker.advance(surface, point, &self.params)
    }

    /// End the active stroke at `point`
    ///
    /// Returns the region rewritten by a filter, if any.
    pub fn handle_gesture_end<S: PixelSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        point: IVec2,
    ) -> Option<Rect> {
        let tool = self.tracker.stroke().map(|stroke| stroke.tool().to_string());
        let written = self.tracker.finish(surface, point);
        if let Some(tool) = tool {
            info!(
                "stroke ended: tool='{}' at ({}, {}), region={:?}",
                tool, point.x, point.y, written
            );
        }
        written
    }

    /// Resolve a raw pointer event against the reference frame and dispatch
    /// it to the matching gesture entry point
    pub fn handle_pointer_event<S: PixelSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        event: &PointerEvent,
    ) -> Option<Rect> {
        let point = resolve(event, &self.frame);
        debug!("pointer {:?} at ({}, {})", event.kind, point.x, point.y);
        match event.kind {
            GestureKind::Start => {
                self.handle_gesture_start(point);
                None
            }
            GestureKind::Move => self.handle_gesture_move(surface, point),
            GestureKind::End => self.handle_gesture_end(surface, point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Canvas;
    use crate::tools::ToolAction;
    use crate::types::Rgba;

    const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    fn distance(x: u32, y: u32, cx: i32, cy: i32) -> f32 {
        let dx = x as f32 - cx as f32;
        let dy = y as f32 - cy as f32;
        (dx * dx + dy * dy).sqrt()
    }

    #[test]
    fn test_session_defaults() {
        let session = PaintSession::new();
        assert_eq!(session.params(), &ToolParameters::default());
        assert_eq!(session.registry().len(), 8);
        assert!(!session.is_stroking());
    }

    #[test]
    fn test_from_config() {
        let config = EditorConfig::from_json(
            r#"{ "brush": { "tool": "Quadratic", "color": [10, 20, 30], "diameter": 12, "flow_rate": 0.8 } }"#,
        )
        .unwrap();
        let session = PaintSession::from_config(&config);

        assert_eq!(session.params().tool, "Quadratic");
        assert_eq!(session.params().color, Color::new(10, 20, 30));
        assert_eq!(session.params().brush_diameter, 12);
        assert_eq!(session.params().flow_rate, 0.8);
    }

    #[test]
    fn test_setters() {
        let mut session = PaintSession::new();
        session.select_tool("Invert");
        session.set_color(Color::new(1, 2, 3));
        session.set_brush_diameter(35);
        session.set_flow_rate(1.7);

        let params = session.params();
        assert_eq!(params.tool, "Invert");
        assert_eq!(params.color, Color::new(1, 2, 3));
        assert_eq!(params.brush_diameter, 35);
        assert_eq!(params.flow_rate, 1.0);
    }

    #[test]
    fn test_airbrush_stroke_end_to_end() {
        let mut canvas = Canvas::filled(100, 100, WHITE);
        let mut session = PaintSession::new();
        session.select_tool("Constant");
        session.set_color(Color::BLACK);
        session.set_brush_diameter(10);
        session.set_flow_rate(0.5);

        let center = IVec2::new(50, 50);
        assert!(session.handle_gesture_start(center));
        let written = session.handle_gesture_move(&mut canvas, center);
        assert_eq!(session.handle_gesture_end(&mut canvas, center), None);
        assert!(!session.is_stroking());

        let written = written.unwrap();
        for y in 0..100 {
            for x in 0..100 {
                let pixel = canvas.get_pixel(x, y).unwrap();
                if distance(x, y, 50, 50) > 5.0 {
                    assert_eq!(pixel, WHITE, "({x}, {y})");
                } else if written.contains(x as i32, y as i32) {
                    assert!(pixel.r.abs_diff(127) <= 1, "({x}, {y}) = {pixel:?}");
                    assert_eq!(pixel.a, 255);
                }
            }
        }
    }

    #[test]
    fn test_edge_detect_stroke_end_to_end() {
        let flat = Rgba::new(120, 60, 30, 255);
        let mut canvas = Canvas::filled(40, 40, flat);
        let mut session = PaintSession::new();
        session.select_tool("EdgeDetection");

        session.handle_gesture_start(IVec2::new(25, 30));
        session.handle_gesture_move(&mut canvas, IVec2::new(20, 20));
        let written = session.handle_gesture_end(&mut canvas, IVec2::new(10, 5));

        let selection = Rect::new(10, 5, 15, 25);
        assert_eq!(written, Some(selection.shrink(1)));
        for y in 0..40 {
            for x in 0..40 {
                let pixel = canvas.get_pixel(x, y).unwrap();
                if selection.shrink(1).contains(x as i32, y as i32) {
                    assert_eq!(pixel, BLACK);
                } else {
                    assert_eq!(pixel, flat);
                }
            }
        }
    }

    #[test]
    fn test_tool_change_mid_stroke_is_ignored() {
        let mut canvas = Canvas::filled(20, 20, WHITE);
        let mut session = PaintSession::new();
        session.select_tool("Invert");

        session.handle_gesture_start(IVec2::new(0, 0));
        session.select_tool("Constant");
        session.set_flow_rate(1.0);
        session.handle_gesture_move(&mut canvas, IVec2::new(10, 10));
        let written = session.handle_gesture_end(&mut canvas, IVec2::new(4, 4));

        // The move did not paint; the release inverted the selection
        assert_eq!(written, Some(Rect::new(0, 0, 4, 4)));
        assert_eq!(canvas.get_pixel(2, 2), Some(BLACK));
        assert_eq!(canvas.get_pixel(10, 10), Some(WHITE));

        // The next stroke picks up the new tool
        session.handle_gesture_start(IVec2::new(10, 10));
        assert_eq!(session.active_stroke().unwrap().tool(), "Constant");
    }

    #[test]
    fn test_diameter_change_mid_stroke_is_ignored() {
        let mut canvas = Canvas::filled(60, 60, WHITE);
        let mut session = PaintSession::new();
        session.set_brush_diameter(4);
        session.set_flow_rate(1.0);

        session.handle_gesture_start(IVec2::new(30, 30));
        session.set_brush_diameter(40);
        let written = session.handle_gesture_move(&mut canvas, IVec2::new(30, 30));
        session.handle_gesture_end(&mut canvas, IVec2::new(30, 30));

        assert_eq!(written, Some(Rect::new(28, 28, 4, 4)));
        assert_eq!(canvas.get_pixel(20, 30), Some(WHITE));
    }

    #[test]
    fn test_flow_change_mid_stroke_applies() {
        let mut canvas = Canvas::filled(30, 30, WHITE);
        let mut session = PaintSession::new();
        session.set_brush_diameter(4);
        session.set_flow_rate(1.0);

        assert!(session.handle_gesture_start(IVec2::new(10, 10)));
        session.set_flow_rate(0.0);
        session.handle_gesture_move(&mut canvas, IVec2::new(10, 10));
        assert_eq!(canvas.get_pixel(10, 10), Some(WHITE));

        session.set_flow_rate(1.0);
        session.handle_gesture_move(&mut canvas, IVec2::new(10, 10));
        assert_eq!(canvas.get_pixel(10, 10), Some(BLACK));
        session.handle_gesture_end(&mut canvas, IVec2::new(10, 10));
    }

    #[test]
    fn test_brush_diameter_is_capped() {
        let mut session = PaintSession::new();
        session.set_brush_diameter(u32::MAX);
        assert_eq!(session.params().brush_diameter, MAX_BRUSH_DIAMETER);

        let mut canvas = Canvas::filled(10, 10, WHITE);
        assert!(session.handle_gesture_start(IVec2::new(5, 5)));
        assert_eq!(
            session.handle_gesture_move(&mut canvas, IVec2::new(5, 5)),
            Some(Rect::new(0, 0, 10, 10))
        );
    }

    #[test]
    fn test_far_off_canvas_airbrush_move_is_noop() {
        let mut canvas = Canvas::filled(20, 20, WHITE);
        let before = canvas.clone();
        let mut session = PaintSession::new();
        session.set_flow_rate(1.0);

        let start = PointerEvent::new(GestureKind::Start, 5.0, 5.0);
        assert_eq!(session.handle_pointer_event(&mut canvas, &start), None);
        for (x, y) in [(-1.0e12, 5.0), (5.0, 1.0e12), (1.0e12, -1.0e12)] {
            let event = PointerEvent::new(GestureKind::Move, x, y);
            assert_eq!(session.handle_pointer_event(&mut canvas, &event), None);
        }
        assert!(session.is_stroking());
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_unknown_tool_does_not_start() {
        let mut canvas = Canvas::filled(10, 10, WHITE);
        let before = canvas.clone();
        let mut session = PaintSession::new();
        session.select_tool("Smudge");

        assert!(!session.handle_gesture_start(IVec2::new(1, 1)));
        assert_eq!(session.handle_gesture_move(&mut canvas, IVec2::new(5, 5)), None);
        assert_eq!(session.handle_gesture_end(&mut canvas, IVec2::new(9, 9)), None);
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_zero_diameter_airbrush_is_noop() {
        let mut canvas = Canvas::filled(10, 10, WHITE);
        let before = canvas.clone();
        let mut session = PaintSession::new();
        session.set_brush_diameter(0);

        assert!(session.handle_gesture_start(IVec2::new(5, 5)));
        assert_eq!(session.handle_gesture_move(&mut canvas, IVec2::new(5, 5)), None);
        session.handle_gesture_end(&mut canvas, IVec2::new(5, 5));
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_degenerate_selection_is_noop() {
        let mut canvas = Canvas::filled(10, 10, WHITE);
        let before = canvas.clone();
        let mut session = PaintSession::new();

        for tool in ["GaussianBlur", "Invert"] {
            session.select_tool(tool);
            session.handle_gesture_start(IVec2::new(3, 3));
            assert_eq!(session.handle_gesture_end(&mut canvas, IVec2::new(3, 8)), None);
        }
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_custom_tool_registration() {
        let mut canvas = Canvas::filled(10, 10, WHITE);
        let mut session = PaintSession::new();
        session
            .registry_mut()
            .register("Negative", ToolAction::Invert);
        session.select_tool("Negative");

        session.handle_gesture_start(IVec2::new(0, 0));
        session.handle_gesture_end(&mut canvas, IVec2::new(10, 10));
        assert!(canvas.pixels().iter().all(|p| *p == BLACK));
    }

    #[test]
    fn test_pointer_events_resolve_against_frame() {
        let mut canvas = Canvas::filled(20, 20, WHITE);
        let mut session = PaintSession::new();
        session.select_tool("Invert");
        session.set_reference_frame(ReferenceFrame::new(100.0, 50.0));

        let events = [
            PointerEvent::new(GestureKind::Start, 102.4, 52.9),
            PointerEvent::new(GestureKind::Move, 110.0, 60.0),
            PointerEvent::new(GestureKind::End, 106.0, 57.5),
        ];
        let mut written = None;
        for event in &events {
            written = session.handle_pointer_event(&mut canvas, event);
        }

        assert_eq!(written, Some(Rect::new(2, 2, 4, 5)));
        assert_eq!(canvas.get_pixel(2, 2), Some(BLACK));
        assert_eq!(canvas.get_pixel(6, 2), Some(WHITE));
    }
}
