//! Pointer input gathered between two rendered frames.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Pixels of trackpad scroll counted as one wheel line.
const PIXELS_PER_LINE: f64 = 40.0;

/// Cursor movement, drag button and scroll accumulated over one frame.
///
/// Feed winit events through the `on_*` methods, read the totals while
/// updating the scene, then call [`clear_transients`](Self::clear_transients).
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    position: Option<Vec2>,
    delta: Vec2,
    primary: bool,
    scroll: f32,
}

impl PointerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event.
    ///
    /// The first position after the cursor enters the window produces no
    /// delta, so re-entering at a different spot does not jerk the camera.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if let Some(old_pos) = self.position {
            self.delta += new_pos - old_pos;
        }
        self.position = Some(new_pos);
    }

    /// Process a `CursorLeft` event. Any drag in progress ends.
    pub fn on_cursor_left(&mut self) {
        self.position = None;
        self.primary = false;
    }

    /// Process a `MouseInput` event.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.primary = state == ElementState::Pressed;
        }
    }

    /// Process a `MouseWheel` event. Positive values scroll away from the user.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
    }

    /// Reset per-frame movement and scroll. Button state persists.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
    }

    /// Last known cursor position, if the cursor is inside the window.
    #[must_use]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Cursor movement since the last clear, in physical pixels.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Scroll since the last clear, in wheel lines.
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Whether the primary (left) button is held.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.primary
    }
}
