//! Render adapter
//!
//! The simulation never paints. A host hands an implementation of
//! [`RenderAdapter`] to [`render_session`], which turns the sprite and the
//! on-field obstacles into axis-aligned regions.

pub mod ascii;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

pub use ascii::AsciiCanvas;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::{GamePhase, GameSession, Rect};

/// What a painted region represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Sprite,
    /// Column above a gap
    ObstacleTop,
    /// Column below a gap
    ObstacleBottom,
}

/// Painting capability injected by the host
pub trait RenderAdapter {
    /// Start a new frame over a `width` x `height` field
    fn clear(&mut self, width: f32, height: f32);

    /// Paint one opaque region
    fn draw_region(&mut self, rect: Rect, kind: RegionKind);

    /// Overlay the countdown number (preview frames only)
    fn draw_countdown(&mut self, _remaining: u32) {}
}

/// Paint the current session state
pub fn render_session<R: RenderAdapter + ?Sized>(session: &GameSession, adapter: &mut R) {
    let settings = session.settings();
    adapter.clear(settings.field_width, settings.field_height);

    for (rect, kind) in shapes::scene(session) {
        adapter.draw_region(rect, kind);
    }

    if session.phase() == GamePhase::Counting {
        adapter.draw_countdown(session.countdown_remaining());
    }
}
