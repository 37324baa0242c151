//! Demo-mode flap policy
//!
//! Steers toward the gap of the nearest obstacle the sprite has not yet
//! cleared. Good enough to keep an attract screen alive, not to win.

use super::session::GameSession;
use super::state::GamePhase;

/// Fraction of the gap half-height the sprite may sink below center before flapping
const SINK_ALLOWANCE: f32 = 0.35;

/// Vertical center the sprite should aim for this frame
pub fn target_height(session: &GameSession) -> f32 {
    let settings = session.settings();
    let width = session.track().obstacle_width();

    session
        .track()
        .iter()
        .filter(|o| o.trailing_edge(width) > settings.sprite_x)
        .min_by(|a, b| a.x.total_cmp(&b.x))
        .map(|o| o.gap_center + o.gap_height * SINK_ALLOWANCE)
        .unwrap_or(settings.field_height / 2.0)
}

/// Whether the demo player would flap right now
pub fn should_flap(session: &GameSession) -> bool {
    if session.phase() != GamePhase::Running {
        return false;
    }
    let sprite = session.sprite();
    let center = sprite.y + session.settings().sprite_height / 2.0;
    sprite.vel >= 0.0 && center > target_height(session)
}
