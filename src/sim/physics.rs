//! Sprite physics
//!
//! Semi-implicit Euler at one step per tick: velocity first, then position.

use super::state::Sprite;

/// Advance the sprite one tick under constant gravity
#[inline]
pub fn integrate(sprite: &mut Sprite, gravity: f32) {
    sprite.vel += gravity;
    sprite.y += sprite.vel;
}

/// Replace the sprite's velocity with an upward impulse of `jump_unit / 10`
///
/// The impulse overrides, never accumulates. Phase gating is the session's job.
#[inline]
pub fn flap(sprite: &mut Sprite, jump_unit: f32) {
    sprite.vel = -jump_unit / 10.0;
}

/// Position after `ticks` integration steps with no flaps
pub fn free_fall_position(y0: f32, vel0: f32, gravity: f32, ticks: u32) -> f32 {
    let n = ticks as f32;
    y0 + n * vel0 + gravity * n * (n + 1.0) / 2.0
}
