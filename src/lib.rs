//! Flap Gap - a single-screen reflex game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (sprite physics, obstacle track, collisions, session state)
//! - `renderer`: Render adapter seam plus native/browser painters
//! - `platform`: Host scheduling glue (fixed-step frame clock, browser timers)
//! - `settings`: Tunable, serde-loadable configuration
//! - `error`: Crate error type

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::Settings;

/// Default tuning constants (every one is overridable through [`Settings`])
pub mod consts {
    /// Play field dimensions (pixels)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Sprite is pinned at this horizontal position; only its height changes
    pub const SPRITE_X: f32 = 50.0;
    pub const SPRITE_WIDTH: f32 = 20.0;
    pub const SPRITE_HEIGHT: f32 = 20.0;

    /// Jump unit drives both flap strength and gap size
    pub const JUMP_UNIT: f32 = 60.0;
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.18;

    /// Obstacle defaults
    pub const OBSTACLE_SPACING: f32 = 240.0;
    pub const OBSTACLE_WIDTH: f32 = 34.0;
    /// Leftward scroll (pixels/tick)
    pub const OBSTACLE_SPEED: f32 = 2.15;

    /// Gap height bounds as fractions of the jump unit
    pub const MIN_GAP_FACTOR: f32 = 0.92;
    pub const MAX_GAP_FACTOR: f32 = 1.58;

    /// Minimum blocking extent above and below every gap (2x sprite height)
    pub const TOP_MARGIN: f32 = 2.0 * SPRITE_HEIGHT;
    pub const BOTTOM_MARGIN: f32 = 2.0 * SPRITE_HEIGHT;

    /// Countdown length in timer ticks (one per second)
    pub const COUNTDOWN_SECONDS: u32 = 3;
    /// Obstacles kept alive on the track
    pub const TRACK_LEN: usize = 50;

    /// Sprite starts at field_height / this
    pub const START_HEIGHT_DIVISOR: f32 = 2.5;

    /// Fixed simulation frame rate used by the frame clock (ticks per second)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum simulation frames per display frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Countdown timer interval (milliseconds)
    pub const COUNTDOWN_INTERVAL_MS: i32 = 1000;
}
