//! Core simulation types
//!
//! Everything a renderer or host needs to observe lives here.

use serde::{Deserialize, Serialize};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing started yet
    #[default]
    Idle,
    /// Countdown running; sprite and track are frozen
    Counting,
    /// Frame-driven simulation
    Running,
    /// Collision happened; waiting for the next start
    Ended,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "Idle",
            GamePhase::Counting => "Counting",
            GamePhase::Running => "Running",
            GamePhase::Ended => "Ended",
        }
    }

    /// Whether `start()` is accepted from this phase
    pub fn can_start(&self) -> bool {
        matches!(self, GamePhase::Idle | GamePhase::Ended)
    }

    /// Whether the host should keep requesting animation frames
    pub fn wants_frames(&self) -> bool {
        matches!(self, GamePhase::Counting | GamePhase::Running)
    }
}

/// The player sprite. Horizontal position is fixed by settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sprite {
    /// Top edge (pixels, grows downward)
    pub y: f32,
    /// Vertical velocity (pixels/tick, negative is up)
    pub vel: f32,
}

impl Sprite {
    pub fn new(y: f32) -> Self {
        Self { y, vel: 0.0 }
    }
}

/// A pair of blocking columns around a vertical gap
///
/// The open band is `[gap_center - gap_height, gap_center + gap_height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub gap_center: f32,
    /// Half-height of the open band
    pub gap_height: f32,
}

impl Obstacle {
    /// Upper edge of the open band (bottom of the top column)
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_center - self.gap_height
    }

    /// Lower edge of the open band (top of the bottom column)
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_center + self.gap_height
    }

    /// Right edge, given the configured obstacle width
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// Notifications queued for the host (score observer, HUD, countdown text)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Session reset; countdown begins at `remaining`
    CountdownStarted { remaining: u32 },
    /// One countdown tick elapsed
    CountdownTick { remaining: u32 },
    /// Countdown finished; simulation is live
    Launched,
    /// An obstacle was recycled
    ScoreChanged { score: u32 },
    /// Collision; the session is frozen
    Ended { final_score: u32 },
}

/// Identifies the countdown a timer belongs to
///
/// Every `start()` hands out a fresh ticket, so a timer left over from an
/// earlier session can never advance the current countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountdownTicket(pub(crate) u64);

/// Outcome of one countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// Ticket is stale or the session is not counting; nothing changed
    Stale,
    /// Still counting
    Remaining(u32),
    /// Countdown done and now Running; the host must cancel its timer
    Launched,
}

/// Outcome of one simulation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// Not running; nothing simulated
    Idle,
    /// Frame simulated; schedule the next one
    Continue,
    /// Collision this frame; stop scheduling frames
    Ended,
}

/// Serializable view of a session
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub countdown_remaining: u32,
    pub frame: u64,
    pub sprite: Sprite,
    pub obstacles: Vec<Obstacle>,
}
