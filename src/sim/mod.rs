//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (by track slot)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod obstacle;
pub mod physics;
pub mod session;
pub mod state;
pub mod track;

pub use collision::{Collision, Rect};
pub use obstacle::ObstacleFactory;
pub use session::GameSession;
pub use state::{
    CountdownStep, CountdownTicket, FrameStep, GameEvent, GamePhase, Obstacle, Snapshot, Sprite,
};
pub use track::Track;
