//! Platform abstraction layer
//!
//! Turns host time into simulation ticks:
//! - `FrameClock`: variable display frames -> fixed simulation frames
//! - `web`: cancellable browser timers (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::{FRAME_DT, MAX_SUBSTEPS};

/// Fixed-step accumulator
///
/// Obstacle speed and gravity are per tick, so the simulation must tick at
/// a constant rate whatever the display refresh is.
#[derive(Debug, Clone)]
pub struct FrameClock {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
    last_time: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(FRAME_DT, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Forget accumulated time (on start, or when the loop was suspended)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }

    /// Feed a display timestamp in milliseconds; returns ticks to simulate
    ///
    /// The first call after a reset only records the timestamp and yields one
    /// tick so a freshly launched game moves on its first frame.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_time.replace(now_ms) else {
            return 1;
        };

        let dt = (((now_ms - last) / 1000.0) as f32).clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_substeps {
            // Drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_ticks_once() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(1000.0), 1);
    }

    #[test]
    fn test_sixty_hz_display_ticks_once_per_frame() {
        let mut clock = FrameClock::default();
        clock.advance(0.0);
        let mut total = 0;
        for i in 1..=60 {
            total += clock.advance(i as f64 * 1000.0 / 60.0);
        }
        assert!((59..=60).contains(&total), "got {total}");
    }

    #[test]
    fn test_high_refresh_display_skips_frames() {
        let mut clock = FrameClock::default();
        clock.advance(0.0);
        let mut total = 0;
        for i in 1..=144 {
            total += clock.advance(i as f64 * 1000.0 / 144.0);
        }
        assert!((59..=60).contains(&total), "got {total}");
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut clock = FrameClock::default();
        clock.advance(0.0);
        assert_eq!(clock.advance(5000.0), MAX_SUBSTEPS);
        // Backlog was dropped
        assert!(clock.advance(5000.0 + 1000.0 / 60.0) <= 2);
    }

    #[test]
    fn test_reset_forgets_time() {
        let mut clock = FrameClock::default();
        clock.advance(0.0);
        clock.advance(10.0);
        clock.reset();
        assert_eq!(clock.advance(99_999.0), 1);
    }
}
