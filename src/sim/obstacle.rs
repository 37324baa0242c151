//! Obstacle generation
//!
//! Gap half-height is drawn from `[min_gap, max_gap]`, then the gap center is
//! drawn so both blocking columns keep at least their margin:
//!
//! ```text
//! top column    = gap_center - gap_height                  >= top_margin
//! bottom column = field_height - (gap_center + gap_height) >= bottom_margin
//! ```
//!
//! When the field cannot fit `max_gap` the upper bound is clamped to what
//! fits. When it cannot even fit `min_gap`, construction fails.

use rand::Rng;

use super::state::Obstacle;
use crate::error::GameError;
use crate::settings::Settings;

/// Validated obstacle geometry bounds for one field
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleFactory {
    field_height: f32,
    top_margin: f32,
    bottom_margin: f32,
    min_gap: f32,
    max_gap: f32,
}

impl ObstacleFactory {
    pub fn new(settings: &Settings) -> Result<Self, GameError> {
        let min_gap = settings.min_gap();
        let feasible = (settings.field_height - settings.top_margin - settings.bottom_margin) / 2.0;
        if feasible < min_gap {
            return Err(GameError::InfeasibleGeometry {
                field_height: settings.field_height,
                required: settings.required_field_height(),
            });
        }

        let max_gap = settings.max_gap().min(feasible).max(min_gap);
        if max_gap < settings.max_gap() {
            log::warn!(
                "Field height {} clamps max gap {} -> {}",
                settings.field_height,
                settings.max_gap(),
                max_gap
            );
        }

        Ok(Self {
            field_height: settings.field_height,
            top_margin: settings.top_margin,
            bottom_margin: settings.bottom_margin,
            min_gap,
            max_gap,
        })
    }

    /// Effective gap half-height bounds after clamping
    pub fn gap_bounds(&self) -> (f32, f32) {
        (self.min_gap, self.max_gap)
    }

    /// Build one obstacle with its left edge at `x`
    pub fn generate<R: Rng>(&self, x: f32, rng: &mut R) -> Obstacle {
        let gap_height = draw(rng, self.min_gap, self.max_gap);
        let lowest = self.top_margin + gap_height;
        let highest = self.field_height - self.bottom_margin - gap_height;
        let gap_center = draw(rng, lowest, highest);

        Obstacle {
            x,
            gap_center,
            gap_height,
        }
    }
}

/// Uniform draw from `[lo, hi]`, collapsing to `lo` when rounding leaves hi < lo
fn draw<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}
