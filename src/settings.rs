//! Game settings and tuning
//!
//! Every gameplay constant is overridable. Missing JSON fields fall back to
//! the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Sprite ===
    /// Fixed horizontal position of the sprite's left edge
    pub sprite_x: f32,
    pub sprite_width: f32,
    pub sprite_height: f32,
    /// Sprite starts at field_height / start_height_divisor
    pub start_height_divisor: f32,

    // === Physics ===
    /// Flap impulse is jump_unit / 10; gap bounds scale with it too
    pub jump_unit: f32,
    /// Velocity added every tick (pixels/tick²)
    pub gravity: f32,

    // === Obstacles ===
    pub obstacle_spacing: f32,
    pub obstacle_width: f32,
    /// Leftward scroll per tick
    pub obstacle_speed: f32,
    pub min_gap_factor: f32,
    pub max_gap_factor: f32,
    pub top_margin: f32,
    pub bottom_margin: f32,
    pub track_len: usize,

    // === Session ===
    pub countdown_seconds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            sprite_x: SPRITE_X,
            sprite_width: SPRITE_WIDTH,
            sprite_height: SPRITE_HEIGHT,
            start_height_divisor: START_HEIGHT_DIVISOR,

            jump_unit: JUMP_UNIT,
            gravity: GRAVITY,

            obstacle_spacing: OBSTACLE_SPACING,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
            min_gap_factor: MIN_GAP_FACTOR,
            max_gap_factor: MAX_GAP_FACTOR,
            top_margin: TOP_MARGIN,
            bottom_margin: BOTTOM_MARGIN,
            track_len: TRACK_LEN,

            countdown_seconds: COUNTDOWN_SECONDS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON (unspecified fields keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Same settings with the field resized (browser canvas dimensions)
    pub fn with_field(mut self, width: f32, height: f32) -> Self {
        self.field_width = width;
        self.field_height = height;
        self
    }

    /// Smallest gap half-height an obstacle may draw
    #[inline]
    pub fn min_gap(&self) -> f32 {
        self.min_gap_factor * self.jump_unit
    }

    /// Largest gap half-height an obstacle may draw (before feasibility clamping)
    #[inline]
    pub fn max_gap(&self) -> f32 {
        self.max_gap_factor * self.jump_unit
    }

    /// Velocity a flap sets (negative is up)
    #[inline]
    pub fn flap_velocity(&self) -> f32 {
        -self.jump_unit / 10.0
    }

    /// Sprite's vertical position at session start
    #[inline]
    pub fn start_y(&self) -> f32 {
        self.field_height / self.start_height_divisor
    }

    /// Horizontal position a recycled obstacle is re-appended at
    #[inline]
    pub fn recycle_x(&self) -> f32 {
        self.field_width + self.obstacle_spacing * (self.track_len.saturating_sub(1)) as f32
    }

    /// Field height needed for a minimum gap plus both margins
    pub fn required_field_height(&self) -> f32 {
        self.top_margin + 2.0 * self.min_gap() + self.bottom_margin
    }

    /// Check that these settings can drive a session
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("sprite_width", self.sprite_width),
            ("sprite_height", self.sprite_height),
            ("start_height_divisor", self.start_height_divisor),
            ("jump_unit", self.jump_unit),
            ("obstacle_spacing", self.obstacle_spacing),
            ("obstacle_width", self.obstacle_width),
            ("min_gap_factor", self.min_gap_factor),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(GameError::InvalidSetting {
                    name,
                    reason: format!("must be positive and finite, got {value}"),
                });
            }
        }

        let non_negative = [
            ("gravity", self.gravity),
            ("obstacle_speed", self.obstacle_speed),
            ("top_margin", self.top_margin),
            ("bottom_margin", self.bottom_margin),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(GameError::InvalidSetting {
                    name,
                    reason: format!("must be non-negative and finite, got {value}"),
                });
            }
        }

        if self.max_gap_factor < self.min_gap_factor {
            return Err(GameError::InvalidSetting {
                name: "max_gap_factor",
                reason: format!(
                    "{} is below min_gap_factor {}",
                    self.max_gap_factor, self.min_gap_factor
                ),
            });
        }

        if self.track_len == 0 {
            return Err(GameError::InvalidSetting {
                name: "track_len",
                reason: "track needs at least one obstacle".to_string(),
            });
        }

        let required = self.required_field_height();
        if self.field_height < required {
            return Err(GameError::InfeasibleGeometry {
                field_height: self.field_height,
                required,
            });
        }

        Ok(())
    }
}
