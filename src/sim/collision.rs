//! Collision detection
//!
//! Axis-aligned only: the sprite is a box at a fixed x, each obstacle is a
//! column with an open band. Stateless; the session calls [`check`] once per
//! running frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Sprite};
use crate::settings::Settings;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict horizontal overlap (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, min_x: f32, max_x: f32) -> bool {
        self.max.x > min_x && self.min.x < max_x
    }
}

/// What the sprite ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Left the field vertically
    Boundary,
    /// Hit the obstacle in this track slot
    Obstacle(usize),
}

/// Sprite bounding box
pub fn sprite_rect(sprite: &Sprite, settings: &Settings) -> Rect {
    Rect::new(
        settings.sprite_x,
        sprite.y,
        settings.sprite_width,
        settings.sprite_height,
    )
}

/// Sprite's top edge is above the field or below its floor
#[inline]
pub fn out_of_bounds(sprite: &Sprite, field_height: f32) -> bool {
    sprite.y < 0.0 || sprite.y > field_height
}

/// Sprite overlaps the obstacle's columns horizontally and sticks out of its band
pub fn hits_obstacle(sprite: &Rect, obstacle: &Obstacle, obstacle_width: f32) -> bool {
    if !sprite.overlaps_x(obstacle.x, obstacle.trailing_edge(obstacle_width)) {
        return false;
    }
    sprite.min.y < obstacle.gap_top() || sprite.max.y > obstacle.gap_bottom()
}

/// Boundary check, then every obstacle in slot order
pub fn check<'a>(
    sprite: &Sprite,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    settings: &Settings,
) -> Option<Collision> {
    if out_of_bounds(sprite, settings.field_height) {
        return Some(Collision::Boundary);
    }

    let rect = sprite_rect(sprite, settings);
    obstacles
        .into_iter()
        .position(|o| hits_obstacle(&rect, o, settings.obstacle_width))
        .map(Collision::Obstacle)
}
