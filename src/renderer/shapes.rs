//! Region geometry for sprites and obstacles

use crate::settings::Settings;
use crate::sim::collision::sprite_rect;
use crate::sim::{GameSession, Obstacle, Rect};

use super::RegionKind;

/// Top and bottom columns of one obstacle
pub fn obstacle_regions(obstacle: &Obstacle, settings: &Settings) -> [(Rect, RegionKind); 2] {
    let width = settings.obstacle_width;
    let top = Rect::new(obstacle.x, 0.0, width, obstacle.gap_top().max(0.0));
    let bottom_y = obstacle.gap_bottom().min(settings.field_height);
    let bottom = Rect::new(obstacle.x, bottom_y, width, settings.field_height - bottom_y);
    [
        (top, RegionKind::ObstacleTop),
        (bottom, RegionKind::ObstacleBottom),
    ]
}

/// Whether any part of the obstacle lies inside the field horizontally
#[inline]
pub fn on_field(obstacle: &Obstacle, settings: &Settings) -> bool {
    obstacle.x < settings.field_width && obstacle.trailing_edge(settings.obstacle_width) > 0.0
}

/// Sprite first, then on-field obstacles in slot order
pub fn scene(session: &GameSession) -> Vec<(Rect, RegionKind)> {
    let settings = session.settings();
    let mut regions = vec![(sprite_rect(session.sprite(), settings), RegionKind::Sprite)];
    regions.extend(
        session
            .track()
            .iter()
            .filter(|o| on_field(o, settings))
            .flat_map(|o| obstacle_regions(o, settings)),
    );
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_regions_frame_the_gap() {
        let settings = Settings::default();
        let obstacle = Obstacle {
            x: 100.0,
            gap_center: 300.0,
            gap_height: 70.0,
        };
        let [(top, top_kind), (bottom, bottom_kind)] = obstacle_regions(&obstacle, &settings);

        assert_eq!(top_kind, RegionKind::ObstacleTop);
        assert_eq!(top.min.y, 0.0);
        assert_eq!(top.max.y, 230.0);
        assert_eq!(top.width(), 34.0);

        assert_eq!(bottom_kind, RegionKind::ObstacleBottom);
        assert_eq!(bottom.min.y, 370.0);
        assert_eq!(bottom.max.y, 600.0);
    }

    #[test]
    fn test_on_field() {
        let settings = Settings::default();
        let at = |x| Obstacle {
            x,
            gap_center: 300.0,
            gap_height: 60.0,
        };
        assert!(on_field(&at(0.0), &settings));
        assert!(on_field(&at(-33.0), &settings));
        assert!(!on_field(&at(-34.0), &settings));
        assert!(on_field(&at(799.0), &settings));
        assert!(!on_field(&at(800.0), &settings));
    }

    #[test]
    fn test_scene_of_fresh_session_is_just_sprite() {
        // Fresh track starts at the right edge, fully off-field
        let session = GameSession::new(Settings::default(), 1).unwrap();
        let regions = scene(&session);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].1, RegionKind::Sprite);
        assert_eq!(regions[0].0.min.x, 50.0);
        assert_eq!(regions[0].0.min.y, 240.0);
    }
}
