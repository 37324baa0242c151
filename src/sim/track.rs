//! Obstacle track
//!
//! A fixed-size arena of obstacles scrolling left. An obstacle whose trailing
//! edge leaves the field is regenerated in the same slot, positioned at the
//! back of the stream. Slots are never reordered.

use rand::Rng;

use super::obstacle::ObstacleFactory;
use super::state::Obstacle;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Track {
    obstacles: Vec<Obstacle>,
    width: f32,
    recycle_x: f32,
}

impl Track {
    /// Lay out `track_len` obstacles starting at the right edge of the field
    pub fn new<R: Rng>(settings: &Settings, factory: &ObstacleFactory, rng: &mut R) -> Self {
        let obstacles = (0..settings.track_len)
            .map(|i| factory.generate(settings.field_width + i as f32 * settings.obstacle_spacing, rng))
            .collect();

        Self {
            obstacles,
            width: settings.obstacle_width,
            recycle_x: settings.recycle_x(),
        }
    }

    /// Scroll every obstacle left by `speed`, recycling those that left the field
    ///
    /// Returns how many obstacles were recycled.
    pub fn advance<R: Rng>(
        &mut self,
        speed: f32,
        factory: &ObstacleFactory,
        rng: &mut R,
    ) -> u32 {
        let mut recycled = 0;
        for (index, obstacle) in self.obstacles.iter_mut().enumerate() {
            obstacle.x -= speed;
            if obstacle.trailing_edge(self.width) < 0.0 {
                *obstacle = factory.generate(self.recycle_x, rng);
                recycled += 1;
                log::debug!("Recycled obstacle {} to x={}", index, self.recycle_x);
            }
        }
        recycled
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Obstacle> {
        self.obstacles.get(index)
    }

    /// Obstacles in slot order
    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Obstacle width shared by every slot
    pub fn obstacle_width(&self) -> f32 {
        self.width
    }

    #[cfg(test)]
    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut Obstacle {
        &mut self.obstacles[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn small_settings() -> Settings {
        Settings {
            track_len: 4,
            ..Settings::default()
        }
    }

    #[test]
    fn test_initial_layout() {
        let settings = Settings::default();
        let factory = ObstacleFactory::new(&settings).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let track = Track::new(&settings, &factory, &mut rng);

        assert_eq!(track.len(), 50);
        for (i, obstacle) in track.iter().enumerate() {
            assert_eq!(obstacle.x, 800.0 + i as f32 * 240.0);
        }
    }

    #[test]
    fn test_advance_moves_every_obstacle() {
        let settings = small_settings();
        let factory = ObstacleFactory::new(&settings).unwrap();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut track = Track::new(&settings, &factory, &mut rng);
        let before: Vec<f32> = track.iter().map(|o| o.x).collect();

        let recycled = track.advance(2.15, &factory, &mut rng);
        assert_eq!(recycled, 0);
        for (o, x) in track.iter().zip(before) {
            assert!((o.x - (x - 2.15)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_recycle_in_place() {
        let settings = small_settings();
        let factory = ObstacleFactory::new(&settings).unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut track = Track::new(&settings, &factory, &mut rng);

        // Put slot 1 just at the left edge: trailing edge 0.5 -> -1.5 after advance
        track.slot_mut(1).x = -33.5;
        let untouched = *track.get(2).unwrap();

        let recycled = track.advance(2.0, &factory, &mut rng);
        assert_eq!(recycled, 1);
        assert_eq!(track.get(1).unwrap().x, settings.recycle_x());
        assert_eq!(track.get(2).unwrap().x, untouched.x - 2.0);
        assert_eq!(track.get(2).unwrap().gap_center, untouched.gap_center);
    }

    #[test]
    fn test_trailing_edge_at_zero_is_kept() {
        let settings = small_settings();
        let factory = ObstacleFactory::new(&settings).unwrap();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut track = Track::new(&settings, &factory, &mut rng);

        track.slot_mut(0).x = -32.0;
        assert_eq!(track.advance(2.0, &factory, &mut rng), 0);
        assert_eq!(track.get(0).unwrap().x, -34.0);
    }

    proptest! {
        #[test]
        fn prop_recycling_preserves_slot_order(seed in any::<u64>(), ticks in 1usize..4000) {
            let settings = small_settings();
            let factory = ObstacleFactory::new(&settings).unwrap();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut track = Track::new(&settings, &factory, &mut rng);

            // Shadow model of slot positions: scroll, and jump back to recycle_x on exit
            let mut shadow: Vec<f32> = track.iter().map(|o| o.x).collect();
            let mut expected_recycles = 0u32;
            let mut total = 0u32;
            for _ in 0..ticks {
                for x in shadow.iter_mut() {
                    *x -= settings.obstacle_speed;
                    if *x + settings.obstacle_width < 0.0 {
                        *x = settings.recycle_x();
                        expected_recycles += 1;
                    }
                }
                total += track.advance(settings.obstacle_speed, &factory, &mut rng);
            }

            prop_assert_eq!(total, expected_recycles);
            for (o, x) in track.iter().zip(&shadow) {
                prop_assert_eq!(o.x, *x);
            }
        }
    }
}
