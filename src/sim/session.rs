//! Session state machine
//!
//! `Idle -> Counting -> Running -> Ended -> Counting -> ...`
//!
//! The host drives two independent clocks into this type: a countdown timer
//! (via [`GameSession::countdown_tick`]) and the display frame loop (via
//! [`GameSession::frame_tick`]). Neither ever blocks, and both are no-ops
//! outside the phase they belong to.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{self, Collision};
use super::obstacle::ObstacleFactory;
use super::physics;
use super::state::{
    CountdownStep, CountdownTicket, FrameStep, GameEvent, GamePhase, Snapshot, Sprite,
};
use super::track::Track;
use crate::error::GameError;
use crate::settings::Settings;

/// One game: sprite, track, score and phase
#[derive(Debug, Clone)]
pub struct GameSession {
    settings: Settings,
    factory: ObstacleFactory,
    /// Run seed for reproducibility
    seed: u64,
    rng: Pcg32,
    phase: GamePhase,
    sprite: Sprite,
    track: Track,
    score: u32,
    countdown_remaining: u32,
    /// Bumped on every start; stamps countdown tickets
    epoch: u64,
    /// Running frames simulated this session
    frame: u64,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Validate settings and lay out an idle preview
    pub fn new(settings: Settings, seed: u64) -> Result<Self, GameError> {
        settings.validate()?;
        let factory = ObstacleFactory::new(&settings)?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let track = Track::new(&settings, &factory, &mut rng);

        Ok(Self {
            sprite: Sprite::new(settings.start_y()),
            settings,
            factory,
            seed,
            rng,
            phase: GamePhase::Idle,
            track,
            score: 0,
            countdown_remaining: 0,
            epoch: 0,
            frame: 0,
            events: Vec::new(),
        })
    }

    /// Reset everything and begin the countdown
    ///
    /// Only valid from `Idle` or `Ended`; a session that is counting or
    /// running is left untouched and `SessionActive` is returned. The
    /// returned ticket must accompany every countdown tick for this run.
    pub fn start(&mut self) -> Result<CountdownTicket, GameError> {
        if !self.phase.can_start() {
            log::warn!("Start rejected while {}", self.phase.as_str());
            return Err(GameError::SessionActive(self.phase));
        }

        self.sprite = Sprite::new(self.settings.start_y());
        self.track = Track::new(&self.settings, &self.factory, &mut self.rng);
        self.score = 0;
        self.frame = 0;
        self.epoch += 1;
        self.countdown_remaining = self.settings.countdown_seconds;
        self.phase = GamePhase::Counting;
        self.events.push(GameEvent::CountdownStarted {
            remaining: self.countdown_remaining,
        });
        log::info!(
            "Session {} started (seed {}, countdown {})",
            self.epoch,
            self.seed,
            self.countdown_remaining
        );

        if self.countdown_remaining == 0 {
            self.launch();
        }

        Ok(CountdownTicket(self.epoch))
    }

    /// Advance the countdown by one timer tick
    pub fn countdown_tick(&mut self, ticket: CountdownTicket) -> CountdownStep {
        if ticket.0 != self.epoch {
            log::warn!("Ignoring countdown tick from stale session {}", ticket.0);
            return CountdownStep::Stale;
        }
        if self.phase != GamePhase::Counting {
            return CountdownStep::Stale;
        }

        self.countdown_remaining = self.countdown_remaining.saturating_sub(1);
        log::debug!("Countdown: {}", self.countdown_remaining);

        if self.countdown_remaining == 0 {
            self.launch();
            CountdownStep::Launched
        } else {
            self.events.push(GameEvent::CountdownTick {
                remaining: self.countdown_remaining,
            });
            CountdownStep::Remaining(self.countdown_remaining)
        }
    }

    /// Simulate one frame: physics, scroll and recycle, then collisions
    pub fn frame_tick(&mut self) -> FrameStep {
        if self.phase != GamePhase::Running {
            return FrameStep::Idle;
        }

        self.frame += 1;
        physics::integrate(&mut self.sprite, self.settings.gravity);

        let recycled = self
            .track
            .advance(self.settings.obstacle_speed, &self.factory, &mut self.rng);
        for _ in 0..recycled {
            self.score += 1;
            self.events.push(GameEvent::ScoreChanged { score: self.score });
        }

        log::trace!(
            "Frame {}: y={:.2} vel={:.2} score={}",
            self.frame,
            self.sprite.y,
            self.sprite.vel,
            self.score
        );

        match collision::check(&self.sprite, self.track.iter(), &self.settings) {
            Some(hit) => {
                self.end(hit);
                FrameStep::Ended
            }
            None => FrameStep::Continue,
        }
    }

    /// Upward impulse; ignored unless running
    ///
    /// Returns whether the flap was applied.
    pub fn flap(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        physics::flap(&mut self.sprite, self.settings.jump_unit);
        true
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            countdown_remaining: self.countdown_remaining,
            frame: self.frame,
            sprite: self.sprite,
            obstacles: self.track.as_slice().to_vec(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn countdown_remaining(&self) -> u32 {
        self.countdown_remaining
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn launch(&mut self) {
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Launched);
        log::info!("Session {} running", self.epoch);
    }

    fn end(&mut self, hit: Collision) {
        self.phase = GamePhase::Ended;
        self.events.push(GameEvent::Ended {
            final_score: self.score,
        });
        log::info!(
            "Session {} ended after {} frames ({:?}), final score {}",
            self.epoch,
            self.frame,
            hit,
            self.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_session(settings: Settings) -> GameSession {
        let mut session = GameSession::new(settings, 42).unwrap();
        let ticket = session.start().unwrap();
        while session.countdown_tick(ticket) != CountdownStep::Launched {}
        session.drain_events();
        session
    }

    #[test]
    fn test_new_is_idle() {
        let session = GameSession::new(Settings::default(), 1).unwrap();
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.sprite().y, 240.0);
        assert_eq!(session.track().len(), 50);
    }

    #[test]
    fn test_new_rejects_infeasible_field() {
        let settings = Settings::default().with_field(800.0, 100.0);
        assert!(matches!(
            GameSession::new(settings, 1),
            Err(GameError::InfeasibleGeometry { .. })
        ));
    }

    #[test]
    fn test_countdown_takes_three_ticks() {
        let mut session = GameSession::new(Settings::default(), 1).unwrap();
        let ticket = session.start().unwrap();
        assert_eq!(session.phase(), GamePhase::Counting);

        assert_eq!(session.countdown_tick(ticket), CountdownStep::Remaining(2));
        assert_eq!(session.countdown_tick(ticket), CountdownStep::Remaining(1));
        assert_eq!(session.countdown_tick(ticket), CountdownStep::Launched);
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.score(), 0);

        // Timer that was not cancelled in time does nothing
        assert_eq!(session.countdown_tick(ticket), CountdownStep::Stale);

        assert_eq!(
            session.drain_events(),
            vec![
                GameEvent::CountdownStarted { remaining: 3 },
                GameEvent::CountdownTick { remaining: 2 },
                GameEvent::CountdownTick { remaining: 1 },
                GameEvent::Launched,
            ]
        );
    }

    #[test]
    fn test_counting_freezes_world() {
        let mut session = GameSession::new(Settings::default(), 1).unwrap();
        session.start().unwrap();
        let before = session.snapshot();

        assert_eq!(session.frame_tick(), FrameStep::Idle);
        assert!(!session.flap());

        let after = session.snapshot();
        assert_eq!(before.sprite, after.sprite);
        assert_eq!(before.obstacles, after.obstacles);
    }

    #[test]
    fn test_start_rejected_while_active() {
        let mut session = GameSession::new(Settings::default(), 1).unwrap();
        let ticket = session.start().unwrap();
        assert!(matches!(
            session.start(),
            Err(GameError::SessionActive(GamePhase::Counting))
        ));

        while session.countdown_tick(ticket) != CountdownStep::Launched {}
        assert!(matches!(
            session.start(),
            Err(GameError::SessionActive(GamePhase::Running))
        ));
    }

    #[test]
    fn test_restart_invalidates_old_ticket() {
        let settings = Settings {
            gravity: 1.0,
            ..Settings::default()
        };
        let mut session = running_session(settings);
        let old = CountdownTicket(session.epoch);
        while session.frame_tick() == FrameStep::Continue {}
        assert_eq!(session.phase(), GamePhase::Ended);

        let fresh = session.start().unwrap();
        assert_ne!(old, fresh);
        assert_eq!(session.countdown_tick(old), CountdownStep::Stale);
        assert_eq!(session.countdown_remaining(), 3);
        assert_eq!(session.countdown_tick(fresh), CountdownStep::Remaining(2));
    }

    #[test]
    fn test_zero_countdown_launches_immediately() {
        let settings = Settings {
            countdown_seconds: 0,
            ..Settings::default()
        };
        let mut session = GameSession::new(settings, 1).unwrap();
        session.start().unwrap();
        assert_eq!(session.phase(), GamePhase::Running);
    }

    #[test]
    fn test_boundary_ends_session() {
        let settings = Settings {
            gravity: 0.0,
            ..Settings::default()
        };
        let mut session = running_session(settings.clone());
        session.sprite.y = settings.field_height + 1.0;
        assert_eq!(session.frame_tick(), FrameStep::Ended);
        assert_eq!(session.phase(), GamePhase::Ended);

        let mut session = running_session(settings);
        session.sprite.y = -1.0;
        assert_eq!(session.frame_tick(), FrameStep::Ended);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::Ended { final_score: 0 }]
        );
    }

    #[test]
    fn test_obstacle_hit_ends_session() {
        let settings = Settings {
            gravity: 0.0,
            obstacle_speed: 0.0,
            ..Settings::default()
        };
        let mut session = running_session(settings);
        let gap_top = {
            let slot = session.track.slot_mut(0);
            slot.x = 40.0;
            slot.gap_top()
        };

        // Fully inside the band: survives
        session.sprite.y = gap_top + 1.0;
        assert_eq!(session.frame_tick(), FrameStep::Continue);

        // Poking above the band: dies
        session.sprite.y = gap_top - 1.0;
        assert_eq!(session.frame_tick(), FrameStep::Ended);
    }

    #[test]
    fn test_recycle_scores() {
        let settings = Settings {
            gravity: 0.0,
            track_len: 3,
            ..Settings::default()
        };
        let mut session = running_session(settings);
        // Slot 0 at the left edge: the next scroll recycles it
        session.track.slot_mut(0).x = -33.0;

        assert_eq!(session.frame_tick(), FrameStep::Continue);
        assert_eq!(session.score(), 1);
        assert_eq!(session.drain_events(), vec![GameEvent::ScoreChanged { score: 1 }]);
        assert_eq!(session.track().get(0).unwrap().x, session.settings().recycle_x());
    }

    #[test]
    fn test_flap_only_while_running() {
        let mut session = GameSession::new(Settings::default(), 5).unwrap();
        assert!(!session.flap());
        assert_eq!(session.sprite().vel, 0.0);

        let mut session = running_session(Settings::default());
        assert!(session.flap());
        assert_eq!(session.sprite().vel, -6.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = running_session(Settings::default());
        let mut b = running_session(Settings::default());
        for i in 0..400 {
            if i % 37 == 0 {
                a.flap();
                b.flap();
            }
            a.frame_tick();
            b.frame_tick();
        }
        let (a, b) = (a.snapshot(), b.snapshot());
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.sprite, b.sprite);
        assert_eq!(a.obstacles, b.obstacles);
    }
}
