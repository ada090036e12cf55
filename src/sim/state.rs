//! Game state and scoring
//!
//! The authoritative session state: player and ground bodies, the live
//! obstacle/item collection (spawn order preserved - it is part of the
//! observable contract), spawner, scenery, score, and the phase machine.
//! Everything the host needs to hear leaves through the event queue.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyKind, BoxSize, VisualHandle};
use super::scroll::ScrollRecycler;
use super::spawn::{SpawnCategory, Spawner};
use crate::config::{Config, ConfigError};
use crate::consts::TRANSFORM_TICKS;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play
    Running,
    /// Star power-up window: obstacle hits are ignored
    Transformed,
    /// Run ended; terminal until an external reset builds a new session
    GameOver,
}

/// When obstacle points are awarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScorePolicy {
    /// At spawn time, as soon as the obstacle enters the world
    OnSpawn,
    /// When the obstacle scrolls past the player without ending the run
    OnPass,
}

/// Monotonic score counter
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreTracker {
    score: u64,
}

impl ScoreTracker {
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Add points; true when the new total sits on a 100-point boundary,
    /// which is the cue to raise the scroll speed.
    pub fn increment(&mut self, amount: u64) -> bool {
        self.score += amount;
        self.score.is_multiple_of(100)
    }
}

/// Outbound messages for the host collaborators (renderer, audio sink,
/// score display). Drained once per frame; the core never calls out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A body entered the world; the host should load/attach its visual
    Spawned { id: u32, category: SpawnCategory },
    /// A body left the world; the host should detach its visual
    Despawned { id: u32 },
    Jump,
    /// Star collected; transform window opened (or renewed)
    Pickup,
    TransformEnded,
    ScoreChanged(u64),
    /// Scroll speed ramped to the new value
    SpeedRamped(f32),
    GameOver,
}

const PLAYER_SIZE: BoxSize = BoxSize {
    width: 1.0,
    height: 1.0,
    depth: 1.0,
};
const GROUND_SIZE: BoxSize = BoxSize {
    width: 100.0,
    height: 0.0,
    depth: 80.0,
};
const GROUND_POSITION: Vec3 = Vec3::new(0.0, -2.0, -15.0);
/// Initial downward drift so the player settles onto the ground
const PLAYER_INITIAL_FALL: f32 = -0.01;

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: Config,
    pub phase: GamePhase,
    /// Simulation clock, one per rendered frame
    pub time_ticks: u64,
    /// Shared scroll tunable: read by spawner and scenery, written only by
    /// the score ramp
    pub scroll_speed: f32,
    /// Tick at which the transform window closes
    pub transform_expiry: Option<u64>,
    pub score: ScoreTracker,
    pub player: Body,
    pub ground: Body,
    /// Live obstacles/items in spawn order
    pub entities: Vec<Body>,
    pub spawner: Spawner,
    pub scenery: ScrollRecycler,
    /// Pending outbound messages (host-facing, not gameplay state)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Build a session. Fails fast on invalid configuration; nothing else
    /// in the core can fail after this point.
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let spawner = Spawner::new(
            config.spawn.clone(),
            config.physics.lane_min,
            config.physics.lane_max,
            seed,
        );
        // Separate stream so cloud scatter doesn't perturb spawn rolls
        let scenery = ScrollRecycler::new(&config.scenery, seed.wrapping_add(1));

        let mut next_id = 1;
        let mut alloc = || {
            let id = next_id;
            next_id += 1;
            id
        };

        let mut player = Body::new(alloc(), BodyKind::Player, PLAYER_SIZE, Vec3::ZERO);
        player.gravity = config.physics.gravity;
        player.velocity.y = PLAYER_INITIAL_FALL;

        let ground = Body::new(alloc(), BodyKind::Ground, GROUND_SIZE, GROUND_POSITION);

        let scroll_speed = config.scroll.base_speed;
        log::info!("session start: seed {seed}, scroll {scroll_speed}");

        Ok(Self {
            seed,
            config,
            phase: GamePhase::Running,
            time_ticks: 0,
            scroll_speed,
            transform_expiry: None,
            score: ScoreTracker::default(),
            player,
            ground,
            entities: Vec::new(),
            spawner,
            scenery,
            events: Vec::new(),
            next_id,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Hand the pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// ModelLoader completion message: attach a visual to a live body.
    /// Arrives whenever loading finishes; physics state is untouched.
    /// Returns false if the body already despawned.
    pub fn attach_visual(&mut self, id: u32, handle: VisualHandle) -> bool {
        let body = if self.player.id == id {
            Some(&mut self.player)
        } else if self.ground.id == id {
            Some(&mut self.ground)
        } else {
            self.entities.iter_mut().find(|e| e.id == id)
        };

        match body {
            Some(body) => {
                body.attach_visual(handle);
                true
            }
            None => {
                log::debug!("visual {} arrived after body {id} despawned", handle.0);
                false
            }
        }
    }

    /// Award obstacle points. No-op once the run has ended; a boundary
    /// crossing ramps the shared scroll speed.
    pub fn award_obstacle_points(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        let ramped = self.score.increment(self.config.score.increment);
        self.events.push(GameEvent::ScoreChanged(self.score.score()));
        if ramped {
            self.scroll_speed += self.config.scroll.ramp;
            self.events.push(GameEvent::SpeedRamped(self.scroll_speed));
            log::debug!(
                "score {} ramped scroll to {}",
                self.score.score(),
                self.scroll_speed
            );
        }
    }

    /// Open (or renew) the transform window. Re-entry resets the expiry
    /// rather than stacking.
    pub fn begin_transform(&mut self) {
        self.phase = GamePhase::Transformed;
        self.transform_expiry = Some(self.time_ticks + TRANSFORM_TICKS);
        self.events.push(GameEvent::Pickup);
    }

    /// Close the transform window if its expiry has passed
    pub fn expire_transform(&mut self) {
        if let Some(expiry) = self.transform_expiry
            && self.time_ticks >= expiry
        {
            self.transform_expiry = None;
            self.phase = GamePhase::Running;
            self.events.push(GameEvent::TransformEnded);
        }
    }

    pub fn set_game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver);
        log::info!("game over at tick {}, score {}", self.time_ticks, self.score.score());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_layout() {
        let state = GameState::new(Config::default(), 1).unwrap();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.position, Vec3::ZERO);
        assert_eq!(state.ground.position, GROUND_POSITION);
        assert_eq!(state.scroll_speed, 0.05);
        assert!(state.entities.is_empty());
        assert_ne!(state.player.id, state.ground.id);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let mut config = Config::default();
        config.spawn.cadence_floor = 1000.0;
        assert!(GameState::new(config, 1).is_err());
    }

    #[test]
    fn test_score_ramps_speed_on_boundary() {
        let mut state = GameState::new(Config::default(), 1).unwrap();
        let base = state.scroll_speed;

        // 50 -> no ramp; 100 -> ramp
        state.award_obstacle_points();
        assert_eq!(state.scroll_speed, base);
        state.award_obstacle_points();
        assert!(state.scroll_speed > base);
        assert_eq!(state.score.score(), 100);
    }

    #[test]
    fn test_score_frozen_after_game_over() {
        let mut state = GameState::new(Config::default(), 1).unwrap();
        state.award_obstacle_points();
        let before = state.score.score();

        state.set_game_over();
        state.award_obstacle_points();
        assert_eq!(state.score.score(), before);
    }

    #[test]
    fn test_transform_renewal_resets_expiry() {
        let mut state = GameState::new(Config::default(), 1).unwrap();
        state.begin_transform();
        let first = state.transform_expiry.unwrap();

        state.time_ticks += 100;
        state.begin_transform();
        let renewed = state.transform_expiry.unwrap();
        assert_eq!(renewed, first + 100);
        assert_eq!(state.phase, GamePhase::Transformed);
    }

    #[test]
    fn test_transform_expiry_returns_to_running() {
        let mut state = GameState::new(Config::default(), 1).unwrap();
        state.begin_transform();

        state.time_ticks += TRANSFORM_TICKS - 1;
        state.expire_transform();
        assert_eq!(state.phase, GamePhase::Transformed);

        state.time_ticks += 1;
        state.expire_transform();
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.transform_expiry.is_none());
    }

    #[test]
    fn test_attach_visual_preserves_physics() {
        let mut state = GameState::new(Config::default(), 1).unwrap();
        let pos = state.player.position;
        let vel = state.player.velocity;
        let player_id = state.player.id;

        assert!(state.attach_visual(player_id, VisualHandle(7)));
        assert_eq!(state.player.visual, Some(VisualHandle(7)));
        assert_eq!(state.player.position, pos);
        assert_eq!(state.player.velocity, vel);

        // Unknown id: loader finished after despawn
        assert!(!state.attach_visual(9999, VisualHandle(8)));
    }
}
