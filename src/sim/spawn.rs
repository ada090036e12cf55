//! Timed obstacle/item factory
//!
//! Spawns fire on a frame cadence that shortens after every spawn, down to a
//! floor. Each spawn draws one uniform roll and maps it through a fixed
//! partition of [0,1) to pick a category. Categories are a closed enum
//! chosen once here; nothing downstream probes model names or string tags.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{BodyKind, BoxSize};
use crate::config::SpawnConfig;
use crate::consts::{FLYING_ALTITUDE, WIDE_OBSTACLE_WIDTH};

/// What a spawn roll produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnCategory {
    /// Star pickup - transforms the player instead of ending the run
    Item,
    /// Obstacle holding altitude above jump height
    Flying,
    /// Ground obstacle spanning the whole corridor
    Wide,
    /// Standard ground obstacle
    Block,
}

impl SpawnCategory {
    pub fn body_kind(self) -> BodyKind {
        match self {
            SpawnCategory::Item => BodyKind::Item,
            _ => BodyKind::Obstacle,
        }
    }

    /// Items never score; every obstacle category does
    pub fn scores(self) -> bool {
        self != SpawnCategory::Item
    }
}

/// Everything needed to build the new body, minus the entity id (the
/// session allocates ids)
#[derive(Debug, Clone)]
pub struct SpawnRequest {
    pub category: SpawnCategory,
    pub size: BoxSize,
    pub position: Vec3,
    pub velocity: Vec3,
    pub gravity: f32,
    pub accelerates: bool,
}

/// Ramping-cadence spawner with its own RNG stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    frames: u64,
    cadence: f32,
    config: SpawnConfig,
    lane_min: f32,
    lane_max: f32,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(config: SpawnConfig, lane_min: f32, lane_max: f32, seed: u64) -> Self {
        Self {
            frames: 0,
            cadence: config.initial_cadence,
            config,
            lane_min,
            lane_max,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Frames between spawns right now
    pub fn cadence(&self) -> f32 {
        self.cadence
    }

    /// Advance one frame; returns a request on cadence boundaries
    pub fn maybe_spawn(&mut self, scroll_speed: f32, player_gravity: f32) -> Option<SpawnRequest> {
        let interval = (self.cadence.round() as u64).max(1);
        let due = self.frames % interval == 0;
        self.frames += 1;

        if !due {
            return None;
        }

        // Difficulty ramp: shorten the cadence after each spawn, never
        // below the floor
        if self.cadence > self.config.cadence_floor {
            self.cadence = (self.cadence - self.config.cadence_step).max(self.config.cadence_floor);
        }

        let roll: f32 = self.rng.random();
        let category = categorize(roll, self.config.category_cuts);

        let x = match category {
            SpawnCategory::Wide => 0.0,
            _ => self.rng.random_range(self.lane_min..self.lane_max),
        };
        let (y, gravity) = match category {
            SpawnCategory::Flying => (FLYING_ALTITUDE, 0.0),
            _ => (0.0, player_gravity),
        };
        let width = match category {
            SpawnCategory::Wide => WIDE_OBSTACLE_WIDTH,
            _ => 1.0,
        };

        Some(SpawnRequest {
            category,
            size: BoxSize::new(width, 1.0, 1.0),
            position: Vec3::new(x, y, self.config.spawn_z),
            velocity: Vec3::new(0.0, 0.0, scroll_speed),
            gravity,
            accelerates: true,
        })
    }
}

/// Map a uniform roll through the ascending cut points
fn categorize(roll: f32, cuts: [f32; 3]) -> SpawnCategory {
    if roll < cuts[0] {
        SpawnCategory::Item
    } else if roll < cuts[1] {
        SpawnCategory::Flying
    } else if roll < cuts[2] {
        SpawnCategory::Wide
    } else {
        SpawnCategory::Block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn spawner(seed: u64) -> Spawner {
        let cfg = Config::default();
        Spawner::new(cfg.spawn, cfg.physics.lane_min, cfg.physics.lane_max, seed)
    }

    fn run_until_spawn(s: &mut Spawner) -> SpawnRequest {
        for _ in 0..100_000 {
            if let Some(req) = s.maybe_spawn(0.05, -0.0019) {
                return req;
            }
        }
        panic!("spawner never fired");
    }

    #[test]
    fn test_categorize_partition_is_exhaustive() {
        let cuts = [0.05, 0.2, 0.4];
        assert_eq!(categorize(0.0, cuts), SpawnCategory::Item);
        assert_eq!(categorize(0.049, cuts), SpawnCategory::Item);
        assert_eq!(categorize(0.05, cuts), SpawnCategory::Flying);
        assert_eq!(categorize(0.2, cuts), SpawnCategory::Wide);
        assert_eq!(categorize(0.4, cuts), SpawnCategory::Block);
        assert_eq!(categorize(0.999, cuts), SpawnCategory::Block);
    }

    #[test]
    fn test_cadence_ramps_to_floor() {
        let mut s = spawner(7);
        let floor = s.config.cadence_floor;
        let mut last = s.cadence();

        for _ in 0..400 {
            run_until_spawn(&mut s);
            let now = s.cadence();
            assert!(now <= last, "cadence must never increase");
            assert!(now >= floor, "cadence must never pass the floor");
            if last > floor {
                assert!(now < last, "cadence must strictly decrease above the floor");
            }
            last = now;
        }
        assert_eq!(last, floor);
    }

    #[test]
    fn test_first_frame_spawns() {
        let mut s = spawner(3);
        assert!(s.maybe_spawn(0.05, -0.0019).is_some());
        assert!(s.maybe_spawn(0.05, -0.0019).is_none());
    }

    #[test]
    fn test_spawn_geometry() {
        let mut s = spawner(11);
        for _ in 0..50 {
            let req = run_until_spawn(&mut s);
            assert_eq!(req.position.z, -40.0);
            assert!(req.accelerates);
            match req.category {
                SpawnCategory::Wide => {
                    assert_eq!(req.position.x, 0.0);
                    assert_eq!(req.size.width, WIDE_OBSTACLE_WIDTH);
                }
                SpawnCategory::Flying => {
                    assert_eq!(req.position.y, FLYING_ALTITUDE);
                    assert_eq!(req.gravity, 0.0);
                }
                _ => {
                    assert!(req.position.x >= -3.0 && req.position.x < 5.0);
                    assert!(req.gravity < 0.0);
                }
            }
        }
    }

    #[test]
    fn test_item_does_not_score() {
        assert!(!SpawnCategory::Item.scores());
        assert!(SpawnCategory::Flying.scores());
        assert!(SpawnCategory::Wide.scores());
        assert!(SpawnCategory::Block.scores());
    }

    #[test]
    fn test_determinism_same_seed() {
        let mut a = spawner(42);
        let mut b = spawner(42);
        for _ in 0..1000 {
            let ra = a.maybe_spawn(0.05, -0.0019);
            let rb = b.maybe_spawn(0.05, -0.0019);
            match (ra, rb) {
                (None, None) => {}
                (Some(x), Some(y)) => {
                    assert_eq!(x.category, y.category);
                    assert_eq!(x.position, y.position);
                }
                _ => panic!("spawners diverged"),
            }
        }
    }
}
