//! Data-driven game balance
//!
//! Every tunable lives in one `Config` owned by the session and validated
//! before the first frame. Invalid configuration is not recoverable at
//! runtime; nothing after setup can fail.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::state::ScorePolicy;

/// Fail-fast configuration errors raised at session setup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("spawn cadence floor {floor} exceeds initial cadence {initial}")]
    CadenceFloorAboveInitial { floor: f32, initial: f32 },

    #[error("spawn partition cuts must ascend within (0, 1): {0:?}")]
    BadPartition([f32; 3]),

    #[error("scenery pool {index} is empty")]
    EmptyPool { index: usize },

    #[error("scenery pool {index} has non-positive spacing {spacing}")]
    BadSpacing { index: usize, spacing: f32 },

    #[error("lane corridor is inverted: [{min}, {max}]")]
    InvertedLane { min: f32, max: f32 },
}

/// Player body tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Per-frame downward velocity gain (negative)
    pub gravity: f32,
    /// Upward velocity applied on jump
    pub jump_impulse: f32,
    /// Sideways speed while a direction is held
    pub move_speed: f32,
    /// Lane corridor the player may not leave
    pub lane_min: f32,
    pub lane_max: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -0.0019,
            jump_impulse: 0.12,
            move_speed: 0.05,
            lane_min: -3.0,
            lane_max: 5.0,
        }
    }
}

/// World scroll tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Scroll speed at session start
    pub base_speed: f32,
    /// Speed gain every time the score crosses a 100-point boundary
    pub ramp: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.05,
            ramp: 0.001,
        }
    }
}

/// Spawner cadence and category weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Frames between spawns at session start
    pub initial_cadence: f32,
    /// Cadence decrease after each spawn
    pub cadence_step: f32,
    /// Cadence never drops below this
    pub cadence_floor: f32,
    /// Ascending cut points partitioning [0,1) into
    /// Item / Flying / Wide / Block draws
    pub category_cuts: [f32; 3],
    /// Bodies enter the world this far ahead of the camera
    pub spawn_z: f32,
    /// Bodies past this are behind the camera and despawn
    pub despawn_z: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_cadence: 150.0,
            cadence_step: 0.5,
            cadence_floor: 40.0,
            category_cuts: [0.05, 0.2, 0.4],
            spawn_z: -40.0,
            despawn_z: 20.0,
        }
    }
}

/// Scoring tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Points per qualifying obstacle
    pub increment: u64,
    /// When obstacle points are awarded
    pub policy: ScorePolicy,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            increment: 50,
            policy: ScorePolicy::OnSpawn,
        }
    }
}

/// One decorative scroll pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    pub count: usize,
    pub spacing: f32,
    pub x: f32,
    pub y: f32,
    /// Re-randomize x on wrap (clouds)
    #[serde(default)]
    pub scatter_x: bool,
}

/// Decorative scenery inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneryConfig {
    pub pools: Vec<PoolConfig>,
}

impl Default for SceneryConfig {
    fn default() -> Self {
        // Two grass rows, two tree rows, two flower rows, one cloud layer
        let fixed = |count, spacing, x, y| PoolConfig {
            count,
            spacing,
            x,
            y,
            scatter_x: false,
        };
        Self {
            pools: vec![
                fixed(11, 5.0, -10.0, -1.95),
                fixed(11, 5.0, 10.0, -1.95),
                fixed(3, 20.0, -10.0, -1.95),
                fixed(3, 20.0, 12.0, -1.95),
                fixed(11, 5.0, -5.0, -1.95),
                fixed(11, 5.0, 7.0, -1.95),
                PoolConfig {
                    count: 5,
                    spacing: 10.0,
                    x: 0.0,
                    y: 4.0,
                    scatter_x: true,
                },
            ],
        }
    }
}

/// Complete session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub spawn: SpawnConfig,
    #[serde(default)]
    pub score: ScoreConfig,
    #[serde(default)]
    pub scenery: SceneryConfig,
}

impl Config {
    /// Check every invariant the simulation relies on. Called once at
    /// session construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn.cadence_floor > self.spawn.initial_cadence {
            return Err(ConfigError::CadenceFloorAboveInitial {
                floor: self.spawn.cadence_floor,
                initial: self.spawn.initial_cadence,
            });
        }

        let cuts = self.spawn.category_cuts;
        let ascending = cuts[0] < cuts[1] && cuts[1] < cuts[2];
        let in_range = cuts[0] > 0.0 && cuts[2] < 1.0;
        if !ascending || !in_range {
            return Err(ConfigError::BadPartition(cuts));
        }

        for (index, pool) in self.scenery.pools.iter().enumerate() {
            if pool.count == 0 {
                return Err(ConfigError::EmptyPool { index });
            }
            if pool.spacing <= 0.0 {
                return Err(ConfigError::BadSpacing {
                    index,
                    spacing: pool.spacing,
                });
            }
        }

        if self.physics.lane_min >= self.physics.lane_max {
            return Err(ConfigError::InvertedLane {
                min: self.physics.lane_min,
                max: self.physics.lane_max,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_cadence_floor_above_initial_rejected() {
        let mut cfg = Config::default();
        cfg.spawn.cadence_floor = 200.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::CadenceFloorAboveInitial { .. })
        ));
    }

    #[test]
    fn test_bad_partition_rejected() {
        let mut cfg = Config::default();
        cfg.spawn.category_cuts = [0.4, 0.2, 0.05];
        assert!(matches!(cfg.validate(), Err(ConfigError::BadPartition(_))));

        cfg.spawn.category_cuts = [0.0, 0.2, 0.4];
        assert!(matches!(cfg.validate(), Err(ConfigError::BadPartition(_))));
    }

    #[test]
    fn test_empty_pool_rejected() {
        let mut cfg = Config::default();
        cfg.scenery.pools[2].count = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::EmptyPool { index: 2 })
        ));
    }

    #[test]
    fn test_inverted_lane_rejected() {
        let mut cfg = Config::default();
        cfg.physics.lane_min = 5.0;
        cfg.physics.lane_max = -3.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvertedLane { .. })
        ));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let cfg = Config::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.spawn.initial_cadence, cfg.spawn.initial_cadence);
        assert_eq!(back.scenery.pools.len(), cfg.scenery.pools.len());
    }
}
