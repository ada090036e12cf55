//! Scrolling-world recycler
//!
//! Decorative scenery never despawns: each pool is a fixed ring of
//! instances sliding toward the camera, and an instance that passes the
//! wrap threshold is relocated to the back of its pool. Pools wrap
//! independently of each other. Cloud pools re-scatter x on wrap so the
//! sky doesn't visibly repeat.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::VisualHandle;
use crate::config::{PoolConfig, SceneryConfig};
use crate::consts::{CLOUD_X_LEFT, CLOUD_X_RIGHT};

/// One decorative instance: a position and an attachable visual, no physics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decor {
    pub position: Vec3,
    #[serde(default)]
    pub visual: Option<VisualHandle>,
}

/// A fixed-size ring of decorative instances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollPool {
    spacing: f32,
    scatter_x: bool,
    pub instances: Vec<Decor>,
}

impl ScrollPool {
    pub fn from_config(config: &PoolConfig, rng: &mut Pcg32) -> Self {
        let instances = (0..config.count)
            .map(|i| {
                let x = if config.scatter_x {
                    scatter_x(rng)
                } else {
                    config.x
                };
                Decor {
                    position: Vec3::new(x, config.y, -config.spacing * i as f32),
                    visual: None,
                }
            })
            .collect();
        Self {
            spacing: config.spacing,
            scatter_x: config.scatter_x,
            instances,
        }
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Slide every instance forward; wrap those past `+spacing` to the back
    pub fn advance(&mut self, speed: f32, rng: &mut Pcg32) {
        let back_z = -self.spacing * (self.instances.len() - 1) as f32;
        for decor in &mut self.instances {
            decor.position.z += speed;
            if decor.position.z > self.spacing {
                decor.position.z = back_z;
                if self.scatter_x {
                    decor.position.x = scatter_x(rng);
                }
            }
        }
    }
}

/// All decorative pools plus the RNG stream feeding cloud scatter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollRecycler {
    pub pools: Vec<ScrollPool>,
    rng: Pcg32,
}

impl ScrollRecycler {
    pub fn new(config: &SceneryConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let pools = config
            .pools
            .iter()
            .map(|pool| ScrollPool::from_config(pool, &mut rng))
            .collect();
        Self { pools, rng }
    }

    pub fn advance(&mut self, speed: f32) {
        for pool in &mut self.pools {
            pool.advance(speed, &mut self.rng);
        }
    }
}

/// Cloud x placement: one band left of the corridor, one band right of it
fn scatter_x(rng: &mut Pcg32) -> f32 {
    if rng.random::<f32>() < 0.5 {
        rng.random_range(CLOUD_X_LEFT.0..CLOUD_X_LEFT.1)
    } else {
        rng.random_range(CLOUD_X_RIGHT.0..CLOUD_X_RIGHT.1)
    }
}
