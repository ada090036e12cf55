//! Star Dash - an endless lane-runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (box physics, collisions, game state)
//! - `config`: Data-driven game balance with fail-fast validation
//! - `audio`: Sound cue routing to an externally owned sink
//!
//! Rendering, asset loading, input polling, and audio playback live in the
//! host. The core exchanges data with them through `TickInput`, `GameEvent`,
//! and opaque `VisualHandle`s only.

pub mod audio;
pub mod config;
pub mod sim;

pub use config::{Config, ConfigError};
pub use sim::{Body, BodyKind, GameEvent, GamePhase, GameState, TickInput, tick};

/// Game tuning constants
pub mod consts {
    /// Simulated frames per second (one discrete step per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Per-frame z-velocity gain for bodies that ramp speed
    pub const Z_ACCELERATION: f32 = 0.0003;

    /// Transform power-up duration (5 simulated seconds)
    pub const TRANSFORM_TICKS: u64 = 5 * TICKS_PER_SECOND as u64;

    /// Cloud scatter bands, either side of the corridor
    pub const CLOUD_X_LEFT: (f32, f32) = (-20.0, -10.0);
    pub const CLOUD_X_RIGHT: (f32, f32) = (4.0, 14.0);

    /// Altitude at which flying obstacles hold position
    pub const FLYING_ALTITUDE: f32 = 2.0;

    /// Width of the wide ground obstacle (spans the whole corridor)
    pub const WIDE_OBSTACLE_WIDTH: f32 = 20.0;
}
