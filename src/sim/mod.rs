//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per rendered frame
//! - Seeded RNG only
//! - Stable iteration order (entities in spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod scroll;
pub mod spawn;
pub mod state;
pub mod tick;

pub use body::{Body, BodyKind, BoxSize, Faces, VisualHandle};
pub use collision::overlaps;
pub use scroll::{Decor, ScrollPool, ScrollRecycler};
pub use spawn::{SpawnCategory, SpawnRequest, Spawner};
pub use state::{GameEvent, GamePhase, GameState, ScorePolicy, ScoreTracker};
pub use tick::{TickInput, tick};
