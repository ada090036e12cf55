//! Box bodies and gravity integration
//!
//! Every simulated entity is an axis-aligned box: the player, the ground
//! plane, and everything the spawner emits. Face extents are derived from
//! position and size, and are resynced after every position change so a
//! read never sees a stale face.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision;
use crate::consts::Z_ACCELERATION;

/// What role a body plays in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Player,
    Ground,
    Obstacle,
    Item,
}

/// Box dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSize {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BoxSize {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}

/// Opaque reference to a renderable owned by the host's scene graph.
///
/// The core never dereferences this; it only carries it so the host can
/// match bodies to visuals. A body without one is still fully simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualHandle(pub u32);

/// Derived face coordinates, always `position ± size/2`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Faces {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub back: f32,
    pub front: f32,
}

/// An axis-aligned box body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: u32,
    pub kind: BodyKind,
    pub size: BoxSize,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Per-frame downward velocity gain (negative, zero to disable)
    pub gravity: f32,
    /// Whether z-velocity ramps each frame
    pub accelerates: bool,
    /// True iff the vertical test against the ground hit this frame
    pub grounded: bool,
    /// Attached by the host once its model finishes loading
    #[serde(default)]
    pub visual: Option<VisualHandle>,
    pub faces: Faces,
}

impl Body {
    pub fn new(id: u32, kind: BodyKind, size: BoxSize, position: Vec3) -> Self {
        let mut body = Self {
            id,
            kind,
            size,
            position,
            velocity: Vec3::ZERO,
            gravity: 0.0,
            accelerates: false,
            grounded: false,
            visual: None,
            faces: Faces::default(),
        };
        body.sync_faces();
        body
    }

    /// Recompute face extents from the current position and size
    pub fn sync_faces(&mut self) {
        self.faces.left = self.position.x - self.size.width / 2.0;
        self.faces.right = self.position.x + self.size.width / 2.0;
        self.faces.bottom = self.position.y - self.size.height / 2.0;
        self.faces.top = self.position.y + self.size.height / 2.0;
        self.faces.back = self.position.z - self.size.depth / 2.0;
        self.faces.front = self.position.z + self.size.depth / 2.0;
    }

    /// Attach the host-owned visual. Physics state is untouched, so this is
    /// safe at any point in the body's life.
    pub fn attach_visual(&mut self, handle: VisualHandle) {
        self.visual = Some(handle);
    }

    pub fn detach_visual(&mut self) -> Option<VisualHandle> {
        self.visual.take()
    }

    /// Advance one frame: ramp z if accelerating, integrate x/z, then apply
    /// gravity against the ground body.
    pub fn update(&mut self, ground: &Body) {
        if self.accelerates {
            self.velocity.z += Z_ACCELERATION;
        }
        self.position.x += self.velocity.x;
        self.position.z += self.velocity.z;
        self.sync_faces();
        self.apply_gravity(ground);
    }

    /// Discrete Euler gravity fused with the ground test. Landing zeroes
    /// y-velocity at the first overlapping frame, so bodies stick instead of
    /// sinking or bouncing.
    fn apply_gravity(&mut self, ground: &Body) {
        self.velocity.y += self.gravity;

        if collision::overlaps(self, ground) {
            self.velocity.y = 0.0;
            self.grounded = true;
        } else {
            self.position.y += self.velocity.y;
            self.grounded = false;
        }
        self.sync_faces();
    }
}
