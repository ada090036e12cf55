//! Per-frame simulation step
//!
//! One call advances the whole world by one rendered frame, in a fixed
//! order that is itself part of the contract: transform expiry, player
//! intent, player physics, entity physics + collisions in spawn order,
//! despawn, spawner, scenery. Ties (two obstacles overlapping the player
//! in the same frame) resolve to the earliest-spawned entity.

use super::body::{Body, BodyKind};
use super::collision;
use super::state::{GameEvent, GamePhase, GameState, ScorePolicy};

/// Input commands for a single frame (polled booleans)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steer left
    pub left: bool,
    /// Steer right (left wins if both are held)
    pub right: bool,
    /// Jump, edge-triggered by the host
    pub jump: bool,
    /// Demo mode: the autopilot plays
    pub idle: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Terminal phase: only an external reset builds a new session
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;
    state.expire_transform();

    let mut input = input.clone();
    if input.idle {
        autopilot(state, &mut input);
    }
    let input = &input;

    // Player intent: exclusive left/right, clamped to the lane corridor
    let physics = state.config.physics.clone();
    let mut side_speed = 0.0;
    if input.left {
        if state.player.position.x - physics.move_speed > physics.lane_min {
            side_speed = -physics.move_speed;
        }
    } else if input.right && state.player.position.x + physics.move_speed < physics.lane_max {
        side_speed = physics.move_speed;
    }
    state.player.velocity.x = side_speed;
    // The player stays anchored in z; the world scrolls toward it
    state.player.velocity.z = 0.0;

    // Jump only from the ground, and not mid-transform. Grounded clears
    // immediately so a second jump cannot queue before landing.
    if input.jump && state.player.grounded && state.phase != GamePhase::Transformed {
        state.player.velocity.y = physics.jump_impulse;
        state.player.grounded = false;
        state.events.push(GameEvent::Jump);
    }

    // The ground never moves; a copy keeps the borrows simple
    let ground = state.ground.clone();
    state.player.update(&ground);

    // Entities advance and test against the player in spawn order. The
    // first fatal overlap ends evaluation for the frame; remaining bodies
    // still integrate so the world stays consistent.
    let mut i = 0;
    while i < state.entities.len() {
        state.entities[i].update(&ground);

        if state.phase != GamePhase::GameOver
            && collision::overlaps(&state.player, &state.entities[i])
        {
            match state.entities[i].kind {
                BodyKind::Item => {
                    // Picking up a star during a transform renews the window
                    state.begin_transform();
                    let item = state.entities.remove(i);
                    state.events.push(GameEvent::Despawned { id: item.id });
                    continue;
                }
                BodyKind::Obstacle if state.phase == GamePhase::Running => {
                    state.set_game_over();
                }
                _ => {}
            }
        }
        i += 1;
    }

    if state.phase == GamePhase::GameOver {
        return;
    }

    // Despawn everything that scrolled behind the camera
    let despawn_z = state.config.spawn.despawn_z;
    let policy = state.config.score.policy;
    let mut i = 0;
    while i < state.entities.len() {
        if state.entities[i].position.z > despawn_z {
            let entity = state.entities.remove(i);
            state.events.push(GameEvent::Despawned { id: entity.id });
            if policy == ScorePolicy::OnPass && entity.kind == BodyKind::Obstacle {
                state.award_obstacle_points();
            }
        } else {
            i += 1;
        }
    }

    // Maybe emit a new body ahead of the camera
    let scroll_speed = state.scroll_speed;
    if let Some(request) = state
        .spawner
        .maybe_spawn(scroll_speed, state.config.physics.gravity)
    {
        let id = state.next_entity_id();
        let mut body = Body::new(id, request.category.body_kind(), request.size, request.position);
        body.velocity = request.velocity;
        body.gravity = request.gravity;
        body.accelerates = request.accelerates;
        state.entities.push(body);
        state.events.push(GameEvent::Spawned {
            id,
            category: request.category,
        });

        if policy == ScorePolicy::OnSpawn && request.category.scores() {
            state.award_obstacle_points();
        }
    }

    state.scenery.advance(state.scroll_speed);
}

/// Demo-mode player: hold the corridor center and hop over ground
/// obstacles as they close in.
fn autopilot(state: &GameState, input: &mut TickInput) {
    let physics = &state.config.physics;
    let center = (physics.lane_min + physics.lane_max) / 2.0;
    let x = state.player.position.x;
    input.left = x > center + 0.5;
    input.right = x < center - 0.5;

    input.jump = state.entities.iter().any(|e| {
        e.kind == BodyKind::Obstacle
            && e.position.y < 1.0
            && (e.position.x - x).abs() < e.size.width / 2.0 + 1.5
            && e.position.z > -6.0
            && e.position.z < 0.0
    });
}
