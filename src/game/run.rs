//! Run Motion Solver
//!
//! Horizontal physics and ground-pose selection for one tick: base speed
//! from the resolved intent, the bounded momentum term, braking, the wall
//! clamp, and the leg-animation toggle.

use crate::core::vec2::PixelVec2;

use super::input::MovementIntent;
use super::player::Player;
use super::pose::{
    self, Direction, Pose, BRAKE, HOLD_FRONT, HOLD_IDLE, HOLD_WALK_A, HOLD_WALK_B, LOOKUP, SPRINT_A,
    SPRINT_B, SQUAT,
};
use super::world::World;

/// Advance horizontal motion and pick the ground pose.
///
/// The returned pose carries the *displayed* facing, which is the facing
/// from the start of the tick and flips while braking; the physics facing
/// on the player is updated to track the active intent.
pub fn run_motion(player: &mut Player, world: &mut World) -> Pose {
    player.is_braking = false;
    let mut direction = player.direction;

    let intent = player.input.intent;
    let squatting = player.is_squatting();

    // Base speed only once the facing has caught up with the intent.
    player.speed = match intent.as_direction() {
        Some(d) if d == player.direction && !squatting => player.config.run_speed * d.sign(),
        _ => 0,
    };

    if let Some(d) = intent.as_direction() {
        player.direction = d;
    }

    // Momentum: build toward the bound while dashing with a held
    // direction, otherwise decay toward zero.
    let limit = player.config.momentum_limit;
    if player.input.speed_up && intent.is_active() && !squatting {
        match intent {
            MovementIntent::Left if player.x_vector > -limit => player.x_vector -= 1,
            MovementIntent::Right if player.x_vector < limit => player.x_vector += 1,
            _ => {}
        }
    } else if player.x_vector != 0 {
        player.x_vector -= player.x_vector.signum();
    }

    player.speed += player.x_vector;

    if (intent == MovementIntent::Left && player.x_vector > 0)
        || (intent == MovementIntent::Right && player.x_vector < 0)
    {
        player.is_braking = true;
    }

    // Integrate x, clamped to the stage walls.
    let step = player.config.pixel_size * player.speed;
    if player.speed > 0 {
        player.position.x = (player.position.x + step).min(world.stage.right - player.size.width);
    } else if player.speed < 0 {
        player.position.x = (player.position.x + step).max(world.stage.left);
    }

    player.advance_leg_toggle();
    if player.speed == 0 {
        player.run_index = 0;
    }

    let mut index;
    if player.held.is_some() {
        if player.speed == 0 && intent.is_active() && player.x_vector == 0 {
            index = HOLD_IDLE;
            world.present_held(player);
        } else {
            index = if player.run_index == 0 {
                HOLD_WALK_A
            } else {
                HOLD_WALK_B
            };
            world.carry_held(player);
        }
    } else {
        index = if player.speed.abs() > player.config.sprint_threshold {
            if player.run_index == 0 {
                SPRINT_A
            } else {
                SPRINT_B
            }
        } else {
            player.run_index
        };

        if !player.is_jumping && player.is_braking {
            index = BRAKE;
            direction = direction.opposite();
            // Dust at the trailing edge of the skid
            let edge_x = player.position.x
                + if direction == Direction::Left {
                    player.size.width
                } else {
                    0
                };
            let slip_at = PixelVec2::new(edge_x, player.position.y);
            world.push(super::events::FrameEvent::slip_effect(world.tick, slip_at));
        }
    }

    if squatting {
        index = if player.held.is_some() { HOLD_FRONT } else { SQUAT };
    }

    if player.input.stance == super::input::Stance::Lookup
        && player.held.is_none()
        && player.speed == 0
    {
        index = LOOKUP;
    }

    Pose::new(index, direction)
}

// =============================================================================
// TESTS
// =============================================================================
