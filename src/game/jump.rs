//! Jump/Gravity Solver
//!
//! Vertical physics and airborne-pose selection for one tick: gravity
//! integration, the ceiling clamp with its push-up notification, landing,
//! and the special-jump pose cycle.

use super::events::FrameEventData;
use super::player::Player;
use super::pose::{Pose, JUMP_FALL, JUMP_RISE, SPECIAL_CYCLE, SPRINT_JUMP};
use super::world::World;

/// Advance vertical motion. Returns the airborne pose, or `None` when the
/// ground pose from the run solver should stand.
pub fn jump_motion(player: &mut Player, world: &mut World) -> Option<Pose> {
    let ground = world.stage.ground;

    // Anything above the ground is airborne, walked-off ledges included.
    if player.position.y > ground {
        player.is_jumping = true;
    }

    if !player.is_jumping {
        player.y_vector = 0;
        return None;
    }

    player.y_vector -= player.config.gravity * player.config.pixel_size;

    if let Some(ceiling) = world.stage.ceiling {
        let cap = ceiling - player.size.height + player.size.height_offset;
        player.position.y = (player.position.y + player.y_vector).min(cap);
        if player.position.y == cap && player.y_vector > 0 {
            // Still ascending into the clamp: whatever is above gets shoved
            world.push_event(FrameEventData::PushedUp);
            player.y_vector = 0;
        }
    } else {
        player.position.y += player.y_vector;
    }

    world.carry_held(player);

    if player.position.y <= ground {
        player.combo = 0;
        player.is_jumping = false;
        player.y_vector = 0;
        player.position.y = ground;
        return None;
    }

    if player.held.is_some() {
        // Carrying: the hold-walk pose from the run solver stands
        return None;
    }

    if player.is_special {
        player.special_cycle = (player.special_cycle + 1) % SPECIAL_CYCLE.len();
        return Some(SPECIAL_CYCLE[player.special_cycle]);
    }

    if player.speed > player.config.sprint_threshold {
        // Low ascent at sprint speed keeps the run pose
        if player.y_vector > 0 && player.position.y < player.size.height * 3 {
            None
        } else {
            Some(Pose::new(SPRINT_JUMP, player.direction))
        }
    } else if player.y_vector > 0 {
        Some(Pose::new(JUMP_RISE, player.direction))
    } else {
        Some(Pose::new(JUMP_FALL, player.direction))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::PixelVec2;
    use crate::game::enemy::testing::StubEnemy;
    use crate::game::player::PlayerConfig;
    use crate::game::pose::Direction;
    use crate::game::stage::Stage;

    fn fixture() -> (Player, World) {
        let config = PlayerConfig {
            pixel_size: 1,
            ..PlayerConfig::default()
        };
        let player = Player::new(config, PixelVec2::new(100, 0), Direction::Right);
        let world = World::new(Stage::default());
        (player, world)
    }

    #[test]
    fn test_jump_arc_first_tick() {
        let (mut player, mut world) = fixture();
        player.press_jump();
        assert_eq!(player.y_vector, 18);

        let pose = jump_motion(&mut player, &mut world);
        // gravity 2: 18 - 2 = 16
        assert_eq!(player.y_vector, 16);
        assert_eq!(player.position.y, 16);
        assert!(player.is_jumping);
        assert_eq!(pose.unwrap().index, JUMP_RISE);
    }

    #[test]
    fn test_full_arc_lands_and_resets() {
        let (mut player, mut world) = fixture();
        player.combo = 4;
        player.press_jump();

        let mut landed_pose = Some(Pose::new(0, Direction::Right));
        for _ in 0..64 {
            landed_pose = jump_motion(&mut player, &mut world);
            if !player.is_jumping {
                break;
            }
        }

        assert!(!player.is_jumping);
        assert_eq!(player.position.y, 0);
        assert_eq!(player.y_vector, 0);
        // Streak resets exactly on the landing tick
        assert_eq!(player.combo, 0);
        assert_eq!(landed_pose, None);
    }

    #[test]
    fn test_falling_pose_on_descent() {
        let (mut player, mut world) = fixture();
        player.press_jump();
        let mut saw_fall = false;
        for _ in 0..64 {
            let pose = jump_motion(&mut player, &mut world);
            if player.is_jumping && player.y_vector < 0 {
                assert_eq!(pose.unwrap().index, JUMP_FALL);
                saw_fall = true;
            }
            if !player.is_jumping {
                break;
            }
        }
        assert!(saw_fall);
    }

    #[test]
    fn test_grounded_is_inert() {
        let (mut player, mut world) = fixture();
        let pose = jump_motion(&mut player, &mut world);
        assert_eq!(pose, None);
        assert_eq!(player.position.y, 0);
        assert_eq!(player.y_vector, 0);
    }

    #[test]
    fn test_walkoff_becomes_airborne() {
        let (mut player, mut world) = fixture();
        player.position.y = 40;
        jump_motion(&mut player, &mut world);
        assert!(player.is_jumping);
        assert!(player.y_vector < 0);
    }

    #[test]
    fn test_ceiling_clamp_pushes_up_and_stops_ascent() {
        let (mut player, mut world) = fixture();
        world.stage.ceiling = Some(30);
        player.press_jump();

        jump_motion(&mut player, &mut world);
        let cap = 30 - player.size.height;
        assert_eq!(player.position.y, cap);
        assert_eq!(player.y_vector, 0);
        assert!(world
            .take_events()
            .iter()
            .any(|e| matches!(e.data, FrameEventData::PushedUp)));
    }

    #[test]
    fn test_special_cycle_wraps_in_range() {
        let (mut player, mut world) = fixture();
        player.press_special_jump();

        let mut seen = Vec::new();
        for _ in 0..10 {
            if let Some(pose) = jump_motion(&mut player, &mut world) {
                seen.push(pose);
            }
            if !player.is_jumping {
                break;
            }
        }

        // Modulo advance: starts at entry 1 and cycles 1,2,3,0,1,...
        assert_eq!(seen[0], SPECIAL_CYCLE[1]);
        assert_eq!(seen[1], SPECIAL_CYCLE[2]);
        assert_eq!(seen[2], SPECIAL_CYCLE[3]);
        assert_eq!(seen[3], SPECIAL_CYCLE[0]);
        assert_eq!(seen[4], SPECIAL_CYCLE[1]);
    }

    #[test]
    fn test_sprint_jump_pose_except_low_ascent() {
        let (mut player, mut world) = fixture();
        player.speed = 10;
        player.press_jump();

        // First tick: ascending and still below three body heights
        let pose = jump_motion(&mut player, &mut world);
        assert_eq!(pose, None);

        // Once descending the sprint-jump frame shows
        player.y_vector = -2;
        player.position.y = 40;
        let pose = jump_motion(&mut player, &mut world);
        assert_eq!(pose.unwrap().index, SPRINT_JUMP);
    }

    #[test]
    fn test_held_enemy_is_carried_through_the_air() {
        let (mut player, mut world) = fixture();
        let id = world.add_enemy(Box::new(StubEnemy::stunned_at(0, 0)));
        player.held = Some(id);
        player.press_jump();

        let pose = jump_motion(&mut player, &mut world);
        // No airborne pose while carrying
        assert_eq!(pose, None);
        let probe = world.probe(id).unwrap();
        assert_eq!(probe.position.y, player.position.y + 1);
        assert_eq!(
            probe.position.x,
            player.position.x + player.size.width * 7 / 10
        );
    }
}
