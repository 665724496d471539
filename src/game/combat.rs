//! Combat Resolver
//!
//! Hit-tests the player against every active enemy once per tick and
//! resolves stomps, kicks, grabs, double-attacks and damage.
//!
//! Scan contract (explicit, not an accident of the loop):
//! - enemies are visited in registration order;
//! - the first terminal status (damage, attack, grab) stops the scan;
//! - stomps never stop the scan, so several enemies can be flattened in
//!   one tick;
//! - a grounded special-mode finishing kill ends the scan with no status.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::vec2::{boxes_overlap, CharSize, PixelVec2};

use super::player::Player;
use super::pose::Direction;
use super::world::World;

/// Outcome of the per-tick hit test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HitStatus {
    /// Nothing happened that changes the tick flow
    #[default]
    None,
    /// The player was hurt; the death sequence begins
    Damage,
    /// A kick/attack landed; show the action pose and pause one frame
    Attack,
    /// An enemy was picked up; show the hold pose and pause one frame
    Grab,
}

/// Which side of `b` the box `a` is on; ties push `b` rightward.
fn knock_direction(a_pos: PixelVec2, a_size: CharSize, b_pos: PixelVec2, b_size: CharSize) -> Direction {
    if a_size.center_x(a_pos) <= b_size.center_x(b_pos) {
        Direction::Right
    } else {
        Direction::Left
    }
}

/// Point popup + score credit at an enemy position. The popup carries the
/// streak as it was before this award; `count_up` grows the streak.
fn award_point(player: &mut Player, world: &mut World, position: PixelVec2, count_up: bool) {
    world.push(super::events::FrameEvent::point_effect(
        world.tick,
        position,
        player.combo,
    ));
    player.score += 1;
    world.push(super::events::FrameEvent::score(world.tick, 1, player.score));
    if count_up {
        player.combo += 1;
    }
}

/// Run the combat scan for this tick.
pub fn resolve_combat(player: &mut Player, world: &mut World) -> HitStatus {
    let kick_factor = player.config.kick_impulse_factor;
    let pixel = player.config.pixel_size;
    // Falling state is sampled once: the first stomp's bounce must not
    // disqualify the rest of the row from being stomped this tick.
    let falling = player.is_jumping && player.y_vector < 0;

    for id in world.enemy_ids() {
        if player.held == Some(id) {
            continue;
        }
        let Some(enemy) = world.probe(id) else { continue };
        if !enemy.active {
            continue;
        }

        if !boxes_overlap(player.position, player.size, enemy.position, enemy.size) {
            continue;
        }

        // Held enemy as a weapon: if it also touches this enemy, both get
        // knocked apart and the hold ends.
        let mut enemy = enemy;
        if let Some(held_id) = player.held {
            if let Some(held) = world.probe(held_id) {
                if boxes_overlap(held.position, held.size, enemy.position, enemy.size) {
                    let away = knock_direction(held.position, held.size, enemy.position, enemy.size);
                    let impulse = player.speed * kick_factor;
                    if let Some(e) = world.enemy_mut(id) {
                        e.on_kicked(away, impulse);
                    }
                    award_point(player, world, enemy.position, false);
                    if let Some(e) = world.enemy_mut(held_id) {
                        e.on_kicked(away.opposite(), impulse);
                        e.on_grabbed(false);
                    }
                    award_point(player, world, held.position, false);
                    player.held = None;
                    debug!(enemy = id.0, held = held_id.0, "double attack");
                    // The knock-away may have changed this enemy's state;
                    // the remaining cases see it fresh
                    match world.probe(id) {
                        Some(fresh) => enemy = fresh,
                        None => continue,
                    }
                }
            }
        }

        if enemy.stunned {
            if !player.grabbing {
                if player.is_special {
                    // Finishing kill: the scan ends here with no status
                    world.push(super::events::FrameEvent::special_effect(
                        world.tick,
                        enemy.position,
                    ));
                    award_point(player, world, enemy.position, true);
                    if let Some(e) = world.enemy_mut(id) {
                        e.on_killed();
                    }
                    player.y_vector = player.config.stomp_bounce * pixel;
                    return HitStatus::None;
                }
                let direction =
                    knock_direction(player.position, player.size, enemy.position, enemy.size);
                player.attack_direction = direction;
                let impulse = player.speed * kick_factor;
                let status = match world.enemy_mut(id) {
                    Some(e) => e.on_kicked(direction, impulse),
                    None => HitStatus::None,
                };
                debug!(enemy = id.0, ?status, "kick");
                return status;
            }
            // Grab intent armed: attach and stop scanning
            if let Some(e) = world.enemy_mut(id) {
                e.on_grabbed(true);
            }
            player.held = Some(id);
            debug!(enemy = id.0, "grabbed");
            return HitStatus::Grab;
        }

        if falling {
            if player.is_special {
                world.push(super::events::FrameEvent::special_effect(
                    world.tick,
                    enemy.position,
                ));
                award_point(player, world, enemy.position, false);
                if let Some(e) = world.enemy_mut(id) {
                    e.on_killed();
                }
                player.y_vector = player.config.stomp_bounce * pixel;
            } else {
                let direction =
                    knock_direction(player.position, player.size, enemy.position, enemy.size);
                player.attack_direction = direction;
                if let Some(e) = world.enemy_mut(id) {
                    e.on_stomped(direction);
                }
                award_point(player, world, enemy.position, true);
                let burst_at = player.position.midpoint(enemy.position);
                world.push(super::events::FrameEvent::star_effect(world.tick, burst_at));
                player.y_vector = player.config.step_bounce * pixel;
            }
            // Stomps never terminate: the rest of the row is still checked
            continue;
        }

        debug!(enemy = id.0, "damage");
        return HitStatus::Damage;
    }

    HitStatus::None
}

// =============================================================================
// TESTS
// =============================================================================
