//! Lifecycle Controller
//!
//! The per-tick orchestration: combat first, then the run and jump
//! solvers, then the draw call - with the action pauses, the death
//! sequence and the goal sequence layered on top as explicit phase
//! state. One call to [`tick`] is one frame of simulation.

use tracing::{debug, info};

use super::combat::{resolve_combat, HitStatus};
use super::events::{FrameEvent, FrameEventData};
use super::input::InputCommand;
use super::jump::jump_motion;
use super::player::{Player, PlayerPhase};
use super::pose::{Direction, Pose, HOLD_FRONT, HURT, IDLE, KICK, VICTORY};
use super::run::run_motion;
use super::world::World;

/// Result of one tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Combat outcome this tick
    pub status: HitStatus,
    /// Pose forwarded to the draw sink, if one was selected
    pub pose: Option<Pose>,
    /// The player entity was removed this tick
    pub removed: bool,
    /// Events emitted this tick
    pub events: Vec<FrameEvent>,
}

/// Run one simulation tick.
///
/// # Ordering
///
/// Combat resolves before motion so a damage hit freezes the player in
/// place; with no combat interruption the run solver then the jump solver
/// execute, and an airborne pose overrides the ground pose.
pub fn tick(player: &mut Player, world: &mut World) -> TickResult {
    let mut result = TickResult::default();
    world.tick += 1;

    match player.phase {
        PlayerPhase::Removed | PlayerPhase::Goal => {}
        PlayerPhase::Paused { ticks } => {
            player.phase = if ticks <= 1 {
                PlayerPhase::Active
            } else {
                PlayerPhase::Paused { ticks: ticks - 1 }
            };
        }
        PlayerPhase::Dying { elapsed } => death_tick(player, world, elapsed, &mut result),
        PlayerPhase::Active => active_tick(player, world, &mut result),
    }

    result.events = world.take_events();
    result
}

fn active_tick(player: &mut Player, world: &mut World, result: &mut TickResult) {
    let status = resolve_combat(player, world);
    result.status = status;

    match status {
        HitStatus::Damage => {
            info!(tick = world.tick, "player hurt, starting death sequence");
            world.game_over = true;
            world.push_event(FrameEventData::GameOver);
            player.phase = PlayerPhase::Dying { elapsed: 0 };
        }
        HitStatus::Attack => {
            // Physics still advances under the action pose
            let _ = run_motion(player, world);
            let _ = jump_motion(player, world);
            let pose = Pose::new(KICK, player.attack_direction);
            world.push_draw(pose);
            result.pose = Some(pose);
            player.phase = PlayerPhase::Paused { ticks: 1 };
        }
        HitStatus::Grab => {
            world.carry_held(player);
            let pose = Pose::new(HOLD_FRONT, player.direction);
            world.push_draw(pose);
            result.pose = Some(pose);
            player.phase = PlayerPhase::Paused { ticks: 1 };
        }
        HitStatus::None => {
            let mut pose = run_motion(player, world);
            if let Some(airborne) = jump_motion(player, world) {
                pose = airborne;
            }
            // Idle frame carries sprite padding
            player.size.width_offset = if pose.index == IDLE {
                4 * player.config.pixel_size
            } else {
                0
            };
            world.push_draw(pose);
            result.pose = Some(pose);
        }
    }
}

/// One tick of the death sequence: hold the hurt pose through the
/// pre-roll (with a single upward impulse on entry), then free-fall under
/// gravity until the removal threshold.
fn death_tick(player: &mut Player, world: &mut World, elapsed: u32, result: &mut TickResult) {
    let config = player.config;

    if elapsed < config.death_pre_roll {
        if elapsed == 0 {
            player.y_vector = config.jump_power * config.pixel_size;
        }
        let pose = Pose::new(HURT, Direction::Right);
        world.push_draw(pose);
        result.pose = Some(pose);
        player.phase = PlayerPhase::Dying { elapsed: elapsed + 1 };
        return;
    }

    player.y_vector -= config.gravity * config.pixel_size;
    player.position.y += player.y_vector;

    if player.position.y < -(player.size.height * config.death_fall_heights) {
        debug!(tick = world.tick, "death free-fall complete, removing player");
        world.push_event(FrameEventData::Destroyed);
        player.phase = PlayerPhase::Removed;
        result.removed = true;
        return;
    }

    player.advance_leg_toggle();
    let direction = if player.run_index == 0 {
        Direction::Left
    } else {
        Direction::Right
    };
    let pose = Pose::new(HURT, direction);
    world.push_draw(pose);
    result.pose = Some(pose);
    player.phase = PlayerPhase::Dying { elapsed: elapsed + 1 };
}

/// Run the goal sequence: victory pose, optional completion callback,
/// then freeze.
pub fn goal<F: FnOnce()>(player: &mut Player, world: &mut World, on_complete: Option<F>) {
    let pose = Pose::new(VICTORY, Direction::Right);
    world.push_draw(pose);
    world.push_event(FrameEventData::GoalReached);
    player.phase = PlayerPhase::Goal;
    info!(tick = world.tick, "goal reached");
    if let Some(callback) = on_complete {
        callback();
    }
}

/// Replay a scripted run: apply each `(tick, command)` edge just before
/// its tick, simulate `ticks` frames, and collect every emitted event.
///
/// Drives the same [`tick`] as the live driver, so a script replays to an
/// identical state - the demo binary uses this to verify determinism.
pub fn run_script(
    player: &mut Player,
    world: &mut World,
    script: &[(u32, InputCommand)],
    ticks: u32,
) -> Vec<FrameEvent> {
    let mut all_events = Vec::new();
    for t in 0..ticks {
        for (at, command) in script {
            if *at == t {
                player.apply_command(world, *command);
            }
        }
        if !world.is_running() {
            continue;
        }
        let result = tick(player, world);
        all_events.extend(result.events);
        if result.removed {
            break;
        }
    }
    all_events
}

// =============================================================================
// TESTS
// =============================================================================
