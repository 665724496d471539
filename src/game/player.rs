//! Player State
//!
//! The single controllable character: position, velocity terms, input
//! state, grab relation, combo streak, and the per-tick phase machine
//! that replaces wall-clock timers (action pauses, the death countdown).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::hash::StateHasher;
use crate::core::vec2::{CharSize, PixelVec2};

use super::input::{InputCommand, InputState};
use super::pose::Direction;
use super::world::World;

/// Leg-animation cadence: the frame toggle flips when the step counter
/// passes this value.
pub const STEP_TICKS: u32 = 2;

/// Default draw layer for the player.
pub const DEFAULT_Z_INDEX: i32 = 100;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// The tuning surface of the control core.
///
/// Impulse-style values are in "speed units" and get multiplied by
/// `pixel_size` at the point of use, matching how the solvers integrate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Sprite scale; converts speed units to pixels
    pub pixel_size: i32,
    /// Tick period for the runtime driver, in milliseconds
    pub frame_interval_ms: u64,
    /// Initial jump impulse (x pixel_size)
    pub jump_power: i32,
    /// Downward acceleration per tick (x pixel_size)
    pub gravity: i32,
    /// Base walking speed
    pub run_speed: i32,
    /// Momentum bound: x_vector stays in [-limit, limit]
    pub momentum_limit: i32,
    /// Speed above which sprint poses kick in
    pub sprint_threshold: i32,
    /// Upward bounce after a finishing kill (x pixel_size)
    pub stomp_bounce: i32,
    /// Upward bounce after stepping on an enemy (x pixel_size)
    pub step_bounce: i32,
    /// Added to y_vector when something bumps the player from below
    pub push_up_bounce: i32,
    /// Kick/throw impulse is this multiple of the current speed
    pub kick_impulse_factor: i32,
    /// Removal once the dying player falls this many body heights below ground
    pub death_fall_heights: i32,
    /// Ticks the hurt pose holds before the death free-fall
    pub death_pre_roll: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            pixel_size: 2,
            frame_interval_ms: 45,
            jump_power: 18,
            gravity: 2,
            run_speed: 2,
            momentum_limit: 10,
            sprint_threshold: 8,
            stomp_bounce: 2,
            step_bounce: 12,
            push_up_bounce: 10,
            kick_impulse_factor: 3,
            death_fall_heights: 5,
            death_pre_roll: 20,
        }
    }
}

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// pixel_size must be positive
    #[error("pixel_size must be at least 1, got {0}")]
    PixelSize(i32),
    /// frame interval must be positive
    #[error("frame_interval_ms must be at least 1, got {0}")]
    FrameInterval(u64),
    /// gravity must be positive or the jump never ends
    #[error("gravity must be at least 1, got {0}")]
    Gravity(i32),
    /// momentum limit must be positive
    #[error("momentum_limit must be at least 1, got {0}")]
    MomentumLimit(i32),
}

impl PlayerConfig {
    /// Validate the tuning values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pixel_size < 1 {
            return Err(ConfigError::PixelSize(self.pixel_size));
        }
        if self.frame_interval_ms < 1 {
            return Err(ConfigError::FrameInterval(self.frame_interval_ms));
        }
        if self.gravity < 1 {
            return Err(ConfigError::Gravity(self.gravity));
        }
        if self.momentum_limit < 1 {
            return Err(ConfigError::MomentumLimit(self.momentum_limit));
        }
        Ok(())
    }
}

// =============================================================================
// PHASE
// =============================================================================

/// Per-tick lifecycle phase.
///
/// Brief pauses and the death countdown are explicit counters here, driven
/// by the same tick clock as everything else - no timers to orphan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerPhase {
    /// Normal simulation
    #[default]
    Active,
    /// Frozen for a fixed number of ticks (action poses, grab-release stun)
    Paused {
        /// Remaining frozen ticks
        ticks: u32,
    },
    /// Death sequence in progress
    Dying {
        /// Ticks elapsed since the damage hit
        elapsed: u32,
    },
    /// Goal sequence ran; the player is frozen in celebration
    Goal,
    /// Death free-fall finished; the entity is gone
    Removed,
}

// =============================================================================
// PLAYER
// =============================================================================

/// State of the controllable character.
#[derive(Debug)]
pub struct Player {
    /// Tuning values
    pub config: PlayerConfig,
    /// Bottom-left corner of the collision box
    pub position: PixelVec2,
    /// Collision box and sprite padding
    pub size: CharSize,
    /// Physics facing
    pub direction: Direction,
    /// Direction of the most recent kick/stomp, used by the action pose
    pub attack_direction: Direction,
    /// Draw layer
    pub z_index: i32,
    /// Resolved input state
    pub input: InputState,
    /// Signed vertical speed
    pub y_vector: i32,
    /// Bounded momentum term layered on the base walking speed
    pub x_vector: i32,
    /// Effective horizontal speed of the last run tick
    pub speed: i32,
    /// Airborne flag
    pub is_jumping: bool,
    /// Invulnerable-jump tag
    pub is_special: bool,
    /// Intent opposes residual momentum this tick
    pub is_braking: bool,
    /// Grab intent armed (attachment happens on contact)
    pub grabbing: bool,
    /// The held enemy, if any. At most one; only the player's tick
    /// creates or clears this.
    pub held: Option<super::enemy::EnemyId>,
    /// Combo streak, reset on landing
    pub combo: u32,
    /// Accumulated score
    pub score: u32,
    /// Lifecycle phase
    pub phase: PlayerPhase,
    pub(crate) run_index: u8,
    pub(crate) current_step: u32,
    pub(crate) special_cycle: usize,
}

impl Player {
    /// Spawn a player at a position, facing the given way.
    pub fn new(config: PlayerConfig, position: PixelVec2, direction: Direction) -> Self {
        Self {
            config,
            position,
            size: CharSize::new(16 * config.pixel_size, 22 * config.pixel_size),
            direction,
            attack_direction: direction,
            z_index: DEFAULT_Z_INDEX,
            input: InputState::new(),
            y_vector: 0,
            x_vector: 0,
            speed: 0,
            is_jumping: false,
            is_special: false,
            is_braking: false,
            grabbing: false,
            held: None,
            combo: 0,
            score: 0,
            phase: PlayerPhase::Active,
            run_index: 0,
            current_step: STEP_TICKS,
            special_cycle: 0,
        }
    }

    /// Whether the player is squatting.
    #[inline]
    pub fn is_squatting(&self) -> bool {
        self.input.is_squatting()
    }

    /// Whether the player has been removed from play.
    #[inline]
    pub fn is_removed(&self) -> bool {
        self.phase == PlayerPhase::Removed
    }

    /// Advance the leg-animation toggle. Shared by the run solver and the
    /// death free-fall.
    pub(crate) fn advance_leg_toggle(&mut self) {
        if self.current_step < STEP_TICKS {
            self.current_step += 1;
        } else {
            self.current_step = 0;
            self.run_index ^= 1;
        }
    }

    // =========================================================================
    // INPUT EDGES
    // =========================================================================

    /// Jump trigger. No-op unless grounded and not squatting; while
    /// airborne a second press changes nothing.
    pub fn press_jump(&mut self) {
        if !self.is_jumping && !self.is_squatting() {
            self.is_jumping = true;
            self.is_special = false;
            self.y_vector = self.config.jump_power * self.config.pixel_size;
        }
    }

    /// Special (invulnerable) jump trigger, same gating as a normal jump.
    pub fn press_special_jump(&mut self) {
        if !self.is_jumping && !self.is_squatting() {
            self.is_jumping = true;
            self.is_special = true;
            self.y_vector = self.config.jump_power * self.config.pixel_size;
        }
    }

    /// Early jump release: cut the ascent for variable jump height.
    pub fn release_jump(&mut self) {
        if self.y_vector > 0 {
            self.y_vector = 0;
        }
    }

    /// Arm the grab intent. Attachment happens later, in combat
    /// resolution, on contact with a stunned enemy.
    pub fn press_grab(&mut self) {
        if !self.is_jumping && !self.is_squatting() {
            self.grabbing = true;
        }
    }

    /// Disarm the grab intent; if an enemy is held, release it, show the
    /// stun frame, and freeze for one tick.
    pub fn release_grab(&mut self, world: &mut World) {
        self.grabbing = false;
        if let Some(id) = self.held.take() {
            if let Some(enemy) = world.enemy_mut(id) {
                enemy.on_grabbed(false);
            }
            let pose = super::pose::Pose::new(super::pose::HOLD_FRONT, self.direction);
            world.push_draw(pose);
            self.phase = PlayerPhase::Paused { ticks: 1 };
        }
    }

    /// Something below pushed the player up (ceiling-bump propagation).
    pub fn on_pushed_up(&mut self) {
        self.y_vector += self.config.push_up_bounce;
    }

    /// Another character landed on the player.
    pub fn on_stepped_on(&mut self) {
        self.y_vector = 0;
    }

    /// Apply one input edge. Edges arriving during the death or goal
    /// sequence are dropped: input processing is halted.
    pub fn apply_command(&mut self, world: &mut World, command: InputCommand) {
        match self.phase {
            PlayerPhase::Dying { .. } | PlayerPhase::Goal | PlayerPhase::Removed => return,
            PlayerPhase::Active | PlayerPhase::Paused { .. } => {}
        }
        match command {
            InputCommand::PressLeft => self.input.press_left(),
            InputCommand::ReleaseLeft => self.input.release_left(),
            InputCommand::PressRight => self.input.press_right(),
            InputCommand::ReleaseRight => self.input.release_right(),
            InputCommand::PressSquat => self.input.press_squat(self.is_jumping),
            InputCommand::ReleaseSquat => self.input.release_squat(),
            InputCommand::PressLookup => self.input.press_lookup(self.is_jumping),
            InputCommand::ReleaseLookup => self.input.release_lookup(),
            InputCommand::PressDash => self.input.press_dash(),
            InputCommand::ReleaseDash => self.input.release_dash(),
            InputCommand::PressJump => self.press_jump(),
            InputCommand::PressSpecialJump => self.press_special_jump(),
            InputCommand::ReleaseJump => self.release_jump(),
            InputCommand::PressGrab => self.press_grab(),
            InputCommand::ReleaseGrab => self.release_grab(world),
            InputCommand::TogglePause => world.toggle_running(),
        }
    }

    /// Hash the player state for determinism verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_vec2(self.position);
        hasher.update_i32(self.y_vector);
        hasher.update_i32(self.x_vector);
        hasher.update_i32(self.speed);
        hasher.update_u8(self.direction as u8);
        hasher.update_bool(self.is_jumping);
        hasher.update_bool(self.is_special);
        hasher.update_bool(self.grabbing);
        hasher.update_u32(self.held.map_or(u32::MAX, |id| id.0));
        hasher.update_u32(self.combo);
        hasher.update_u32(self.score);
        hasher.update_u8(match self.phase {
            PlayerPhase::Active => 0,
            PlayerPhase::Paused { .. } => 1,
            PlayerPhase::Dying { .. } => 2,
            PlayerPhase::Goal => 3,
            PlayerPhase::Removed => 4,
        });
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::stage::Stage;

    fn player() -> Player {
        Player::new(
            PlayerConfig::default(),
            PixelVec2::new(32, 0),
            Direction::Right,
        )
    }

    #[test]
    fn test_config_default_is_valid() {
        assert_eq!(PlayerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let mut config = PlayerConfig {
            pixel_size: 0,
            ..PlayerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PixelSize(0)));

        config.pixel_size = 2;
        config.gravity = 0;
        assert_eq!(config.validate(), Err(ConfigError::Gravity(0)));
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = PlayerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: PlayerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_jump_sets_impulse_once() {
        let mut p = player();
        p.press_jump();
        assert!(p.is_jumping);
        assert_eq!(p.y_vector, 18 * 2);

        // Second trigger while airborne is a no-op
        p.y_vector = 5;
        p.press_jump();
        assert_eq!(p.y_vector, 5);
    }

    #[test]
    fn test_jump_rejected_while_squatting() {
        let mut p = player();
        p.input.press_squat(false);
        p.press_jump();
        assert!(!p.is_jumping);
        assert_eq!(p.y_vector, 0);
    }

    #[test]
    fn test_release_jump_only_cuts_ascent() {
        let mut p = player();
        p.press_jump();
        p.release_jump();
        assert_eq!(p.y_vector, 0);

        // Falling: release does nothing
        p.y_vector = -6;
        p.release_jump();
        assert_eq!(p.y_vector, -6);
    }

    #[test]
    fn test_special_jump_tags_special() {
        let mut p = player();
        p.press_special_jump();
        assert!(p.is_special);
        assert_eq!(p.y_vector, 36);
    }

    #[test]
    fn test_grab_gating() {
        let mut p = player();
        p.is_jumping = true;
        p.press_grab();
        assert!(!p.grabbing);

        p.is_jumping = false;
        p.press_grab();
        assert!(p.grabbing);
    }

    #[test]
    fn test_commands_dropped_while_dying() {
        let mut p = player();
        let mut world = World::new(Stage::default());
        p.phase = PlayerPhase::Dying { elapsed: 3 };
        p.apply_command(&mut world, InputCommand::PressRight);
        assert!(!p.input.right_pushed);
    }

    #[test]
    fn test_pushed_up_and_stepped_on() {
        let mut p = player();
        p.y_vector = 4;
        p.on_pushed_up();
        assert_eq!(p.y_vector, 14);
        p.on_stepped_on();
        assert_eq!(p.y_vector, 0);
    }
}
