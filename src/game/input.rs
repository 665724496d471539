//! Input State
//!
//! Resolves raw press/release edges into exclusive movement and stance
//! intents. Two physical-press bits remember which direction keys are
//! held; a single resolved intent field makes left/right mutually
//! exclusive by construction, and the stance enum does the same for
//! squat/lookup.
//!
//! All transitions are pure functions of the current state (plus an
//! `airborne` gate where one applies), so the whole machine is testable
//! without an input device.

use serde::{Deserialize, Serialize};

use super::pose::Direction;

/// Resolved horizontal movement intent. At most one side is ever active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum MovementIntent {
    /// No direction held
    #[default]
    None = 0,
    /// Moving left
    Left = 1,
    /// Moving right
    Right = 2,
}

impl MovementIntent {
    /// Active direction, if any.
    #[inline]
    pub fn as_direction(self) -> Option<Direction> {
        match self {
            MovementIntent::None => None,
            MovementIntent::Left => Some(Direction::Left),
            MovementIntent::Right => Some(Direction::Right),
        }
    }

    /// Whether any direction is held.
    #[inline]
    pub fn is_active(self) -> bool {
        self != MovementIntent::None
    }
}

/// Exclusive stance. Squatting and looking up cannot coexist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Stance {
    /// Upright
    #[default]
    Standing = 0,
    /// Crouched
    Squat = 1,
    /// Looking up
    Lookup = 2,
}

/// One input edge, as delivered by a device binding or a script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputCommand {
    /// Left pressed
    PressLeft,
    /// Left released
    ReleaseLeft,
    /// Right pressed
    PressRight,
    /// Right released
    ReleaseRight,
    /// Squat pressed
    PressSquat,
    /// Squat released
    ReleaseSquat,
    /// Lookup pressed
    PressLookup,
    /// Lookup released
    ReleaseLookup,
    /// Speed-up (dash) pressed
    PressDash,
    /// Speed-up released
    ReleaseDash,
    /// Jump pressed
    PressJump,
    /// Special (invulnerable) jump pressed
    PressSpecialJump,
    /// Jump released early
    ReleaseJump,
    /// Grab armed
    PressGrab,
    /// Grab released
    ReleaseGrab,
    /// Pause toggled
    TogglePause,
}

/// The layered input state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    /// Physical left key held
    pub left_pushed: bool,
    /// Physical right key held
    pub right_pushed: bool,
    /// Resolved movement intent
    pub intent: MovementIntent,
    /// Resolved stance
    pub stance: Stance,
    /// Speed-up held
    pub speed_up: bool,
}

impl InputState {
    /// Fresh state with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the player is squatting.
    #[inline]
    pub fn is_squatting(&self) -> bool {
        self.stance == Stance::Squat
    }

    /// Left pressed. The press is remembered; the intent is claimed only
    /// when not squatting and the opposite intent is not already active.
    pub fn press_left(&mut self) {
        self.left_pushed = true;
        if !self.is_squatting() && self.intent != MovementIntent::Right {
            self.intent = MovementIntent::Left;
        }
    }

    /// Right pressed, mirror of [`InputState::press_left`].
    pub fn press_right(&mut self) {
        self.right_pushed = true;
        if !self.is_squatting() && self.intent != MovementIntent::Left {
            self.intent = MovementIntent::Right;
        }
    }

    /// Left released. If right is still physically held, the right intent
    /// reactivates in the same transition.
    pub fn release_left(&mut self) {
        self.left_pushed = false;
        if self.intent == MovementIntent::Left {
            self.intent = MovementIntent::None;
        }
        if self.right_pushed {
            self.intent = MovementIntent::Right;
        }
    }

    /// Right released, mirror of [`InputState::release_left`].
    pub fn release_right(&mut self) {
        self.right_pushed = false;
        if self.intent == MovementIntent::Right {
            self.intent = MovementIntent::None;
        }
        if self.left_pushed {
            self.intent = MovementIntent::Left;
        }
    }

    /// Squat pressed. Rejected while airborne or looking up.
    pub fn press_squat(&mut self, airborne: bool) {
        if !airborne && self.stance != Stance::Lookup {
            self.stance = Stance::Squat;
        }
    }

    /// Squat released.
    pub fn release_squat(&mut self) {
        if self.stance == Stance::Squat {
            self.stance = Stance::Standing;
        }
    }

    /// Lookup pressed. Rejected while airborne, moving, or squatting.
    pub fn press_lookup(&mut self, airborne: bool) {
        if !airborne && !self.intent.is_active() && self.stance == Stance::Standing {
            self.stance = Stance::Lookup;
        }
    }

    /// Lookup released.
    pub fn release_lookup(&mut self) {
        if self.stance == Stance::Lookup {
            self.stance = Stance::Standing;
        }
    }

    /// Speed-up pressed.
    pub fn press_dash(&mut self) {
        self.speed_up = true;
    }

    /// Speed-up released.
    pub fn release_dash(&mut self) {
        self.speed_up = false;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_direction_claims_intent() {
        let mut input = InputState::new();
        input.press_right(); // claims
        input.press_left(); // blocked, but remembered
        assert_eq!(input.intent, MovementIntent::Right);
        assert!(input.left_pushed);
        assert!(input.right_pushed);
    }

    #[test]
    fn test_release_yields_to_still_held_opposite() {
        let mut input = InputState::new();
        input.press_right();
        input.press_left();
        // Releasing the active side hands the intent to the held side
        input.release_right();
        assert_eq!(input.intent, MovementIntent::Left);

        input.release_left();
        assert_eq!(input.intent, MovementIntent::None);
        assert!(!input.left_pushed && !input.right_pushed);
    }

    #[test]
    fn test_release_inactive_side_keeps_intent() {
        let mut input = InputState::new();
        input.press_left();
        input.press_right();
        input.release_right();
        assert_eq!(input.intent, MovementIntent::Left);
    }

    #[test]
    fn test_press_while_squatting_remembers_but_does_not_claim() {
        let mut input = InputState::new();
        input.press_squat(false);
        input.press_right();
        assert!(input.right_pushed);
        assert_eq!(input.intent, MovementIntent::None);
    }

    #[test]
    fn test_squat_rejected_airborne_and_while_looking_up() {
        let mut input = InputState::new();
        input.press_squat(true);
        assert_eq!(input.stance, Stance::Standing);

        input.press_lookup(false);
        input.press_squat(false);
        assert_eq!(input.stance, Stance::Lookup);
    }

    #[test]
    fn test_lookup_rejected_while_moving_or_squatting() {
        let mut input = InputState::new();
        input.press_right();
        input.press_lookup(false);
        assert_eq!(input.stance, Stance::Standing);

        input.release_right();
        input.press_squat(false);
        input.press_lookup(false);
        assert_eq!(input.stance, Stance::Squat);
    }

    #[test]
    fn test_release_squat_does_not_clear_lookup() {
        let mut input = InputState::new();
        input.press_lookup(false);
        input.release_squat();
        assert_eq!(input.stance, Stance::Lookup);
        input.release_lookup();
        assert_eq!(input.stance, Stance::Standing);
    }

    /// Arbitrary edge applied to the direction/stance machine.
    fn any_edge() -> impl Strategy<Value = u8> {
        0u8..8
    }

    proptest! {
        /// Left and right intents are never simultaneously active, and the
        /// stance never mixes squat and lookup, under any edge sequence.
        /// (The intent/stance enums make this structural; the property
        /// pins it against future representation changes.)
        #[test]
        fn prop_intent_consistent_with_pushed_bits(edges in prop::collection::vec((any_edge(), any::<bool>()), 0..64)) {
            let mut input = InputState::new();
            for (edge, airborne) in edges {
                match edge {
                    0 => input.press_left(),
                    1 => input.release_left(),
                    2 => input.press_right(),
                    3 => input.release_right(),
                    4 => input.press_squat(airborne),
                    5 => input.release_squat(),
                    6 => input.press_lookup(airborne),
                    _ => input.release_lookup(),
                }
                // A resolved intent implies its physical key is still down
                match input.intent {
                    MovementIntent::Left => prop_assert!(input.left_pushed),
                    MovementIntent::Right => prop_assert!(input.right_pushed),
                    MovementIntent::None => {}
                }
            }
        }
    }
}
