//! Enemy Collaborator Contract
//!
//! Enemies are external actors; the player core only queries and commands
//! them through this trait. Their behaviors (walking, shell states,
//! recovery timers) live elsewhere.
//!
//! While held, an enemy must suppress its own positional updates: the
//! player's tick is the sole writer of its position for the duration of
//! the hold, signalled through `on_grabbed`.

use serde::{Deserialize, Serialize};

use crate::core::vec2::{CharSize, PixelVec2};

use super::combat::HitStatus;
use super::pose::Direction;

/// Weak handle into the world's enemy registry.
///
/// Monotonic per world; ordering is registration order, which is also the
/// combat scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Query/command interface the combat resolver drives.
///
/// `Send` because the runtime driver carries the world across its task
/// boundary; the simulation itself never touches an enemy from more than
/// one thread.
pub trait Enemy: Send {
    /// Whether this enemy still participates in hit-testing.
    fn is_active(&self) -> bool;

    /// Current position (bottom-left corner of the collision box).
    fn position(&self) -> PixelVec2;

    /// Collision box size.
    fn char_size(&self) -> CharSize;

    /// Whether the enemy is in its stunned/steppable state, i.e. it can be
    /// kicked, finished off, or picked up.
    fn is_stunned(&self) -> bool;

    /// Kicked away. `impulse` is the signed launch speed; the return value
    /// becomes the player's combat status for the tick.
    fn on_kicked(&mut self, direction: Direction, impulse: i32) -> HitStatus;

    /// Killed outright (special-jump contact).
    fn on_killed(&mut self);

    /// Stomped from above.
    fn on_stomped(&mut self, direction: Direction);

    /// Hold state changed. `true` when picked up; `false` when released -
    /// the enemy resumes writing its own position afterwards.
    fn on_grabbed(&mut self, held: bool);

    /// Reposition (only called while held).
    fn set_position(&mut self, position: PixelVec2);

    /// Refresh the enemy's own sprite (forwarded while carried).
    fn draw_action(&mut self);

    /// Adjust draw layering relative to the player.
    fn set_z_index(&mut self, z_index: i32);
}

// =============================================================================
// TEST DOUBLE
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Observable state of a [`StubEnemy`], shared with the test through
    /// an `Arc` so calls made through `Box<dyn Enemy>` can be asserted on.
    #[derive(Debug)]
    pub struct StubState {
        pub position: PixelVec2,
        pub size: CharSize,
        pub active: bool,
        pub stunned: bool,
        pub kick_status: HitStatus,
        pub kicked: Vec<(Direction, i32)>,
        pub stomped: Vec<Direction>,
        pub grab_calls: Vec<bool>,
        pub killed: bool,
        pub draw_calls: u32,
        pub z_index: i32,
    }

    /// Recording stub used by the combat and lifecycle tests.
    #[derive(Debug)]
    pub struct StubEnemy {
        state: Arc<Mutex<StubState>>,
    }

    impl StubEnemy {
        /// Active, not stunned.
        pub fn at(x: i32, y: i32) -> Self {
            Self {
                state: Arc::new(Mutex::new(StubState {
                    position: PixelVec2::new(x, y),
                    size: CharSize::new(16, 16),
                    active: true,
                    stunned: false,
                    kick_status: HitStatus::Attack,
                    kicked: Vec::new(),
                    stomped: Vec::new(),
                    grab_calls: Vec::new(),
                    killed: false,
                    draw_calls: 0,
                    z_index: 0,
                })),
            }
        }

        /// Active and already stunned (steppable).
        pub fn stunned_at(x: i32, y: i32) -> Self {
            let stub = Self::at(x, y);
            stub.state.lock().unwrap().stunned = true;
            stub
        }

        /// Handle for assertions after the stub is boxed into the world.
        pub fn handle(&self) -> Arc<Mutex<StubState>> {
            Arc::clone(&self.state)
        }
    }

    impl Enemy for StubEnemy {
        fn is_active(&self) -> bool {
            self.state.lock().unwrap().active
        }

        fn position(&self) -> PixelVec2 {
            self.state.lock().unwrap().position
        }

        fn char_size(&self) -> CharSize {
            self.state.lock().unwrap().size
        }

        fn is_stunned(&self) -> bool {
            self.state.lock().unwrap().stunned
        }

        fn on_kicked(&mut self, direction: Direction, impulse: i32) -> HitStatus {
            let mut state = self.state.lock().unwrap();
            state.kicked.push((direction, impulse));
            state.kick_status
        }

        fn on_killed(&mut self) {
            let mut state = self.state.lock().unwrap();
            state.killed = true;
            state.active = false;
        }

        fn on_stomped(&mut self, direction: Direction) {
            let mut state = self.state.lock().unwrap();
            state.stomped.push(direction);
            state.stunned = true;
        }

        fn on_grabbed(&mut self, held: bool) {
            self.state.lock().unwrap().grab_calls.push(held);
        }

        fn set_position(&mut self, position: PixelVec2) {
            self.state.lock().unwrap().position = position;
        }

        fn draw_action(&mut self) {
            self.state.lock().unwrap().draw_calls += 1;
        }

        fn set_z_index(&mut self, z_index: i32) {
            self.state.lock().unwrap().z_index = z_index;
        }
    }
}
