//! World Registry
//!
//! Owns the stage, the enemy registry, and the per-tick event queue. The
//! registry hands out weak `EnemyId` handles; `BTreeMap` keys are
//! monotonic, so iteration order is registration order - which is also
//! the documented combat scan order.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::vec2::{CharSize, PixelVec2};

use super::enemy::{Enemy, EnemyId};
use super::events::{FrameEvent, FrameEventData};
use super::player::Player;
use super::pose::{Direction, Pose};
use super::stage::Stage;

/// Copied per-enemy data for hit-testing, so the resolver can look at one
/// enemy while mutating another.
#[derive(Clone, Copy, Debug)]
pub struct EnemyProbe {
    /// Bottom-left corner of the collision box
    pub position: PixelVec2,
    /// Collision box
    pub size: CharSize,
    /// Participates in hit-testing
    pub active: bool,
    /// Steppable/stunned state
    pub stunned: bool,
}

/// The game world the player core runs against.
pub struct World {
    /// Stage bounds
    pub stage: Stage,
    /// Current tick, stamped onto emitted events
    pub tick: u32,
    /// Set once damage has been taken
    pub game_over: bool,
    enemies: BTreeMap<EnemyId, Box<dyn Enemy>>,
    next_enemy_id: u32,
    pending_events: Vec<FrameEvent>,
    running: bool,
}

impl World {
    /// Create a world over a stage. Starts running.
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            tick: 0,
            game_over: false,
            enemies: BTreeMap::new(),
            next_enemy_id: 0,
            pending_events: Vec::new(),
            running: true,
        }
    }

    // =========================================================================
    // ENEMY REGISTRY
    // =========================================================================

    /// Register an enemy; the returned id fixes its scan position.
    pub fn add_enemy(&mut self, enemy: Box<dyn Enemy>) -> EnemyId {
        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        self.enemies.insert(id, enemy);
        debug!(id = id.0, "enemy registered");
        id
    }

    /// Registered ids in registration order.
    pub fn enemy_ids(&self) -> Vec<EnemyId> {
        self.enemies.keys().copied().collect()
    }

    /// Borrow an enemy.
    pub fn enemy(&self, id: EnemyId) -> Option<&dyn Enemy> {
        self.enemies.get(&id).map(|e| e.as_ref() as &dyn Enemy)
    }

    /// Mutably borrow an enemy.
    pub fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut (dyn Enemy + 'static)> {
        self.enemies.get_mut(&id).map(|e| e.as_mut())
    }

    /// Snapshot the queryable state of an enemy.
    pub fn probe(&self, id: EnemyId) -> Option<EnemyProbe> {
        self.enemies.get(&id).map(|e| EnemyProbe {
            position: e.position(),
            size: e.char_size(),
            active: e.is_active(),
            stunned: e.is_stunned(),
        })
    }

    // =========================================================================
    // HELD-ENEMY ANCHORING
    // =========================================================================

    /// Re-anchor the held enemy at the carry offset beside the player,
    /// layered behind, and forward its draw tick.
    pub fn carry_held(&mut self, player: &Player) {
        let Some(id) = player.held else { return };
        let offset_x = match player.direction {
            Direction::Right => player.size.width * 7 / 10,
            Direction::Left => -(player.size.width * 7) / 10,
        };
        let anchor = PixelVec2::new(
            player.position.x + offset_x,
            player.position.y + player.config.pixel_size,
        );
        let z = player.z_index - 1;
        if let Some(enemy) = self.enemy_mut(id) {
            enemy.set_z_index(z);
            enemy.set_position(anchor);
            enemy.draw_action();
        }
    }

    /// Place the held enemy directly on the player, layered in front.
    /// Used by the hold-idle pose.
    pub fn present_held(&mut self, player: &Player) {
        let Some(id) = player.held else { return };
        let position = player.position;
        let z = player.z_index + 1;
        if let Some(enemy) = self.enemy_mut(id) {
            enemy.set_z_index(z);
            enemy.set_position(position);
            enemy.draw_action();
        }
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Queue an event stamped with the current tick.
    pub fn push_event(&mut self, data: FrameEventData) {
        self.pending_events.push(FrameEvent::new(self.tick, data));
    }

    /// Queue a draw call for a pose.
    pub fn push_draw(&mut self, pose: Pose) {
        self.pending_events.push(FrameEvent::draw(self.tick, pose));
    }

    /// Queue a pre-built event.
    pub fn push(&mut self, event: FrameEvent) {
        self.pending_events.push(event);
    }

    /// Drain the events emitted this tick.
    pub fn take_events(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // =========================================================================
    // RUN CONTROL
    // =========================================================================

    /// Whether the tick loop should simulate.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Resume ticking.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Suspend ticking.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Pause-button semantics: flip between running and stopped.
    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        debug!(running = self.running, "pause toggled");
    }
}

// =============================================================================
// TESTS
// =============================================================================
