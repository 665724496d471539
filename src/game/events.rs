//! Frame Events
//!
//! Everything the core emits toward the outside world each tick: the draw
//! call for the selected pose, visual effects, score awards, and lifecycle
//! notifications. Sinks are fire-and-forget; the queue is drained once per
//! tick.

use serde::{Deserialize, Serialize};

use crate::core::vec2::PixelVec2;

use super::pose::{Direction, Pose, Vertical};

/// Event payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameEventData {
    /// Render the player with the given frame.
    Draw {
        /// Sprite sheet frame index
        pose: u8,
        /// Optional palette override
        palette: Option<u8>,
        /// Displayed facing
        direction: Direction,
        /// Vertical orientation
        vertical: Vertical,
        /// Whether the sprite is visible this frame
        visible: bool,
    },
    /// Score popup at a defeated enemy, carrying the combo streak.
    PointEffect {
        /// Effect position
        position: PixelVec2,
        /// Streak value at the time of the award
        streak: u32,
    },
    /// Special-attack flash.
    SpecialEffect {
        /// Effect position
        position: PixelVec2,
    },
    /// Stomp star burst.
    StarEffect {
        /// Effect position
        position: PixelVec2,
    },
    /// Skid dust while braking.
    SlipEffect {
        /// Effect position
        position: PixelVec2,
    },
    /// Points credited to the player.
    ScoreAwarded {
        /// Points added this event
        amount: u32,
        /// Running total
        total: u32,
    },
    /// The player bumped the ceiling while ascending; whatever sits above
    /// should react.
    PushedUp,
    /// Damage taken; the death sequence begins.
    GameOver,
    /// The death sequence completed and the player entity is gone.
    Destroyed,
    /// The goal sequence ran.
    GoalReached,
}

/// A tick-stamped event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameEvent {
    /// Tick when the event was emitted
    pub tick: u32,
    /// Payload
    pub data: FrameEventData,
}

impl FrameEvent {
    /// Create an event.
    pub fn new(tick: u32, data: FrameEventData) -> Self {
        Self { tick, data }
    }

    /// Draw call for a pose, upright and visible, no palette override.
    pub fn draw(tick: u32, pose: Pose) -> Self {
        Self::new(
            tick,
            FrameEventData::Draw {
                pose: pose.index,
                palette: None,
                direction: pose.direction,
                vertical: Vertical::Up,
                visible: true,
            },
        )
    }

    /// Point popup.
    pub fn point_effect(tick: u32, position: PixelVec2, streak: u32) -> Self {
        Self::new(tick, FrameEventData::PointEffect { position, streak })
    }

    /// Special-attack flash.
    pub fn special_effect(tick: u32, position: PixelVec2) -> Self {
        Self::new(tick, FrameEventData::SpecialEffect { position })
    }

    /// Stomp star burst.
    pub fn star_effect(tick: u32, position: PixelVec2) -> Self {
        Self::new(tick, FrameEventData::StarEffect { position })
    }

    /// Skid dust.
    pub fn slip_effect(tick: u32, position: PixelVec2) -> Self {
        Self::new(tick, FrameEventData::SlipEffect { position })
    }

    /// Score credit.
    pub fn score(tick: u32, amount: u32, total: u32) -> Self {
        Self::new(tick, FrameEventData::ScoreAwarded { amount, total })
    }
}
