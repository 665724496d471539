//! Stage Bounds
//!
//! The stage collaborator: ground line, optional ceiling, and the side
//! walls that clamp horizontal motion.

use serde::{Deserialize, Serialize};

/// Default right edge when no viewport is attached.
pub const DEFAULT_STAGE_WIDTH: i32 = 512;

/// Stage geometry, in pixels, y-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Ground height. Landing clamps the player here.
    pub ground: i32,
    /// Optional ceiling. `None` means open sky.
    pub ceiling: Option<i32>,
    /// Left wall
    pub left: i32,
    /// Right wall
    pub right: i32,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            ground: 0,
            ceiling: None,
            left: 0,
            right: DEFAULT_STAGE_WIDTH,
        }
    }
}

impl Stage {
    /// Stage with explicit side walls and open sky.
    pub fn with_bounds(left: i32, right: i32) -> Self {
        Self {
            left,
            right,
            ..Self::default()
        }
    }
}
