//! # Overworld Player-Control Core
//!
//! Deterministic control core for the player character of a 2D
//! platformer: per-tick input edges plus enemy positions in; motion,
//! combat outcomes, scoring and animation poses out.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      OVERWORLD CORE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── vec2.rs     - Integer pixel geometry + AABB overlap     │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Simulation (deterministic)                │
//! │  ├── input.rs    - Intent/stance input state machine         │
//! │  ├── pose.rs     - Frame indices and facing                  │
//! │  ├── player.rs   - Player state + tuning surface             │
//! │  ├── run.rs      - Horizontal physics + ground poses         │
//! │  ├── jump.rs     - Vertical physics + airborne poses         │
//! │  ├── combat.rs   - Stomp/kick/grab/damage resolution         │
//! │  ├── world.rs    - Enemy registry + event queue              │
//! │  └── tick.rs     - Per-tick orchestration + replay           │
//! │                                                              │
//! │  runtime/        - Real-time driver (non-deterministic)      │
//! │  └── mod.rs      - Tokio interval loop, channels, shutdown   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are 100% deterministic:
//! - Integer pixel arithmetic only, no floats
//! - `BTreeMap` registries, so iteration order is registration order
//! - No wall-clock timers: pauses and the death countdown are tick
//!   counters inside the player's phase state
//!
//! Given the same input script, a run replays to an identical state hash
//! on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod runtime;

// Re-export commonly used types
pub use crate::core::hash::{compute_state_hash, StateHash, StateHasher};
pub use crate::core::vec2::{boxes_overlap, CharSize, PixelVec2};
pub use game::combat::HitStatus;
pub use game::enemy::{Enemy, EnemyId};
pub use game::events::{FrameEvent, FrameEventData};
pub use game::input::{InputCommand, InputState, MovementIntent, Stance};
pub use game::player::{Player, PlayerConfig, PlayerPhase};
pub use game::pose::{Direction, Pose, Vertical};
pub use game::stage::Stage;
pub use game::tick::{goal, run_script, tick, TickResult};
pub use game::world::World;
pub use runtime::{Driver, DriverError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tick period in milliseconds (~22 Hz)
pub const FRAME_INTERVAL_MS: u64 = 45;
