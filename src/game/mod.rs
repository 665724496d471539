//! Game logic: the deterministic player-control core.
//!
//! Everything in this module is a pure function of the player/world state
//! and the input edges - no clocks, no floats, no randomness.

pub mod combat;
pub mod enemy;
pub mod events;
pub mod input;
pub mod jump;
pub mod player;
pub mod pose;
pub mod run;
pub mod stage;
pub mod tick;
pub mod world;
