//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Fixed spawn cadence, no randomness
//! - Stable iteration order (spawn order within each collection)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod input;
pub mod lane;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Extent, Interaction};
pub use entity::{Direction, MovingEntity, Platform, PlatformKind, Vehicle, VehicleKind};
pub use input::{InputSnapshot, InputSource, Key, KeyState, MoveMode, ScriptedInput};
pub use lane::{LaneKind, LaneTable};
pub use player::{Facing, Player};
pub use spawner::{SpawnKind, SpawnSource, TimerPolicy};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::tick;
