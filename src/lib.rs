//! Froggr - a lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (lanes, occupants, player, spawning)
//! - `renderer`: Draw records and the presenter seam
//! - `assets`: Sprite identifiers and image handle resolution
//! - `game_loop`: Frame pacing, surface gating and cooperative stop
//! - `settings`: Data-driven configuration

pub mod assets;
pub mod game_loop;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game_loop::{GameLoop, LoopExit, Pacing, StopHandle};
pub use settings::{Settings, SettingsError};

use std::time::Duration;

/// Game configuration constants
pub mod consts {
    use super::Duration;

    /// Playfield dimensions in pixels
    pub const GAME_WIDTH: f32 = 500.0;
    pub const GAME_HEIGHT: f32 = 700.0;

    /// Lane geometry
    pub const LANE_HEIGHT: f32 = 50.0;
    pub const NUMBER_OF_LANES: usize = 13;
    /// Width of one horizontal cell; occupant lengths are measured in cells
    pub const CELL_SIZE: f32 = 50.0;

    /// Lane indices, top (goal) to bottom (start)
    pub const LANE_WIN: usize = 0;
    pub const LANE_WATER_FIFTH: usize = 1;
    pub const LANE_WATER_FOURTH: usize = 2;
    pub const LANE_WATER_THIRD: usize = 3;
    pub const LANE_WATER_SECOND: usize = 4;
    pub const LANE_WATER_FIRST: usize = 5;
    pub const LANE_GRASS_FIRST: usize = 6;
    pub const LANE_GRASS_SECOND: usize = 7;
    pub const LANE_ROAD_FOURTH: usize = 8;
    pub const LANE_ROAD_THIRD: usize = 9;
    pub const LANE_ROAD_SECOND: usize = 10;
    pub const LANE_ROAD_FIRST: usize = 11;
    pub const LANE_START: usize = 12;

    /// Ticks a spawn timer must exceed before a new occupant appears
    pub const REGENERATION: u32 = 225;

    /// One simulation step; also the sleep after each present in fixed-delay pacing
    pub const FRAME_DELAY: Duration = Duration::from_millis(20);
    /// Maximum catch-up steps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player defaults
    pub const STARTING_LIVES: u8 = 3;
    pub const PLAYER_START_X: f32 = 250.0;
    pub const PLAYER_START_Y: f32 = GAME_HEIGHT - 2.0 * LANE_HEIGHT;
    /// Frames between repeated steps while a key is held (held-key mode only)
    pub const HELD_REPEAT_FRAMES: u32 = 8;
}

/// Pixel y of the lane with the given index
#[inline]
pub fn lane_y(index: usize) -> f32 {
    index as f32 * consts::LANE_HEIGHT
}

/// Pixel width of an occupant `length_cells` long
#[inline]
pub fn cells_to_px(length_cells: u8) -> f32 {
    f32::from(length_cells) * consts::CELL_SIZE
}
