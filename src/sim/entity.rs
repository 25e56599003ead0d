//! Moving entities: shared motion component and the lane occupants
//!
//! Vehicles and platforms are the same shape: a [`Motion`] plus a kind tag
//! and the image resolved when they were spawned. The player implements the
//! same [`MovingEntity`] contract in `player.rs`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Extent;
use super::input::InputSnapshot;
use crate::assets::{AssetResolver, ImageHandle, SpriteId};
use crate::cells_to_px;
use crate::consts::*;

/// Horizontal direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Sign of the per-tick displacement
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Off-screen x where an occupant travelling this way enters the field
    pub fn spawn_x(&self, length_cells: u8) -> f32 {
        match self {
            Direction::Left => GAME_WIDTH,
            Direction::Right => -cells_to_px(length_cells),
        }
    }
}

/// Position, extent and autonomous horizontal motion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Motion {
    pub pos: Vec2,
    pub length_cells: u8,
    pub direction: Direction,
    /// Pixels per tick
    pub speed: f32,
    removed: bool,
    /// Displacement applied by the most recent tick
    last_delta: f32,
}

impl Motion {
    pub fn new(pos: Vec2, length_cells: u8, direction: Direction, speed: f32) -> Self {
        Self {
            pos,
            length_cells,
            direction,
            speed,
            removed: false,
            last_delta: 0.0,
        }
    }

    /// Motion for an occupant entering on the edge its direction implies
    pub fn entering(lane_y: f32, length_cells: u8, direction: Direction, speed: f32) -> Self {
        let pos = Vec2::new(direction.spawn_x(length_cells), lane_y);
        Self::new(pos, length_cells, direction, speed)
    }

    pub fn width(&self) -> f32 {
        cells_to_px(self.length_cells)
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.pos.x, self.width())
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn last_delta(&self) -> f32 {
        self.last_delta
    }

    /// Move one tick and flag removal once fully past the far edge
    pub fn advance(&mut self) {
        if self.removed {
            self.last_delta = 0.0;
            return;
        }
        self.last_delta = self.direction.sign() * self.speed;
        self.pos.x += self.last_delta;

        let gone = match self.direction {
            Direction::Left => self.pos.x + self.width() < 0.0,
            Direction::Right => self.pos.x > GAME_WIDTH,
        };
        if gone {
            self.removed = true;
        }
    }
}

/// Shared contract for everything that moves across the field
pub trait MovingEntity {
    fn motion(&self) -> &Motion;

    /// Advance one frame
    fn tick(&mut self, input: &InputSnapshot);

    fn pos(&self) -> Vec2 {
        self.motion().pos
    }

    fn extent(&self) -> Extent {
        self.motion().extent()
    }

    fn is_removed(&self) -> bool {
        self.motion().is_removed()
    }
}

/// Road hazards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    Car,
    Truck,
}

impl VehicleKind {
    pub fn default_speed(&self) -> f32 {
        match self {
            VehicleKind::Car => 2.0,
            VehicleKind::Truck => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleKind::Car => "car",
            VehicleKind::Truck => "truck",
        }
    }
}

/// Water supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformKind {
    Log,
    Turtle,
    Lily,
}

impl PlatformKind {
    pub fn default_speed(&self) -> f32 {
        match self {
            PlatformKind::Log => 1.0,
            PlatformKind::Turtle => 2.0,
            PlatformKind::Lily => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformKind::Log => "log",
            PlatformKind::Turtle => "turtle",
            PlatformKind::Lily => "lily",
        }
    }
}

/// Kind tag for lane occupants
pub trait OccupantKind: Copy {
    fn sprite(&self, length_cells: u8, direction: Direction) -> SpriteId;
}

impl OccupantKind for VehicleKind {
    fn sprite(&self, length_cells: u8, direction: Direction) -> SpriteId {
        SpriteId::Vehicle {
            kind: *self,
            length: length_cells,
            direction,
        }
    }
}

impl OccupantKind for PlatformKind {
    fn sprite(&self, length_cells: u8, _direction: Direction) -> SpriteId {
        SpriteId::Platform {
            kind: *self,
            length: length_cells,
        }
    }
}

/// A transient lane occupant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Occupant<K> {
    pub id: u32,
    pub kind: K,
    pub motion: Motion,
    pub image: ImageHandle,
}

pub type Vehicle = Occupant<VehicleKind>;
pub type Platform = Occupant<PlatformKind>;

impl<K: OccupantKind> Occupant<K> {
    /// Build an occupant from its motion, resolving the image once
    pub fn new(id: u32, kind: K, motion: Motion, assets: &mut dyn AssetResolver) -> Self {
        let image = assets.create_image(kind.sprite(motion.length_cells, motion.direction));
        Self {
            id,
            kind,
            motion,
            image,
        }
    }

    pub fn sprite(&self) -> SpriteId {
        self.kind.sprite(self.motion.length_cells, self.motion.direction)
    }
}

impl<K> MovingEntity for Occupant<K> {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    // Occupants move on their own; input is ignored
    fn tick(&mut self, _input: &InputSnapshot) {
        self.motion.advance();
    }
}
