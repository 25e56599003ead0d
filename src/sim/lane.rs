//! Static lanes of the playfield

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::{AssetResolver, ImageHandle, SpriteId};
use crate::consts::*;
use crate::lane_y;

/// Lane category; decides which interaction rule applies to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneKind {
    Win,
    Water,
    Grass,
    Road,
    Start,
}

/// Lane artwork variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneSprite {
    Win,
    Water,
    Grass,
    RoadTop,
    RoadMiddle,
    RoadBottom,
}

impl LaneSprite {
    pub fn file_name(&self) -> &'static str {
        match self {
            LaneSprite::Win => "win.png",
            LaneSprite::Water => "water.gif",
            LaneSprite::Grass => "grass.png",
            LaneSprite::RoadTop => "road-top.png",
            LaneSprite::RoadMiddle => "road-middle.png",
            LaneSprite::RoadBottom => "road-bottom.png",
        }
    }
}

/// A horizontal strip of the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lane {
    index: usize,
    kind: LaneKind,
    sprite: LaneSprite,
    image: ImageHandle,
}

impl Lane {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> LaneKind {
        self.kind
    }

    pub fn sprite(&self) -> LaneSprite {
        self.sprite
    }

    pub fn image(&self) -> ImageHandle {
        self.image
    }

    /// Top-left corner; lanes always start at x = 0
    pub fn pos(&self) -> Vec2 {
        Vec2::new(0.0, self.y())
    }

    pub fn y(&self) -> f32 {
        lane_y(self.index)
    }
}

/// Category and artwork for the lane at `index`
fn layout(index: usize) -> Option<(LaneKind, LaneSprite)> {
    let entry = match index {
        LANE_WIN => (LaneKind::Win, LaneSprite::Win),
        LANE_WATER_FIFTH..=LANE_WATER_FIRST => (LaneKind::Water, LaneSprite::Water),
        LANE_GRASS_FIRST | LANE_GRASS_SECOND => (LaneKind::Grass, LaneSprite::Grass),
        LANE_ROAD_FOURTH => (LaneKind::Road, LaneSprite::RoadTop),
        LANE_ROAD_THIRD | LANE_ROAD_SECOND => (LaneKind::Road, LaneSprite::RoadMiddle),
        LANE_ROAD_FIRST => (LaneKind::Road, LaneSprite::RoadBottom),
        LANE_START => (LaneKind::Start, LaneSprite::Grass),
        _ => return None,
    };
    Some(entry)
}

/// Category of the lane at `index`, if the field has one
pub fn kind_at(index: usize) -> Option<LaneKind> {
    layout(index).map(|(kind, _)| kind)
}

/// The fixed table of all lanes, indexed top to bottom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneTable {
    lanes: Vec<Lane>,
}

impl LaneTable {
    /// Build all lanes and resolve their images
    pub fn build(assets: &mut dyn AssetResolver) -> Self {
        let lanes = (0..NUMBER_OF_LANES)
            .filter_map(|index| {
                let (kind, sprite) = layout(index)?;
                Some(Lane {
                    index,
                    kind,
                    sprite,
                    image: assets.create_image(SpriteId::Lane(sprite)),
                })
            })
            .collect();
        Self { lanes }
    }

    pub fn get(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    /// Lane whose top edge is exactly `y`
    pub fn at_y(&self, y: f32) -> Option<&Lane> {
        if y < 0.0 || y.fract() != 0.0 {
            return None;
        }
        let index = (y / LANE_HEIGHT) as usize;
        self.lanes.get(index).filter(|lane| lane.y() == y)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.iter()
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}
