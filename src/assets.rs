//! Sprite identifiers and image handle resolution
//!
//! The simulation never touches image bytes. Each lane and entity stores a
//! [`SpriteId`] plus the [`ImageHandle`] an [`AssetResolver`] handed back for
//! it when the entity was constructed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sim::entity::{Direction, PlatformKind, VehicleKind};
use crate::sim::lane::LaneSprite;

/// Opaque handle to a renderable image owned by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u32);

/// Logical sprite identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Lane(LaneSprite),
    Player,
    Vehicle {
        kind: VehicleKind,
        length: u8,
        direction: Direction,
    },
    Platform {
        kind: PlatformKind,
        length: u8,
    },
}

impl SpriteId {
    /// Asset path relative to the game's resource root
    pub fn path(&self) -> String {
        match self {
            SpriteId::Lane(lane) => format!("res/sprites/lane/{}", lane.file_name()),
            SpriteId::Player => "res/sprites/player/frog.png".to_string(),
            SpriteId::Vehicle {
                kind,
                length,
                direction,
            } => format!(
                "res/sprites/vehicle/{}-{}-{}.png",
                kind.as_str(),
                length,
                direction.as_str()
            ),
            SpriteId::Platform { kind, length } => {
                format!("res/sprites/platform/{}-{}.png", kind.as_str(), length)
            }
        }
    }
}

/// Maps sprite identifiers to image handles (the `createImage` seam)
pub trait AssetResolver {
    fn create_image(&mut self, sprite: SpriteId) -> ImageHandle;
}

/// Interning resolver: one handle per distinct sprite, in first-use order
#[derive(Debug, Default)]
pub struct SpriteAtlas {
    handles: HashMap<SpriteId, ImageHandle>,
    sprites: Vec<SpriteId>,
}

impl SpriteAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sprite behind a handle, if this atlas issued it
    pub fn sprite(&self, handle: ImageHandle) -> Option<SpriteId> {
        self.sprites.get(handle.0 as usize).copied()
    }

    /// Asset path behind a handle, for loaders that decode lazily
    pub fn path(&self, handle: ImageHandle) -> Option<String> {
        self.sprite(handle).map(|s| s.path())
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl AssetResolver for SpriteAtlas {
    fn create_image(&mut self, sprite: SpriteId) -> ImageHandle {
        if let Some(&handle) = self.handles.get(&sprite) {
            return handle;
        }
        let handle = ImageHandle(self.sprites.len() as u32);
        self.sprites.push(sprite);
        self.handles.insert(sprite, handle);
        log::debug!("Registered sprite {} as {:?}", sprite.path(), handle);
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_interns_sprites() {
        let mut atlas = SpriteAtlas::new();
        let a = atlas.create_image(SpriteId::Player);
        let b = atlas.create_image(SpriteId::Lane(LaneSprite::Water));
        let c = atlas.create_image(SpriteId::Player);

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(atlas.len(), 2);
        assert_eq!(atlas.sprite(b), Some(SpriteId::Lane(LaneSprite::Water)));
        assert_eq!(atlas.sprite(ImageHandle(99)), None);
    }

    #[test]
    fn test_sprite_paths() {
        assert_eq!(
            SpriteId::Lane(LaneSprite::Win).path(),
            "res/sprites/lane/win.png"
        );
        assert_eq!(
            SpriteId::Vehicle {
                kind: VehicleKind::Truck,
                length: 2,
                direction: Direction::Left,
            }
            .path(),
            "res/sprites/vehicle/truck-2-left.png"
        );
        assert_eq!(
            SpriteId::Platform {
                kind: PlatformKind::Turtle,
                length: 2,
            }
            .path(),
            "res/sprites/platform/turtle-2.png"
        );
    }
}
