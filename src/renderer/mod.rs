//! Frame output
//!
//! The simulation never draws. Each frame it emits an ordered list of
//! [`DrawRecord`]s (lanes, platforms, player, vehicles) and hands it to a
//! [`Presenter`], which owns the actual surface.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::{ImageHandle, SpriteId};
use crate::sim::entity::MovingEntity;
use crate::sim::player::Facing;
use crate::sim::GameState;

/// One positioned, oriented image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub sprite: SpriteId,
    pub image: ImageHandle,
    /// Top-left corner in pixels
    pub pos: Vec2,
    pub facing: Facing,
}

/// Errors a presenter can report for one frame
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresentError {
    /// Surface was lost and must be recreated
    #[error("presentation surface lost")]
    Lost,
    #[error("present failed: {0}")]
    Other(String),
}

/// The presentation side of the game loop
pub trait Presenter {
    /// Whether there is a surface to draw on this frame
    fn is_ready(&mut self) -> bool;

    /// Show one frame
    fn present(&mut self, frame: &[DrawRecord]) -> Result<(), PresentError>;
}

/// Build this frame's draw list in layering order
pub fn build_frame(state: &GameState) -> Vec<DrawRecord> {
    let mut frame =
        Vec::with_capacity(state.lanes.len() + state.platforms.len() + state.vehicles.len() + 1);

    frame.extend(state.lanes.iter().map(|lane| DrawRecord {
        sprite: SpriteId::Lane(lane.sprite()),
        image: lane.image(),
        pos: lane.pos(),
        facing: Facing::Up,
    }));

    frame.extend(
        state
            .platforms
            .iter()
            .filter(|p| !p.is_removed())
            .map(|p| DrawRecord {
                sprite: p.sprite(),
                image: p.image,
                pos: p.pos(),
                facing: p.motion.direction.into(),
            }),
    );

    frame.push(DrawRecord {
        sprite: SpriteId::Player,
        image: state.player_image,
        pos: state.player.pos(),
        facing: state.player.facing(),
    });

    // Vehicles last so they cover the player
    frame.extend(
        state
            .vehicles
            .iter()
            .filter(|v| !v.is_removed())
            .map(|v| DrawRecord {
                sprite: v.sprite(),
                image: v.image,
                pos: v.pos(),
                facing: v.motion.direction.into(),
            }),
    );

    frame
}

/// Presenter with no surface: logs a frame summary at debug level
#[derive(Debug, Default)]
pub struct LogPresenter {
    frames: u64,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Presenter for LogPresenter {
    fn is_ready(&mut self) -> bool {
        true
    }

    fn present(&mut self, frame: &[DrawRecord]) -> Result<(), PresentError> {
        self.frames += 1;
        if let Some(player) = frame.iter().find(|r| r.sprite == SpriteId::Player) {
            log::debug!(
                "Frame {}: {} draws, player at ({}, {})",
                self.frames,
                frame.len(),
                player.pos.x,
                player.pos.y
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteAtlas;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::input::InputSnapshot;
    use crate::sim::tick;

    fn layer(record: &DrawRecord) -> u8 {
        match record.sprite {
            SpriteId::Lane(_) => 0,
            SpriteId::Platform { .. } => 1,
            SpriteId::Player => 2,
            SpriteId::Vehicle { .. } => 3,
        }
    }

    #[test]
    fn test_frame_layer_order() {
        let mut atlas = SpriteAtlas::new();
        let mut state = GameState::new(&Settings::default(), &mut atlas);
        for _ in 0..300 {
            tick(&mut state, &InputSnapshot::empty(), &mut atlas);
        }
        assert!(!state.vehicles.is_empty());
        assert!(!state.platforms.is_empty());

        let frame = build_frame(&state);
        assert_eq!(
            frame.len(),
            NUMBER_OF_LANES + state.platforms.len() + 1 + state.vehicles.len()
        );
        let layers: Vec<u8> = frame.iter().map(layer).collect();
        assert!(layers.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(layers.iter().filter(|&&l| l == 2).count(), 1);
    }

    #[test]
    fn test_frame_images_match_atlas() {
        let mut atlas = SpriteAtlas::new();
        let mut state = GameState::new(&Settings::default(), &mut atlas);
        for _ in 0..250 {
            tick(&mut state, &InputSnapshot::empty(), &mut atlas);
        }
        for record in build_frame(&state) {
            assert_eq!(atlas.sprite(record.image), Some(record.sprite));
        }
    }

    #[test]
    fn test_vehicle_absent_after_crossing() {
        let mut atlas = SpriteAtlas::new();
        let settings = Settings {
            spawn_sources: Vec::new(),
            ..Settings::default()
        };
        let mut state = GameState::new(&settings, &mut atlas);
        let id = state.next_entity_id();
        let motion = crate::sim::entity::Motion::entering(
            crate::lane_y(LANE_ROAD_THIRD),
            3,
            crate::sim::entity::Direction::Right,
            2.0,
        );
        state.vehicles.push(crate::sim::entity::Vehicle::new(
            id,
            crate::sim::entity::VehicleKind::Car,
            motion,
            &mut atlas,
        ));

        let has_vehicle = |frame: &[DrawRecord]| {
            frame
                .iter()
                .any(|r| matches!(r.sprite, SpriteId::Vehicle { .. }))
        };

        // -150 to 500 at 2 px/tick is 325 ticks; one more pushes it past the edge
        for _ in 0..325 {
            tick(&mut state, &InputSnapshot::empty(), &mut atlas);
        }
        assert!(has_vehicle(&build_frame(&state)));

        tick(&mut state, &InputSnapshot::empty(), &mut atlas);
        assert!(!has_vehicle(&build_frame(&state)));
    }

    #[test]
    fn test_log_presenter_counts_frames() {
        let mut presenter = LogPresenter::new();
        assert!(presenter.is_ready());
        presenter.present(&[]).unwrap();
        presenter.present(&[]).unwrap();
        assert_eq!(presenter.frames(), 2);
    }
}
