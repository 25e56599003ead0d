//! Game state and core simulation types

use serde::{Deserialize, Serialize};

use super::entity::{MovingEntity, Platform, Vehicle};
use super::lane::{Lane, LaneTable};
use super::player::Player;
use super::spawner::{SpawnKind, SpawnSource, Spawner};
use crate::assets::{AssetResolver, ImageHandle, SpriteId};
use crate::settings::Settings;

/// Current phase of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Frames advance normally
    Running,
    /// Out of lives; nothing ticks any more
    GameOver,
}

/// Something noteworthy that happened during a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, lane: usize, kind: SpawnKind },
    Squashed { vehicle_id: u32, lives_left: u8 },
    Drowned { lives_left: u8 },
    RoundComplete { crossings: u32 },
    GameOver { crossings: u32 },
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Frames simulated so far
    pub frame: u64,
    pub lanes: LaneTable,
    pub player: Player,
    pub player_image: ImageHandle,
    /// Live vehicles, in spawn order
    pub vehicles: Vec<Vehicle>,
    /// Live platforms, in spawn order
    pub platforms: Vec<Platform>,
    pub sources: Vec<SpawnSource>,
    pub spawner: Spawner,
    /// Times the player reached the goal lane
    pub crossings: u32,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(super) next_id: u32,
}

impl GameState {
    /// Build the lane table, spawn the player and enter `Running`
    pub fn new(settings: &Settings, assets: &mut dyn AssetResolver) -> Self {
        let lanes = LaneTable::build(assets);
        let player = Player::spawn(settings.starting_lives, settings.move_mode);
        let player_image = assets.create_image(SpriteId::Player);
        let sources = settings.spawn_sources.clone();
        let spawner = Spawner::new(settings.timer_policy, settings.regeneration, sources.len());

        log::info!(
            "Game initialized: {} lanes, {} spawn sources, {} lives",
            lanes.len(),
            sources.len(),
            player.lives()
        );

        Self {
            phase: GamePhase::Running,
            frame: 0,
            lanes,
            player,
            player_image,
            vehicles: Vec::new(),
            platforms: Vec::new(),
            sources,
            spawner,
            crossings: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Lane the player currently stands on
    pub fn player_lane(&self) -> Option<&Lane> {
        self.lanes.at_y(self.player.pos().y)
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
