//! Game settings
//!
//! Defaults give the standard game. A JSON file can override any field;
//! missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::game_loop::Pacing;
use crate::sim::input::MoveMode;
use crate::sim::lane::{self, LaneKind};
use crate::sim::spawner::{SpawnKind, SpawnSource, TimerPolicy};

/// Errors raised while loading or validating settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lives the player starts with
    pub starting_lives: u8,
    /// Edge-triggered or held-key movement
    pub move_mode: MoveMode,
    /// Ticks a spawn timer must exceed before firing
    pub regeneration: u32,
    /// Independent or shared spawn timers
    pub timer_policy: TimerPolicy,
    /// Frame pacing strategy
    pub pacing: Pacing,
    /// Length of one simulation step in milliseconds
    pub frame_delay_ms: u64,
    /// Catch-up steps allowed per frame (accumulator pacing)
    pub max_substeps: u32,
    /// Occupant call sites, evaluated in order each frame
    pub spawn_sources: Vec<SpawnSource>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            move_mode: MoveMode::Edge,
            regeneration: REGENERATION,
            timer_policy: TimerPolicy::PerSource,
            pacing: Pacing::Accumulator,
            frame_delay_ms: FRAME_DELAY.as_millis() as u64,
            max_substeps: MAX_SUBSTEPS,
            spawn_sources: SpawnSource::defaults(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a JSON settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.starting_lives == 0 {
            return Err(SettingsError::Invalid("starting_lives must be at least 1".into()));
        }
        if self.regeneration == 0 {
            return Err(SettingsError::Invalid("regeneration must be at least 1".into()));
        }
        if self.frame_delay_ms == 0 {
            return Err(SettingsError::Invalid("frame_delay_ms must be at least 1".into()));
        }
        if let MoveMode::Held { repeat_frames: 0 } = self.move_mode {
            return Err(SettingsError::Invalid("held repeat_frames must be at least 1".into()));
        }

        for (i, source) in self.spawn_sources.iter().enumerate() {
            if !(1..=3).contains(&source.length) {
                return Err(SettingsError::Invalid(format!(
                    "spawn source {i}: length {} outside 1..=3",
                    source.length
                )));
            }
            if let Some(speed) = source.speed {
                if !(speed.is_finite() && speed > 0.0) {
                    return Err(SettingsError::Invalid(format!(
                        "spawn source {i}: speed must be positive"
                    )));
                }
            }
            let Some(lane) = lane::kind_at(source.lane) else {
                return Err(SettingsError::Invalid(format!(
                    "spawn source {i}: no lane {}",
                    source.lane
                )));
            };
            let fits = matches!(
                (source.kind, lane),
                (SpawnKind::Vehicle(_), LaneKind::Road) | (SpawnKind::Platform(_), LaneKind::Water)
            );
            if !fits {
                return Err(SettingsError::Invalid(format!(
                    "spawn source {i}: {:?} cannot occupy a {:?} lane",
                    source.kind, lane
                )));
            }
        }
        Ok(())
    }

    pub fn frame_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.frame_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Direction, PlatformKind, VehicleKind};

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.starting_lives, 3);
        assert_eq!(settings.regeneration, 225);
        assert_eq!(settings.frame_delay_ms, 20);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "starting_lives": 5 }"#).unwrap();
        assert_eq!(settings.starting_lives, 5);
        assert_eq!(settings.regeneration, REGENERATION);
        assert_eq!(settings.spawn_sources.len(), 9);
    }

    #[test]
    fn test_json_round_trip_keeps_options() {
        let settings = Settings {
            move_mode: MoveMode::Held { repeat_frames: 6 },
            timer_policy: TimerPolicy::SharedPerKind,
            pacing: Pacing::FixedDelay,
            ..Settings::default()
        };
        let parsed = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(parsed.move_mode, MoveMode::Held { repeat_frames: 6 });
        assert_eq!(parsed.timer_policy, TimerPolicy::SharedPerKind);
        assert_eq!(parsed.pacing, Pacing::FixedDelay);
        assert_eq!(parsed.spawn_sources, settings.spawn_sources);
    }

    #[test]
    fn test_rejects_zero_lives() {
        let err = Settings::from_json(r#"{ "starting_lives": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_mismatched_lane() {
        let mut settings = Settings::default();
        settings.spawn_sources = vec![SpawnSource::new(
            LANE_WATER_FIRST,
            2,
            Direction::Left,
            SpawnKind::Vehicle(VehicleKind::Car),
        )];
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));

        settings.spawn_sources = vec![SpawnSource::new(
            LANE_ROAD_FIRST,
            2,
            Direction::Left,
            SpawnKind::Platform(PlatformKind::Log),
        )];
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_length_and_lane() {
        let mut settings = Settings::default();
        settings.spawn_sources[0].length = 4;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.spawn_sources[0].lane = 40;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/nonexistent/froggr-settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
