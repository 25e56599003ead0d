//! Regeneration policy for lane occupants
//!
//! Each spawn source names a lane and what to put on it. A timer gates every
//! source: it counts calls, and once the count exceeds the regeneration
//! threshold the timer resets and one occupant enters off-screen.

use serde::{Deserialize, Serialize};

use super::entity::{Direction, Motion, Platform, PlatformKind, Vehicle, VehicleKind};
use crate::assets::AssetResolver;
use crate::consts::*;
use crate::lane_y;

/// What a spawn source produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnKind {
    Vehicle(VehicleKind),
    Platform(PlatformKind),
}

impl SpawnKind {
    pub fn default_speed(&self) -> f32 {
        match self {
            SpawnKind::Vehicle(kind) => kind.default_speed(),
            SpawnKind::Platform(kind) => kind.default_speed(),
        }
    }
}

/// One configured call site of the spawner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnSource {
    pub lane: usize,
    pub length: u8,
    pub direction: Direction,
    pub kind: SpawnKind,
    /// Pixels per tick; the kind's default when absent
    #[serde(default)]
    pub speed: Option<f32>,
}

impl SpawnSource {
    pub fn new(lane: usize, length: u8, direction: Direction, kind: SpawnKind) -> Self {
        Self {
            lane,
            length,
            direction,
            kind,
            speed: None,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed.unwrap_or_else(|| self.kind.default_speed())
    }

    /// Standard layout: five water lanes, then four road lanes
    pub fn defaults() -> Vec<SpawnSource> {
        use Direction::{Left, Right};
        use SpawnKind::{Platform as P, Vehicle as V};
        vec![
            Self::new(LANE_WATER_FIFTH, 3, Left, P(PlatformKind::Log)),
            Self::new(LANE_WATER_FOURTH, 2, Right, P(PlatformKind::Turtle)),
            Self::new(LANE_WATER_THIRD, 3, Left, P(PlatformKind::Log)),
            Self::new(LANE_WATER_SECOND, 2, Right, P(PlatformKind::Turtle)),
            Self::new(LANE_WATER_FIRST, 3, Left, P(PlatformKind::Lily)),
            Self::new(LANE_ROAD_FIRST, 1, Right, V(VehicleKind::Car)),
            Self::new(LANE_ROAD_SECOND, 2, Left, V(VehicleKind::Car)),
            Self::new(LANE_ROAD_THIRD, 3, Right, V(VehicleKind::Car)),
            Self::new(LANE_ROAD_FOURTH, 2, Left, V(VehicleKind::Truck)),
        ]
    }
}

/// Counts calls since the last spawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub ticks_since_last_spawn: u32,
}

impl SpawnTimer {
    /// Count one call; true (and reset) once the count exceeds `threshold`
    pub fn advance(&mut self, threshold: u32) -> bool {
        self.ticks_since_last_spawn += 1;
        if self.ticks_since_last_spawn > threshold {
            self.ticks_since_last_spawn = 0;
            true
        } else {
            false
        }
    }
}

/// Which timer gates a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimerPolicy {
    /// Independent timer per source
    #[default]
    PerSource,
    /// One timer for all vehicle sources, one for all platform sources
    SharedPerKind,
}

/// A freshly spawned occupant
#[derive(Debug, Clone)]
pub enum Spawned {
    Vehicle(Vehicle),
    Platform(Platform),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    policy: TimerPolicy,
    threshold: u32,
    per_source: Vec<SpawnTimer>,
    vehicle_timer: SpawnTimer,
    platform_timer: SpawnTimer,
}

impl Spawner {
    pub fn new(policy: TimerPolicy, threshold: u32, source_count: usize) -> Self {
        Self {
            policy,
            threshold,
            per_source: vec![SpawnTimer::default(); source_count],
            vehicle_timer: SpawnTimer::default(),
            platform_timer: SpawnTimer::default(),
        }
    }

    pub fn policy(&self) -> TimerPolicy {
        self.policy
    }

    fn timer_mut(&mut self, source_index: usize, kind: &SpawnKind) -> &mut SpawnTimer {
        match (self.policy, kind) {
            (TimerPolicy::SharedPerKind, SpawnKind::Vehicle(_)) => &mut self.vehicle_timer,
            (TimerPolicy::SharedPerKind, SpawnKind::Platform(_)) => &mut self.platform_timer,
            (TimerPolicy::PerSource, _) => {
                if source_index >= self.per_source.len() {
                    self.per_source.resize(source_index + 1, SpawnTimer::default());
                }
                &mut self.per_source[source_index]
            }
        }
    }

    /// Count one call for `source`; build its occupant when the timer fires
    pub fn generate(
        &mut self,
        source_index: usize,
        source: &SpawnSource,
        id: impl FnOnce() -> u32,
        assets: &mut dyn AssetResolver,
    ) -> Option<Spawned> {
        let threshold = self.threshold;
        if !self.timer_mut(source_index, &source.kind).advance(threshold) {
            return None;
        }

        let motion = Motion::entering(
            lane_y(source.lane),
            source.length,
            source.direction,
            source.speed(),
        );
        let spawned = match source.kind {
            SpawnKind::Vehicle(kind) => Spawned::Vehicle(Vehicle::new(id(), kind, motion, assets)),
            SpawnKind::Platform(kind) => {
                Spawned::Platform(Platform::new(id(), kind, motion, assets))
            }
        };
        Some(spawned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteAtlas;
    use crate::sim::entity::MovingEntity;
    use proptest::prelude::*;

    fn spawn_frames(spawner: &mut Spawner, source: &SpawnSource, frames: u32) -> Vec<u32> {
        let mut atlas = SpriteAtlas::new();
        (1..=frames)
            .filter(|_| spawner.generate(0, source, || 1, &mut atlas).is_some())
            .collect()
    }

    #[test]
    fn test_timer_fires_after_exceeding_threshold() {
        let mut timer = SpawnTimer::default();
        for _ in 0..REGENERATION {
            assert!(!timer.advance(REGENERATION));
        }
        assert!(timer.advance(REGENERATION));
        assert_eq!(timer.ticks_since_last_spawn, 0);
    }

    #[test]
    fn test_cadence_is_regeneration_plus_one() {
        let source = SpawnSource::new(
            LANE_ROAD_FIRST,
            1,
            Direction::Right,
            SpawnKind::Vehicle(VehicleKind::Car),
        );
        let mut spawner = Spawner::new(TimerPolicy::PerSource, REGENERATION, 1);
        let frames = spawn_frames(&mut spawner, &source, 1000);
        let period = REGENERATION + 1;
        assert_eq!(frames, vec![period, 2 * period, 3 * period, 4 * period]);
    }

    #[test]
    fn test_spawn_positions_by_direction() {
        let mut atlas = SpriteAtlas::new();
        let mut spawner = Spawner::new(TimerPolicy::PerSource, 0, 2);
        let left = SpawnSource::new(
            LANE_ROAD_SECOND,
            2,
            Direction::Left,
            SpawnKind::Vehicle(VehicleKind::Car),
        );
        let right = SpawnSource::new(
            LANE_WATER_FOURTH,
            2,
            Direction::Right,
            SpawnKind::Platform(PlatformKind::Turtle),
        );

        match spawner.generate(0, &left, || 1, &mut atlas) {
            Some(Spawned::Vehicle(v)) => {
                assert_eq!(v.pos().x, GAME_WIDTH);
                assert_eq!(v.pos().y, lane_y(LANE_ROAD_SECOND));
                assert_eq!(v.motion.speed, VehicleKind::Car.default_speed());
            }
            other => panic!("expected a vehicle, got {other:?}"),
        }
        match spawner.generate(1, &right, || 2, &mut atlas) {
            Some(Spawned::Platform(p)) => {
                assert_eq!(p.pos().x, -100.0);
                assert_eq!(p.id, 2);
            }
            other => panic!("expected a platform, got {other:?}"),
        }
    }

    #[test]
    fn test_speed_override() {
        let mut source = SpawnSource::new(
            LANE_ROAD_FIRST,
            1,
            Direction::Right,
            SpawnKind::Vehicle(VehicleKind::Truck),
        );
        assert_eq!(source.speed(), 1.0);
        source.speed = Some(3.5);
        assert_eq!(source.speed(), 3.5);
    }

    #[test]
    fn test_shared_timer_round_robins_sources() {
        let car = SpawnSource::new(
            LANE_ROAD_FIRST,
            1,
            Direction::Right,
            SpawnKind::Vehicle(VehicleKind::Car),
        );
        let truck = SpawnSource::new(
            LANE_ROAD_FOURTH,
            2,
            Direction::Left,
            SpawnKind::Vehicle(VehicleKind::Truck),
        );
        let log = SpawnSource::new(
            LANE_WATER_FIFTH,
            3,
            Direction::Left,
            SpawnKind::Platform(PlatformKind::Log),
        );
        let mut spawner = Spawner::new(TimerPolicy::SharedPerKind, 2, 3);
        let mut atlas = SpriteAtlas::new();

        // Two vehicle call sites share one counter, so together they fire
        // every third call while the platform source keeps its own count.
        let mut fired = Vec::new();
        for frame in 0..3 {
            for (i, source) in [&car, &truck, &log].into_iter().enumerate() {
                if spawner.generate(i, source, || 0, &mut atlas).is_some() {
                    fired.push((frame, i));
                }
            }
        }
        assert_eq!(fired, vec![(1, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_defaults_match_layout() {
        let sources = SpawnSource::defaults();
        assert_eq!(sources.len(), 9);
        assert!(sources[..5].iter().all(|s| matches!(s.kind, SpawnKind::Platform(_))));
        assert!(sources[5..].iter().all(|s| matches!(s.kind, SpawnKind::Vehicle(_))));
        assert_eq!(sources[8].kind, SpawnKind::Vehicle(VehicleKind::Truck));
    }

    proptest! {
        #[test]
        fn per_source_cadence_never_drifts(threshold in 0u32..50, frames in 1u32..400) {
            let source = SpawnSource::new(
                LANE_ROAD_FIRST,
                1,
                Direction::Left,
                SpawnKind::Vehicle(VehicleKind::Car),
            );
            let mut spawner = Spawner::new(TimerPolicy::PerSource, threshold, 1);
            let spawned = spawn_frames(&mut spawner, &source, frames);
            prop_assert_eq!(spawned.len() as u32, frames / (threshold + 1));
            for pair in spawned.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], threshold + 1);
            }
        }
    }
}
