//! Overlap tests and player-vs-occupant interaction rules
//!
//! Everything on a lane shares the same y, so collision is a 1-D interval
//! test on the horizontal extents. What an overlap *means* depends on the
//! lane: fatal on a road, required on water.

use serde::{Deserialize, Serialize};

use super::entity::{MovingEntity, Platform, Vehicle};
use super::lane::LaneKind;

/// Half-open horizontal interval `[start, start + width)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub start: f32,
    pub width: f32,
}

impl Extent {
    pub fn new(start: f32, width: f32) -> Self {
        Self { start, width }
    }

    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.width
    }

    /// Touching edges do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Extent) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

/// Outcome of the player's lane for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Interaction {
    /// Safe ground, or a road lane with nothing overlapping
    None,
    /// Hit by a vehicle
    Squashed { vehicle_id: u32 },
    /// In the water with no support underneath
    Drowned,
    /// Carried along by a platform
    Riding { platform_id: u32, delta: f32 },
    /// Reached the goal lane
    ReachedGoal,
}

impl Interaction {
    /// Whether this outcome costs a life
    pub fn is_fatal(&self) -> bool {
        matches!(self, Interaction::Squashed { .. } | Interaction::Drowned)
    }
}

/// First non-removed vehicle on lane `y` overlapping `player`
pub fn vehicle_hit<'a>(player: &Extent, y: f32, vehicles: &'a [Vehicle]) -> Option<&'a Vehicle> {
    vehicles
        .iter()
        .filter(|v| !v.is_removed() && v.pos().y == y)
        .find(|v| v.extent().overlaps(player))
}

/// First non-removed platform on lane `y` under `player`
pub fn platform_support<'a>(
    player: &Extent,
    y: f32,
    platforms: &'a [Platform],
) -> Option<&'a Platform> {
    platforms
        .iter()
        .filter(|p| !p.is_removed() && p.pos().y == y)
        .find(|p| p.extent().overlaps(player))
}

/// Decide what happens to a player occupying `player` on a lane of `kind` at `y`
pub fn resolve(
    kind: LaneKind,
    player: &Extent,
    y: f32,
    vehicles: &[Vehicle],
    platforms: &[Platform],
) -> Interaction {
    match kind {
        LaneKind::Road => match vehicle_hit(player, y, vehicles) {
            Some(v) => Interaction::Squashed { vehicle_id: v.id },
            None => Interaction::None,
        },
        LaneKind::Water => match platform_support(player, y, platforms) {
            Some(p) => Interaction::Riding {
                platform_id: p.id,
                delta: p.motion.last_delta(),
            },
            None => Interaction::Drowned,
        },
        LaneKind::Win => Interaction::ReachedGoal,
        LaneKind::Grass | LaneKind::Start => Interaction::None,
    }
}
