//! Per-frame simulation step
//!
//! Order within a frame: spawn pass, tick the player and every occupant,
//! resolve the player's lane, then cull removed occupants.

use super::collision::{self, Interaction};
use super::entity::MovingEntity;
use super::input::InputSnapshot;
use super::spawner::Spawned;
use super::state::{GameEvent, GamePhase, GameState};
use crate::assets::AssetResolver;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &InputSnapshot, assets: &mut dyn AssetResolver) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.frame += 1;

    spawn_pass(state, assets);

    state.player.tick(input);
    for platform in &mut state.platforms {
        platform.tick(input);
    }
    for vehicle in &mut state.vehicles {
        vehicle.tick(input);
    }

    resolve_player(state);
    cull_removed(state);
}

/// Give every spawn source one chance to produce an occupant
fn spawn_pass(state: &mut GameState, assets: &mut dyn AssetResolver) {
    let GameState {
        sources,
        spawner,
        vehicles,
        platforms,
        events,
        next_id,
        ..
    } = state;

    for (index, source) in sources.iter().enumerate() {
        let id = || {
            let id = *next_id;
            *next_id += 1;
            id
        };
        let Some(spawned) = spawner.generate(index, source, id, assets) else {
            continue;
        };
        let id = match spawned {
            Spawned::Vehicle(vehicle) => {
                let id = vehicle.id;
                vehicles.push(vehicle);
                id
            }
            Spawned::Platform(platform) => {
                let id = platform.id;
                platforms.push(platform);
                id
            }
        };
        log::debug!("Spawned {:?} #{} on lane {}", source.kind, id, source.lane);
        events.push(GameEvent::Spawned {
            id,
            lane: source.lane,
            kind: source.kind,
        });
    }
}

/// Apply the rule of the player's current lane
fn resolve_player(state: &mut GameState) {
    let Some(lane) = state.player_lane() else {
        log::warn!("Player at {:?} is not on a lane", state.player.pos());
        return;
    };

    let interaction = collision::resolve(
        lane.kind(),
        &state.player.extent(),
        lane.y(),
        &state.vehicles,
        &state.platforms,
    );

    match interaction {
        Interaction::None => {}
        Interaction::Riding { delta, .. } => state.player.ride(delta),
        Interaction::Squashed { vehicle_id } => {
            let lives_left = state.player.lose_life();
            log::info!("Squashed by vehicle #{vehicle_id}, {lives_left} lives left");
            state.events.push(GameEvent::Squashed {
                vehicle_id,
                lives_left,
            });
        }
        Interaction::Drowned => {
            let lives_left = state.player.lose_life();
            log::info!("Drowned, {lives_left} lives left");
            state.events.push(GameEvent::Drowned { lives_left });
        }
        Interaction::ReachedGoal => {
            state.crossings += 1;
            state.player.reset_to_start();
            log::info!("Round complete ({} crossings)", state.crossings);
            state.events.push(GameEvent::RoundComplete {
                crossings: state.crossings,
            });
        }
    }

    if interaction.is_fatal() && !state.player.is_alive() {
        state.phase = GamePhase::GameOver;
        log::info!("Game over after {} frames", state.frame);
        state.events.push(GameEvent::GameOver {
            crossings: state.crossings,
        });
    }
}

/// Drop every occupant flagged as removed this frame
fn cull_removed(state: &mut GameState) {
    state.vehicles.retain(|v| !v.is_removed());
    state.platforms.retain(|p| !p.is_removed());
}
