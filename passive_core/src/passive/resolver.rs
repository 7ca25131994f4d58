//! Figures out which entities currently make up a player

use bevy::prelude::Entity;

use crate::{entities::player::PlayerId, simulation::SimulationApi};

use super::triple::{EntityHandle, EntityTriple};

fn alive(sim: &impl SimulationApi, entity: Option<Entity>) -> Option<Entity> {
    entity.filter(|e| sim.exists(*e))
}

/// Gets whatever this vehicle is pulling or carrying.
///
/// Trailers are checked first, then cargo hooks, then tow trucks. A vehicle can briefly report
/// more than one of these, and only the first one is used.
pub fn towed_by(sim: &impl SimulationApi, vehicle: Entity) -> Option<Entity> {
    alive(sim, sim.trailer(vehicle))
        .or_else(|| alive(sim, sim.cargo_hooked(vehicle)))
        .or_else(|| alive(sim, sim.tow_truck_hooked(vehicle)))
}

/// Resolves the body, vehicle & towed vehicle of this player.
///
/// Anything that no longer exists is resolved as [`EntityHandle::None`]. This has no side effects.
pub fn resolve(sim: &impl SimulationApi, player: PlayerId) -> EntityTriple {
    let primary = alive(sim, sim.player_body(player));
    let vehicle = primary.and_then(|body| alive(sim, sim.current_vehicle(body)));
    let towed = vehicle.and_then(|vehicle| towed_by(sim, vehicle));

    EntityTriple {
        primary: EntityHandle::from(primary),
        vehicle: EntityHandle::from(vehicle),
        towed: EntityHandle::from(towed),
    }
}
