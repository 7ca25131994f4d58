//! [`SimulationApi`] implemented on top of a bevy [`World`]

use bevy::{platform::collections::HashMap, prelude::*};
use bevy_rapier3d::prelude::ActiveHooks;

use crate::{
    entities::{
        player::{Player, PlayerId},
        vehicle::{CargoHook, EntityAlpha, ExemptTask, Occupant, Seat, TowTruckHook, TrailerHitch},
    },
    physics::collision_handling::{CollisionBlacklist, CollisionBlacklistedEntity},
};

use super::SimulationApi;

/// Exposes a [`World`] to the passive synchronization logic.
///
/// Who controls what and who sits where is captured when this is created, since none of the
/// passive operations can change it. Collision & alpha changes are written to the world
/// immediately.
pub struct EcsSimulation<'w> {
    world: &'w mut World,
    bodies: HashMap<PlayerId, Entity>,
    occupants: Vec<(Entity, Occupant)>,
    print_changes: bool,
}

impl<'w> EcsSimulation<'w> {
    /// Captures the current roster & seating of this world
    pub fn new(world: &'w mut World) -> Self {
        let bodies = world
            .query::<(Entity, &Player)>()
            .iter(world)
            .map(|(entity, player)| (player.id(), entity))
            .collect();

        let occupants = world
            .query::<(Entity, &Occupant)>()
            .iter(world)
            .map(|(entity, occupant)| (entity, *occupant))
            .collect();

        Self {
            world,
            bodies,
            occupants,
            print_changes: false,
        }
    }

    /// If this is true, every collision change is logged at the info level instead of debug.
    pub fn with_printed_changes(mut self, print_changes: bool) -> Self {
        self.print_changes = print_changes;
        self
    }

    #[cfg(test)]
    pub(crate) fn world(&self) -> &World {
        self.world
    }
}

impl SimulationApi for EcsSimulation<'_> {
    fn exists(&self, entity: Entity) -> bool {
        self.world.get_entity(entity).is_ok()
    }

    fn player_body(&self, player: PlayerId) -> Option<Entity> {
        self.bodies.get(&player).copied()
    }

    fn current_vehicle(&self, body: Entity) -> Option<Entity> {
        self.world.get::<Occupant>(body).map(|occupant| occupant.vehicle)
    }

    fn trailer(&self, vehicle: Entity) -> Option<Entity> {
        self.world.get::<TrailerHitch>(vehicle).map(|hitch| hitch.0)
    }

    fn cargo_hooked(&self, vehicle: Entity) -> Option<Entity> {
        self.world.get::<CargoHook>(vehicle).map(|hook| hook.0)
    }

    fn tow_truck_hooked(&self, vehicle: Entity) -> Option<Entity> {
        self.world.get::<TowTruckHook>(vehicle).map(|hook| hook.0)
    }

    fn seat_occupant(&self, vehicle: Entity, seat: Seat) -> Option<Entity> {
        self.occupants
            .iter()
            .find(|(_, occupant)| occupant.vehicle == vehicle && occupant.seat == seat)
            .map(|(body, _)| *body)
    }

    fn is_in_vehicle(&self, body: Entity, vehicle: Entity) -> bool {
        self.current_vehicle(body) == Some(vehicle)
    }

    fn is_performing_exempt_task(&self, body: Entity) -> bool {
        self.world.get::<ExemptTask>(body).is_some()
    }

    fn set_no_collision(&mut self, entity: Entity, other: Entity, no_collision: bool) {
        let Ok(mut ent) = self.world.get_entity_mut(entity) else {
            return;
        };

        if self.print_changes {
            info!("No collision between {entity} and {other} set to {no_collision}");
        } else {
            debug!("No collision between {entity} and {other} set to {no_collision}");
        }

        if !no_collision {
            if let Some(mut blacklist) = ent.get_mut::<CollisionBlacklist>() {
                blacklist.remove(other);
            }
            return;
        }

        let blacklisted = CollisionBlacklistedEntity {
            entity: other,
            search_parents: true,
        };

        if let Some(mut blacklist) = ent.get_mut::<CollisionBlacklist>() {
            blacklist.add(blacklisted);
        } else {
            let hooks = ent.get::<ActiveHooks>().copied().unwrap_or(ActiveHooks::empty()) | CollisionBlacklist::hooks();
            ent.insert((CollisionBlacklist::single(blacklisted), hooks));
        }
    }

    fn set_alpha(&mut self, entity: Entity, alpha: u8) {
        if let Ok(mut ent) = self.world.get_entity_mut(entity) {
            ent.insert(EntityAlpha(alpha));
        }
    }

    fn reset_alpha(&mut self, entity: Entity) {
        if let Ok(mut ent) = self.world.get_entity_mut(entity) {
            ent.remove::<EntityAlpha>();
        }
    }
}
