//! A hand-driven simulation that records every operation, for testing the passive logic

use bevy::{
    ecs::{entity::Entity, world::World},
    platform::collections::{HashMap, HashSet},
};

use crate::entities::{player::PlayerId, vehicle::Seat};

use super::SimulationApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    NoCollision { entity: Entity, other: Entity, no_collision: bool },
    Alpha { entity: Entity, alpha: u8 },
    ResetAlpha { entity: Entity },
}

#[derive(Default)]
pub(crate) struct MockSimulation {
    ids: World,
    alive: HashSet<Entity>,
    pub bodies: HashMap<PlayerId, Entity>,
    pub seats: HashMap<Entity, (Entity, Seat)>,
    pub trailers: HashMap<Entity, Entity>,
    pub cargo_hooks: HashMap<Entity, Entity>,
    pub tow_hooks: HashMap<Entity, Entity>,
    pub exempt: HashSet<Entity>,
    pub ops: Vec<Op>,
}

impl MockSimulation {
    pub fn spawn(&mut self) -> Entity {
        let entity = self.ids.spawn_empty().id();
        self.alive.insert(entity);
        entity
    }

    pub fn despawn(&mut self, entity: Entity) {
        self.alive.remove(&entity);
    }

    pub fn spawn_player(&mut self, id: PlayerId) -> Entity {
        let body = self.spawn();
        self.bodies.insert(id, body);
        body
    }

    pub fn seat(&mut self, body: Entity, vehicle: Entity, seat: Seat) {
        self.seats.insert(body, (vehicle, seat));
    }

    pub fn unseat(&mut self, body: Entity) {
        self.seats.remove(&body);
    }

    /// Every operation recorded since the last call
    pub fn take_ops(&mut self) -> Vec<Op> {
        std::mem::take(&mut self.ops)
    }

    /// Only the collision operations recorded since the last call, as (entity, other, no_collision)
    pub fn take_collision_ops(&mut self) -> Vec<(Entity, Entity, bool)> {
        self.take_ops()
            .into_iter()
            .filter_map(|op| match op {
                Op::NoCollision {
                    entity,
                    other,
                    no_collision,
                } => Some((entity, other, no_collision)),
                _ => None,
            })
            .collect()
    }
}

impl SimulationApi for MockSimulation {
    fn exists(&self, entity: Entity) -> bool {
        self.alive.contains(&entity)
    }

    fn player_body(&self, player: PlayerId) -> Option<Entity> {
        self.bodies.get(&player).copied()
    }

    fn current_vehicle(&self, body: Entity) -> Option<Entity> {
        self.seats.get(&body).map(|(vehicle, _)| *vehicle)
    }

    fn trailer(&self, vehicle: Entity) -> Option<Entity> {
        self.trailers.get(&vehicle).copied()
    }

    fn cargo_hooked(&self, vehicle: Entity) -> Option<Entity> {
        self.cargo_hooks.get(&vehicle).copied()
    }

    fn tow_truck_hooked(&self, vehicle: Entity) -> Option<Entity> {
        self.tow_hooks.get(&vehicle).copied()
    }

    fn seat_occupant(&self, vehicle: Entity, seat: Seat) -> Option<Entity> {
        self.seats
            .iter()
            .find(|(_, (v, s))| *v == vehicle && *s == seat)
            .map(|(body, _)| *body)
    }

    fn is_in_vehicle(&self, body: Entity, vehicle: Entity) -> bool {
        self.current_vehicle(body) == Some(vehicle)
    }

    fn is_performing_exempt_task(&self, body: Entity) -> bool {
        self.exempt.contains(&body)
    }

    fn set_no_collision(&mut self, entity: Entity, other: Entity, no_collision: bool) {
        self.ops.push(Op::NoCollision {
            entity,
            other,
            no_collision,
        });
    }

    fn set_alpha(&mut self, entity: Entity, alpha: u8) {
        self.ops.push(Op::Alpha { entity, alpha });
    }

    fn reset_alpha(&mut self, entity: Entity) {
        self.ops.push(Op::ResetAlpha { entity });
    }
}
