//! The operations passive mode needs from the physical simulation.
//!
//! The synchronization logic never touches the world directly. Everything it reads or changes
//! goes through [`SimulationApi`], which lets the same logic run against the bevy [`World`]
//! ([`ecs_simulation::EcsSimulation`]) or any other backend.

use bevy::prelude::*;

use crate::entities::{player::PlayerId, vehicle::Seat};

pub mod ecs_simulation;

#[cfg(test)]
pub(crate) mod mock;

/// Read & write access to the simulated entities.
///
/// Lookups may return entities that no longer exist; callers are expected to validate them with
/// [`SimulationApi::exists`].
pub trait SimulationApi {
    /// Checks if this entity still denotes a live object
    fn exists(&self, entity: Entity) -> bool;

    /// The body currently controlled by this player
    fn player_body(&self, player: PlayerId) -> Option<Entity>;

    /// The vehicle this body is currently sitting in
    fn current_vehicle(&self, body: Entity) -> Option<Entity>;

    /// The trailer attached to this vehicle's hitch
    fn trailer(&self, vehicle: Entity) -> Option<Entity>;

    /// The vehicle hanging from this vehicle's cargo hook
    fn cargo_hooked(&self, vehicle: Entity) -> Option<Entity>;

    /// The vehicle hooked to this tow truck
    fn tow_truck_hooked(&self, vehicle: Entity) -> Option<Entity>;

    /// Who is sitting in this seat of the vehicle
    fn seat_occupant(&self, vehicle: Entity, seat: Seat) -> Option<Entity>;

    /// Checks if the body is sitting in any seat of this vehicle
    fn is_in_vehicle(&self, body: Entity, vehicle: Entity) -> bool;

    /// Checks if the body is doing something that must never be faded out
    fn is_performing_exempt_task(&self, body: Entity) -> bool;

    /// Toggles whether `entity` ignores collisions with `other`.
    ///
    /// This is one-directional. Use [`crate::passive::ops::change_collisions`] to apply it
    /// both ways.
    fn set_no_collision(&mut self, entity: Entity, other: Entity, no_collision: bool);

    /// Sets how opaque this entity is drawn
    fn set_alpha(&mut self, entity: Entity, alpha: u8);

    /// Draws this entity fully opaque again
    fn reset_alpha(&mut self, entity: Entity);
}
