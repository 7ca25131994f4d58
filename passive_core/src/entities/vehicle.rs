//! Components describing what a body is sitting in and what a vehicle is towing

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
/// A seat within a vehicle
pub enum Seat {
    /// The seat that controls the vehicle
    Driver,
    /// Any other seat, by index
    Passenger(u8),
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
/// Placed on a body that is currently sitting in a vehicle.
pub struct Occupant {
    /// The vehicle this body is inside of
    pub vehicle: Entity,
    /// The seat of that vehicle this body is sitting in
    pub seat: Seat,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
/// The trailer attached to this vehicle's hitch
pub struct TrailerHitch(pub Entity);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
/// The vehicle currently hanging from this aircraft's cargo hook
pub struct CargoHook(pub Entity);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
/// The vehicle currently hooked up to this tow truck
pub struct TowTruckHook(pub Entity);

#[derive(Component, Debug, Default, Clone, Copy, Reflect)]
/// The body is in the middle of an action that must stay fully visible (takedowns, scripted
/// tasks, etc.), so it is never faded out.
pub struct ExemptTask;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
/// Overrides how opaque an entity is drawn. `0` is invisible, `255` is fully opaque.
///
/// Entities without this component are drawn fully opaque.
pub struct EntityAlpha(pub u8);

pub(super) fn register(app: &mut App) {
    app.register_type::<Occupant>()
        .register_type::<TrailerHitch>()
        .register_type::<CargoHook>()
        .register_type::<TowTruckHook>()
        .register_type::<ExemptTask>()
        .register_type::<EntityAlpha>();
}
