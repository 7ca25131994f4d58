//! The entities a player is physically made of at one instant

use std::fmt::{self, Display};

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// A handle to a simulated object, or nothing.
///
/// Handles are borrowed from the simulation and may stop existing at any point. They are never
/// dereferenced here, only compared & passed back into the simulation.
pub enum EntityHandle {
    /// A handle to an object that existed when this was resolved
    Valid(Entity),
    #[default]
    /// There is no object
    None,
}

impl EntityHandle {
    /// The entity behind this handle, if there is one
    pub fn entity(self) -> Option<Entity> {
        match self {
            Self::Valid(entity) => Some(entity),
            Self::None => None,
        }
    }

    /// Returns true if this denotes nothing
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns true if this denotes an object
    pub fn is_valid(self) -> bool {
        !self.is_none()
    }
}

impl From<Option<Entity>> for EntityHandle {
    fn from(value: Option<Entity>) -> Self {
        value.map(Self::Valid).unwrap_or_default()
    }
}

impl Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(entity) => write!(f, "{entity}"),
            Self::None => f.write_str("none"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which part of a player an entity is
pub enum SlotKind {
    /// The body the player controls
    Primary,
    /// The vehicle the body is sitting in
    Vehicle,
    /// Whatever that vehicle is towing or carrying
    Towed,
}

impl SlotKind {
    /// Every kind, in the order they are always processed in
    pub const ALL: [SlotKind; 3] = [Self::Primary, Self::Vehicle, Self::Towed];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which player of a pair something belongs to
pub enum Side {
    /// The player this client controls
    Local,
    /// The other player of the pair
    Remote,
}

impl Side {
    /// The other side of the pair
    pub fn opposite(self) -> Self {
        match self {
            Self::Local => Self::Remote,
            Self::Remote => Self::Local,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// One of the six tracked entities of a pair
pub struct Slot {
    /// The player this slot belongs to
    pub side: Side,
    /// The part of that player this slot tracks
    pub kind: SlotKind,
}

impl Slot {
    /// All six slots of a pair. Local before remote, body -> vehicle -> towed within each side.
    pub const ALL: [Slot; 6] = [
        Slot::new(Side::Local, SlotKind::Primary),
        Slot::new(Side::Local, SlotKind::Vehicle),
        Slot::new(Side::Local, SlotKind::Towed),
        Slot::new(Side::Remote, SlotKind::Primary),
        Slot::new(Side::Remote, SlotKind::Vehicle),
        Slot::new(Side::Remote, SlotKind::Towed),
    ];

    const fn new(side: Side, kind: SlotKind) -> Self {
        Self { side, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// The body, vehicle & towed vehicle of a player
pub struct EntityTriple {
    /// The body the player controls
    pub primary: EntityHandle,
    /// The vehicle the body is sitting in
    pub vehicle: EntityHandle,
    /// The vehicle being towed or carried by that vehicle
    pub towed: EntityHandle,
}

impl EntityTriple {
    /// Gets the entity for this part of the player
    pub fn get(&self, kind: SlotKind) -> EntityHandle {
        match kind {
            SlotKind::Primary => self.primary,
            SlotKind::Vehicle => self.vehicle,
            SlotKind::Towed => self.towed,
        }
    }

    /// Overwrites the entity for this part of the player
    pub fn set(&mut self, kind: SlotKind, handle: EntityHandle) {
        match kind {
            SlotKind::Primary => self.primary = handle,
            SlotKind::Vehicle => self.vehicle = handle,
            SlotKind::Towed => self.towed = handle,
        }
    }

    /// Iterates over every entity that is present, in slot order
    pub fn entities(&self) -> impl Iterator<Item = (SlotKind, Entity)> + '_ {
        SlotKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).entity().map(|entity| (kind, entity)))
    }

    /// Checks if any slot of this triple holds that entity
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities().any(|(_, e)| e == entity)
    }
}

impl Display for EntityTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.primary, self.vehicle, self.towed)
    }
}
