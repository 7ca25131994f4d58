//! Player identification shared between every passive system

use std::str::FromStr;

use bevy::prelude::*;
use derive_more::derive::{Display, From};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect, Display, From)]
/// The id the server assigned to a connected player.
///
/// This is stable for as long as the player stays connected, and is what every passive
/// activation and pair state is keyed by.
pub struct PlayerId(pub u32);

#[derive(Debug, Error, PartialEq, Eq)]
/// Returned when text typed by a user does not describe a [`PlayerId`]
pub enum PlayerIdParseError {
    /// Nothing was given
    #[error("no player id was given")]
    Empty,
    /// The text was not a positive whole number
    #[error("`{0}` is not a valid player id")]
    NotANumber(String),
}

impl FromStr for PlayerId {
    type Err = PlayerIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PlayerIdParseError::Empty);
        }

        trimmed
            .parse::<u32>()
            .map(Self)
            .map_err(|_| PlayerIdParseError::NotANumber(trimmed.to_owned()))
    }
}

#[derive(Component, Debug, Reflect, Clone, Copy, PartialEq, Eq)]
/// Placed on the body a connected player controls.
///
/// Every entity with this component is part of the player roster the passive scheduler
/// iterates over.
pub struct Player {
    id: PlayerId,
}

impl Player {
    /// Creates the component for the player with this server id
    pub fn new(id: PlayerId) -> Self {
        Self { id }
    }

    /// The server id of this player
    pub fn id(&self) -> PlayerId {
        self.id
    }
}

#[derive(Component, Debug, Default, Reflect, Clone, Copy)]
/// Only the player that is this specific client will have this.
pub struct LocalPlayer;

#[derive(Component, Debug, Default, Reflect, Clone, Copy)]
/// Placed on the local player's body while they are passive and combat is disabled for passive
/// players. Anything that fires weapons or attacks should check for this.
pub struct CombatDisabled;

pub(super) fn register(app: &mut App) {
    app.register_type::<Player>()
        .register_type::<LocalPlayer>()
        .register_type::<CombatDisabled>();
}
