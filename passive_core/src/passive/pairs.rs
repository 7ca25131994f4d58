//! Storage for the pair state of every remote player

use std::fmt::{self, Display};

use bevy::{platform::collections::HashMap, prelude::*};

use crate::entities::player::PlayerId;

use super::{
    pair::PairState,
    triple::{EntityTriple, Side},
};

#[derive(Resource, Debug, Default)]
/// Every [`PairState`] this client currently tracks, keyed by the remote player's id.
///
/// Entries are only ever created by [`PassivePairs::get_or_insert`] and only ever removed by
/// [`PassivePairs::remove`] or [`PassivePairs::clear`]. Nothing is dropped implicitly.
pub struct PassivePairs(HashMap<PlayerId, PairState>);

impl PassivePairs {
    /// Gets the state for this remote player, creating it with the given activation if this
    /// player has never been seen before.
    pub fn get_or_insert(&mut self, player: PlayerId, activation: bool) -> &mut PairState {
        self.0.entry(player).or_insert_with(|| PairState::new(player, activation))
    }

    /// Gets the state for this remote player if there is one
    pub fn get(&self, player: PlayerId) -> Option<&PairState> {
        self.0.get(&player)
    }

    /// Forgets this player, giving back whatever was stored for them
    pub fn remove(&mut self, player: PlayerId) -> Option<PairState> {
        self.0.remove(&player)
    }

    /// Forgets every player
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// How many remote players are tracked
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no remote player is tracked
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A snapshot of the entities known for this pair, for diagnostics
    pub fn dump(&self, player: PlayerId) -> Option<PairDump> {
        self.get(player).map(|state| PairDump {
            owner: state.owner(),
            activation: state.last_activation(),
            local: *state.known(Side::Local),
            remote: *state.known(Side::Remote),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The six entities known for one pair at some point in time
pub struct PairDump {
    /// The remote player
    pub owner: PlayerId,
    /// The suppression flag last applied
    pub activation: bool,
    /// What is known about the local player
    pub local: EntityTriple,
    /// What is known about the remote player
    pub remote: EntityTriple,
}

impl Display for PairDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pair with player {} (suppressed: {})", self.owner, self.activation)?;
        writeln!(f, "Local  (body / vehicle / towed): {}", self.local)?;
        write!(f, "Remote (body / vehicle / towed): {}", self.remote)
    }
}

pub(super) fn register(app: &mut App) {
    app.init_resource::<PassivePairs>();
}
