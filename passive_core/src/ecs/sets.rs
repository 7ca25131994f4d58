use bevy::prelude::*;

#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
/// Every passive system runs in one of these sets, in this order, during [`FixedUpdate`]
pub enum PassiveSystemSet {
    /// Activation changes, requests & cleanups are read
    ReceiveActivations,
    /// The pair of every remote player is brought up to date
    Synchronize,
}

pub(super) fn register(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (PassiveSystemSet::ReceiveActivations, PassiveSystemSet::Synchronize).chain(),
    );
}
