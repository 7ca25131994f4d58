//! Keeps passive players from colliding with anyone else.
//!
//! Every remote player gets a [`pair::PairState`] that remembers which of their entities were
//! last seen next to which of ours. Each tick the pair is compared against what the world looks
//! like now and only the differences are sent to the physics engine.

use bevy::prelude::App;

pub mod activation;
pub mod ops;
pub mod pair;
pub mod pairs;
pub mod resolver;
pub mod systems;
pub mod triple;

pub(super) fn register(app: &mut App) {
    activation::register(app);
    pairs::register(app);
    systems::register(app);
}
