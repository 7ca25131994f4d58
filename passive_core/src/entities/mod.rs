//! Players and the vehicles they use

use bevy::prelude::App;

pub mod player;
pub mod vehicle;

pub(super) fn register(app: &mut App) {
    player::register(app);
    vehicle::register(app);
}
