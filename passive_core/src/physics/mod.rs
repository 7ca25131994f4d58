//! Physics integration for passive mode

use bevy::prelude::App;

pub mod collision_handling;

pub(super) fn register(app: &mut App) {
    collision_handling::register(app);
}
