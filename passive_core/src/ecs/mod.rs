//! ECS scheduling shared by every passive system

use bevy::prelude::App;

pub mod sets;

pub(super) fn register(app: &mut App) {
    sets::register(app);
}
