use bevy::prelude::{App, Plugin};

use crate::{ecs, entities, passive, physics, settings};

#[derive(Default)]
/// Adds every resource, message & system passive mode needs.
///
/// This does not add rapier itself. Add `RapierPhysicsPlugin::<PassivePhysicsFilter>` next to
/// this so the collision blacklists are respected.
pub struct PassivePlugin;

impl Plugin for PassivePlugin {
    fn build(&self, app: &mut App) {
        ecs::register(app);
        settings::register(app);
        entities::register(app);
        physics::register(app);
        passive::register(app);
    }
}
