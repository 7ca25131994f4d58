//! Stands in for the server while the client is offline.
//!
//! The server is the only one allowed to decide activations. Without one, every request the
//! local player makes is accepted as-is and echoed back as if the server had sent it.

use bevy::prelude::*;
use passive_core::{
    ecs::sets::PassiveSystemSet,
    entities::player::{LocalPlayer, Player},
    passive::activation::{PassiveActivationChanged, RequestPassiveActivation},
};

use crate::settings::LocalPlayerId;

fn spawn_local_player(mut commands: Commands, local_id: Res<LocalPlayerId>) {
    commands.spawn((Name::new("Local Player"), Player::new(local_id.0), LocalPlayer));
}

fn echo_activation_requests(
    q_local_player: Query<&Player, With<LocalPlayer>>,
    mut mr_request: MessageReader<RequestPassiveActivation>,
    mut mw_changed: MessageWriter<PassiveActivationChanged>,
) {
    let Ok(player) = q_local_player.single() else {
        mr_request.clear();
        return;
    };

    for ev in mr_request.read() {
        mw_changed.write(PassiveActivationChanged {
            player: player.id(),
            activation: ev.activation,
        });
    }
}

pub(super) fn register(app: &mut App) {
    app.add_systems(Startup, spawn_local_player).add_systems(
        FixedUpdate,
        echo_activation_requests.before(PassiveSystemSet::ReceiveActivations),
    );
}

#[cfg(test)]
mod tests {
    use passive_core::{
        entities::player::PlayerId, passive::activation::PassiveActivations, plugin::passive_plugin::PassivePlugin,
    };

    use super::*;

    #[test]
    fn requests_become_activations_of_the_local_player() {
        let mut app = App::new();
        app.add_plugins(PassivePlugin);
        app.insert_resource(LocalPlayerId(PlayerId(7)));
        register(&mut app);

        app.world_mut().run_schedule(Startup);
        app.world_mut()
            .write_message(RequestPassiveActivation { activation: true });
        app.world_mut().run_schedule(FixedUpdate);

        assert!(app.world().resource::<PassiveActivations>().get_or(PlayerId(7), false));
    }

    #[test]
    fn requests_without_a_local_player_are_dropped() {
        let mut app = App::new();
        app.add_plugins(PassivePlugin);
        app.add_systems(FixedUpdate, echo_activation_requests.before(PassiveSystemSet::ReceiveActivations));

        app.world_mut()
            .write_message(RequestPassiveActivation { activation: true });
        app.world_mut().run_schedule(FixedUpdate);

        assert!(app.world().resource::<Messages<PassiveActivationChanged>>().is_empty());
        assert!(!app.world().resource::<PassiveActivations>().get_or(PlayerId(7), false));
    }
}
