//! Who has passive mode turned on, and the messages that change it

use bevy::{platform::collections::HashMap, prelude::*};

use crate::{
    ecs::sets::PassiveSystemSet,
    entities::player::{CombatDisabled, LocalPlayer, Player, PlayerId},
    settings::PassiveSettings,
    simulation::ecs_simulation::EcsSimulation,
};

use super::pairs::PassivePairs;

#[derive(Resource, Debug, Default, Clone)]
/// The passive mode activation of every player the server has told us about
pub struct PassiveActivations(HashMap<PlayerId, bool>);

impl PassiveActivations {
    /// The activation of this player, or `default` if the server never sent one
    pub fn get_or(&self, player: PlayerId, default: bool) -> bool {
        self.0.get(&player).copied().unwrap_or(default)
    }

    /// Stores the activation of this player
    pub fn set(&mut self, player: PlayerId, activation: bool) {
        self.0.insert(player, activation);
    }

    /// Forgets the activation of this player. Returns true if one was stored.
    pub fn remove(&mut self, player: PlayerId) -> bool {
        self.0.remove(&player).is_some()
    }
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
/// The server decided the passive activation of this player
pub struct PassiveActivationChanged {
    /// The player whose activation changed
    pub player: PlayerId,
    /// If passive mode is now on for them
    pub activation: bool,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
/// The local player wants passive mode turned on or off.
///
/// This is only a request. Nothing changes until a [`PassiveActivationChanged`] comes back.
pub struct RequestPassiveActivation {
    /// The activation being asked for
    pub activation: bool,
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
/// This player disconnected, so everything stored for them should be dropped
pub struct PassiveCleanup {
    /// The player that disconnected
    pub player: PlayerId,
}

#[derive(Message, Debug, Clone, Copy, Default)]
/// Drops the pair state of every player. Activations are kept.
pub struct ResetPassiveState;

fn receive_activations(
    mut commands: Commands,
    settings: Res<PassiveSettings>,
    mut activations: ResMut<PassiveActivations>,
    q_local_player: Query<(Entity, &Player), With<LocalPlayer>>,
    mut mr_changed: MessageReader<PassiveActivationChanged>,
) {
    for ev in mr_changed.read() {
        activations.set(ev.player, ev.activation);

        if let Some((local_body, _)) = q_local_player.iter().find(|(_, player)| player.id() == ev.player) {
            if ev.activation && settings.disable_combat {
                commands.entity(local_body).insert(CombatDisabled);
            } else {
                commands.entity(local_body).remove::<CombatDisabled>();
            }
        }

        if settings.debug {
            info!("Received passive activation of {} ({})", ev.player, ev.activation);
        } else {
            debug!("Received passive activation of {} ({})", ev.player, ev.activation);
        }
    }
}

fn log_activation_requests(settings: Res<PassiveSettings>, mut mr_request: MessageReader<RequestPassiveActivation>) {
    if !settings.debug {
        mr_request.clear();
        return;
    }

    for ev in mr_request.read() {
        info!("Requesting server to change the activation to {}", ev.activation);
    }
}

fn cleanup_players(
    mut commands: Commands,
    mut activations: ResMut<PassiveActivations>,
    mut pairs: ResMut<PassivePairs>,
    mut mr_cleanup: MessageReader<PassiveCleanup>,
    mut mr_reset: MessageReader<ResetPassiveState>,
) {
    for ev in mr_cleanup.read() {
        let had_activation = activations.remove(ev.player);
        let removed_pair = pairs.remove(ev.player);
        let had_pair = removed_pair.is_some();

        // Whatever they left behind in the world must not stay blacklisted
        if let Some(state) = removed_pair {
            commands.queue(move |world: &mut World| {
                state.release(&mut EcsSimulation::new(world));
            });
        }

        if had_activation || had_pair {
            info!("Cleaned up passive data of player {}", ev.player);
        }
    }

    if mr_reset.read().count() != 0 {
        info!("Resetting passive state of {} players", pairs.len());
        pairs.clear();
    }
}

pub(super) fn register(app: &mut App) {
    app.init_resource::<PassiveActivations>()
        .add_message::<PassiveActivationChanged>()
        .add_message::<RequestPassiveActivation>()
        .add_message::<PassiveCleanup>()
        .add_message::<ResetPassiveState>();

    app.add_systems(
        FixedUpdate,
        (receive_activations, log_activation_requests, cleanup_players)
            .chain()
            .in_set(PassiveSystemSet::ReceiveActivations),
    );
}
