//! Runs the pair synchronization of every remote player once per tick

use bevy::prelude::*;

use crate::{
    ecs::sets::PassiveSystemSet,
    entities::player::{LocalPlayer, Player, PlayerId},
    settings::PassiveSettings,
    simulation::{SimulationApi, ecs_simulation::EcsSimulation},
};

use super::{
    activation::PassiveActivations,
    pair::{PairContext, SyncOutcome},
    pairs::PassivePairs,
    resolver::resolve,
};

#[derive(Resource, Debug, Default)]
/// When this is true, every collision change made during the next tick is logged at the info
/// level. It is turned back off after that tick.
pub struct PrintNextTick(pub bool);

fn synchronize_pairs(world: &mut World) {
    let Some(local) = world
        .query_filtered::<&Player, With<LocalPlayer>>()
        .iter(world)
        .next()
        .map(|player| player.id())
    else {
        return;
    };

    let remote_ids = world
        .query_filtered::<&Player, Without<LocalPlayer>>()
        .iter(world)
        .map(|player| player.id())
        .collect::<Vec<PlayerId>>();

    let settings = world.resource::<PassiveSettings>().clone();
    let activations = world.resource::<PassiveActivations>();
    let local_activation = activations.get_or(local, settings.default_activation);

    let remotes = remote_ids
        .into_iter()
        .map(|id| (id, local_activation || activations.get_or(id, settings.default_activation)))
        .collect::<Vec<(PlayerId, bool)>>();

    let print_changes = world.resource::<PrintNextTick>().0;
    if print_changes {
        world.resource_mut::<PrintNextTick>().0 = false;
    }

    world.resource_scope(|world, mut pairs: Mut<PassivePairs>| {
        let mut sim = EcsSimulation::new(world).with_printed_changes(print_changes);

        // A fade could survive a mode change on the vehicle we are sitting in
        if let Some(local_vehicle) = resolve(&sim, local).vehicle.entity() {
            sim.reset_alpha(local_vehicle);
        }

        for (remote, suppressed) in remotes {
            let ctx = PairContext {
                local,
                suppressed,
                faded_alpha: settings.alpha,
            };

            let outcome = pairs.get_or_insert(remote, suppressed).synchronize(&mut sim, ctx);
            if outcome != SyncOutcome::Unchanged {
                debug!("Passive pair with player {remote}: {outcome:?}");
            }
        }
    });
}

pub(super) fn register(app: &mut App) {
    app.init_resource::<PrintNextTick>();

    app.add_systems(FixedUpdate, synchronize_pairs.in_set(PassiveSystemSet::Synchronize));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::vehicle::{EntityAlpha, Occupant, Seat, TrailerHitch},
        passive::{
            activation::{PassiveActivationChanged, PassiveCleanup, ResetPassiveState},
            triple::{EntityHandle, Side},
        },
        physics::collision_handling::CollisionBlacklist,
        plugin::passive_plugin::PassivePlugin,
    };

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(PassivePlugin);
        app
    }

    fn tick(app: &mut App) {
        app.world_mut().run_schedule(FixedUpdate);
    }

    fn blacklisted(app: &App, entity: Entity, other: Entity) -> bool {
        app.world()
            .get::<CollisionBlacklist>(entity)
            .is_some_and(|blacklist| blacklist.contains(other))
    }

    #[test]
    fn passive_remote_player_stops_colliding() {
        let mut app = app();
        let world = app.world_mut();
        let body_l = world.spawn((Player::new(PlayerId(1)), LocalPlayer)).id();
        let car = world.spawn_empty().id();
        let body_r = world
            .spawn((
                Player::new(PlayerId(2)),
                Occupant {
                    vehicle: car,
                    seat: Seat::Driver,
                },
            ))
            .id();

        world.write_message(PassiveActivationChanged {
            player: PlayerId(2),
            activation: true,
        });
        tick(&mut app);

        assert!(blacklisted(&app, body_l, body_r));
        assert!(blacklisted(&app, body_r, body_l));
        assert!(blacklisted(&app, car, body_l));
        assert!(blacklisted(&app, body_l, car));
        assert_eq!(app.world().get::<EntityAlpha>(body_r), Some(&EntityAlpha(200)));
        assert_eq!(app.world().get::<EntityAlpha>(car), Some(&EntityAlpha(200)));
        assert_eq!(app.world().resource::<PassivePairs>().len(), 1);

        // Getting out of the car makes it solid again
        app.world_mut().entity_mut(body_r).remove::<Occupant>();
        tick(&mut app);

        assert!(!blacklisted(&app, car, body_l));
        assert!(!blacklisted(&app, body_l, car));
        assert!(blacklisted(&app, body_l, body_r));
        assert_eq!(app.world().get::<EntityAlpha>(car), None);
    }

    #[test]
    fn turning_passive_off_restores_everything() {
        let mut app = app();
        let world = app.world_mut();
        let body_l = world.spawn((Player::new(PlayerId(1)), LocalPlayer)).id();
        let truck = world.spawn_empty().id();
        let trailer = world.spawn_empty().id();
        world.entity_mut(truck).insert(TrailerHitch(trailer));
        world.entity_mut(body_l).insert(Occupant {
            vehicle: truck,
            seat: Seat::Driver,
        });
        let body_r = world.spawn(Player::new(PlayerId(2))).id();

        world.write_message(PassiveActivationChanged {
            player: PlayerId(1),
            activation: true,
        });
        tick(&mut app);

        for local in [body_l, truck, trailer] {
            assert!(blacklisted(&app, local, body_r));
            assert!(blacklisted(&app, body_r, local));
        }

        app.world_mut().write_message(PassiveActivationChanged {
            player: PlayerId(1),
            activation: false,
        });
        tick(&mut app);

        for local in [body_l, truck, trailer] {
            assert!(!blacklisted(&app, local, body_r));
            assert!(!blacklisted(&app, body_r, local));
        }
        assert_eq!(app.world().get::<EntityAlpha>(body_r), None);
    }

    #[test]
    fn default_activation_applies_to_unknown_players() {
        let mut app = App::new();
        app.insert_resource(PassiveSettings {
            default_activation: true,
            ..Default::default()
        });
        app.add_plugins(PassivePlugin);

        let world = app.world_mut();
        let body_l = world.spawn((Player::new(PlayerId(1)), LocalPlayer)).id();
        let body_r = world.spawn(Player::new(PlayerId(2))).id();
        tick(&mut app);

        assert!(blacklisted(&app, body_l, body_r));
    }

    #[test]
    fn cleanup_forgets_the_player() {
        let mut app = app();
        let world = app.world_mut();
        let body_l = world.spawn((Player::new(PlayerId(1)), LocalPlayer)).id();
        let car = world.spawn_empty().id();
        let body_r = world
            .spawn((
                Player::new(PlayerId(2)),
                Occupant {
                    vehicle: car,
                    seat: Seat::Driver,
                },
            ))
            .id();
        world.write_message(PassiveActivationChanged {
            player: PlayerId(2),
            activation: true,
        });
        tick(&mut app);
        assert!(blacklisted(&app, body_l, car));

        // The car is left behind when the player disconnects
        app.world_mut().despawn(body_r);
        app.world_mut().write_message(PassiveCleanup { player: PlayerId(2) });
        tick(&mut app);

        assert!(!blacklisted(&app, body_l, car));
        assert!(!blacklisted(&app, car, body_l));
        assert!(!blacklisted(&app, body_l, body_r));
        assert_eq!(app.world().get::<EntityAlpha>(car), None);
        assert!(app.world().resource::<PassivePairs>().is_empty());
        assert!(!app.world().resource::<PassiveActivations>().get_or(PlayerId(2), false));
    }

    #[test]
    fn reset_rebuilds_pairs_from_scratch() {
        let mut app = app();
        let world = app.world_mut();
        let body_l = world.spawn((Player::new(PlayerId(1)), LocalPlayer)).id();
        world.spawn(Player::new(PlayerId(2)));
        tick(&mut app);

        app.world_mut().write_message(ResetPassiveState);
        tick(&mut app);

        // Cleared during the receive set, then created again by the same tick's synchronization
        let pairs = app.world().resource::<PassivePairs>();
        let dump = pairs.dump(PlayerId(2)).expect("pair recreated");
        assert_eq!(dump.local.primary, EntityHandle::Valid(body_l));
        assert_eq!(
            pairs.get(PlayerId(2)).map(|p| p.known(Side::Local).primary),
            Some(EntityHandle::Valid(body_l))
        );
    }

    #[test]
    fn local_vehicle_is_always_opaque() {
        let mut app = app();
        let world = app.world_mut();
        let car = world.spawn(EntityAlpha(10)).id();
        world.spawn((
            Player::new(PlayerId(1)),
            LocalPlayer,
            Occupant {
                vehicle: car,
                seat: Seat::Driver,
            },
        ));
        tick(&mut app);

        assert_eq!(app.world().get::<EntityAlpha>(car), None);
    }

    #[test]
    fn print_next_tick_only_lasts_one_tick() {
        let mut app = app();
        app.world_mut().spawn((Player::new(PlayerId(1)), LocalPlayer));
        app.world_mut().resource_mut::<PrintNextTick>().0 = true;

        tick(&mut app);

        assert!(!app.world().resource::<PrintNextTick>().0);
    }

    #[test]
    fn nothing_happens_without_a_local_player() {
        let mut app = app();
        app.world_mut().spawn(Player::new(PlayerId(2)));
        tick(&mut app);

        assert!(app.world().resource::<PassivePairs>().is_empty());
    }
}
