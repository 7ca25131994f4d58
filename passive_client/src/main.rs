//! Runs passive mode for a single local player without a server.
//!
//! Type `passive on` or `passive off` into the console to change the activation.

pub mod commands;
pub mod netty;
pub mod settings;

use std::time::Duration;

use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*};
use bevy_rapier3d::prelude::RapierPhysicsPlugin;
use passive_core::{physics::collision_handling::PassivePhysicsFilter, plugin::passive_plugin::PassivePlugin};

fn main() {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))),
        LogPlugin::default(),
        TransformPlugin,
        RapierPhysicsPlugin::<PassivePhysicsFilter>::default(),
        PassivePlugin,
    ));

    // After the log plugin so a bad settings file is reported
    let (passive_settings, local_player) = settings::read_settings();
    info!("Passive settings: {passive_settings:?}");

    app.insert_resource(passive_settings).insert_resource(local_player);

    commands::register(&mut app);
    netty::register(&mut app);

    app.run();
}
