//! Reads the passive settings from the settings file & the command line

use std::{fs, io::ErrorKind, path::Path};

use anyhow::Context;
use bevy::prelude::*;
use clap::Parser;
use passive_core::{entities::player::PlayerId, settings::PassiveSettings};

/// Where the settings file is looked for if `--settings` isn't passed
pub const DEFAULT_SETTINGS_PATH: &str = "settings/passive.toml";

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
/// Command line arguments for the client
pub struct Args {
    /// The settings file to read (defaults to settings/passive.toml)
    #[arg(long)]
    settings: Option<String>,

    /// Treat every player the server hasn't told us about as passive
    #[arg(long)]
    default_activation: Option<bool>,

    /// How opaque entities we can't collide with are drawn (0-255)
    #[arg(long)]
    alpha: Option<u8>,

    /// Passive players can't fire weapons or attack
    #[arg(long, default_value_t = false)]
    disable_combat: bool,

    /// Enables the debug commands and more verbose logging
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// The id of the player controlled by this client
    #[arg(long, default_value_t = 1)]
    player_id: u32,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
/// The id this client plays as
pub struct LocalPlayerId(pub PlayerId);

/// Parses the contents of a settings file. Fields that are missing keep their default value.
pub fn parse_settings(contents: &str) -> anyhow::Result<PassiveSettings> {
    toml::from_str::<PassiveSettings>(contents).context("Invalid passive settings")
}

/// Reads the settings file at this path.
///
/// A file that doesn't exist gives the default settings.
pub fn load_settings_file(path: impl AsRef<Path>) -> anyhow::Result<PassiveSettings> {
    let path = path.as_ref();

    match fs::read_to_string(path) {
        Ok(contents) => parse_settings(&contents).with_context(|| format!("Error parsing {}", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(PassiveSettings::default()),
        Err(e) => Err(e).with_context(|| format!("Error reading {}", path.display())),
    }
}

impl Args {
    /// Overwrites anything in `settings` that was passed on the command line
    fn apply(&self, settings: &mut PassiveSettings) {
        if let Some(default_activation) = self.default_activation {
            settings.default_activation = default_activation;
        }
        if let Some(alpha) = self.alpha {
            settings.alpha = alpha;
        }
        if self.disable_combat {
            settings.disable_combat = true;
        }
        if self.debug {
            settings.debug = true;
        }
    }
}

fn settings_from_args(args: &Args) -> PassiveSettings {
    let path = args.settings.as_deref().unwrap_or(DEFAULT_SETTINGS_PATH);

    let mut settings = load_settings_file(path).unwrap_or_else(|e| {
        warn!("{e:?}\nUsing the default passive settings instead.");
        PassiveSettings::default()
    });

    args.apply(&mut settings);

    settings
}

/// Reads the settings file, then applies the command line arguments on top of it
pub fn read_settings() -> (PassiveSettings, LocalPlayerId) {
    let args = Args::parse();

    (settings_from_args(&args), LocalPlayerId(PlayerId(args.player_id)))
}
