//! Settings that change how passive mode behaves

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Alpha entities are faded to if nothing else is configured
pub const DEFAULT_FADED_ALPHA: u8 = 200;

#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Reflect)]
#[serde(default)]
/// How passive mode is configured for this client.
///
/// Any field missing from a settings file keeps its default value.
pub struct PassiveSettings {
    /// The activation of any player the server hasn't told us about yet
    pub default_activation: bool,
    /// How opaque the entities of players we don't collide with are drawn (0-255)
    pub alpha: u8,
    /// Passive local players can't fire weapons or attack
    pub disable_combat: bool,
    /// Enables the debug commands and more verbose logging
    pub debug: bool,
}

impl Default for PassiveSettings {
    fn default() -> Self {
        Self {
            default_activation: false,
            alpha: DEFAULT_FADED_ALPHA,
            disable_combat: false,
            debug: false,
        }
    }
}

pub(super) fn register(app: &mut App) {
    app.init_resource::<PassiveSettings>().register_type::<PassiveSettings>();
}
