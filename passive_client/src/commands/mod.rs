//! Console commands typed into the client's terminal

use std::{io::BufRead, thread};

use bevy::prelude::*;
use crossbeam::channel::{Receiver, Sender, unbounded};
use passive_core::{
    entities::player::{PlayerId, PlayerIdParseError},
    passive::{activation::RequestPassiveActivation, pairs::PassivePairs, systems::PrintNextTick},
    settings::PassiveSettings,
};
use thiserror::Error;

#[derive(Message, Debug, Clone, PartialEq, Eq)]
/// This message is sent when the user types a line into the console
pub struct ConsoleCommandSent {
    /// The raw string the user typed (this includes the command name)
    pub text: String,
    /// The name of the command, lowercased
    pub name: String,
    /// The args split around whitespace
    pub args: Vec<String>,
}

impl ConsoleCommandSent {
    /// Creates a new command message.
    ///
    /// * `text` The entire string of text the user typed
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut split = text.split_whitespace();

        let name = split.next().unwrap_or_default().to_lowercase();
        let args = split.map(|x| x.to_owned()).collect::<Vec<String>>();

        Self { text, name, args }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Every command the passive client understands
pub enum PassiveCommand {
    /// `passiveentities <id>`
    PrintEntities(PlayerId),
    /// `passiveprinttick`
    PrintNextTick,
    /// `passive <on|off>`
    SetActivation(bool),
}

#[derive(Error, Debug, PartialEq, Eq)]
/// Why a console line couldn't be turned into a [`PassiveCommand`]
pub enum CommandError {
    /// Not one of our commands
    #[error("Unknown command '{0}'")]
    Unknown(String),
    /// The command needs an argument that wasn't given
    #[error("Missing argument {0}")]
    MissingArgument(&'static str),
    /// The player id argument isn't a player id
    #[error(transparent)]
    InvalidPlayerId(#[from] PlayerIdParseError),
    /// The activation argument isn't `on` or `off`
    #[error("Expected 'on' or 'off', got '{0}'")]
    InvalidActivation(String),
}

impl TryFrom<&ConsoleCommandSent> for PassiveCommand {
    type Error = CommandError;

    fn try_from(ev: &ConsoleCommandSent) -> Result<Self, Self::Error> {
        match ev.name.as_str() {
            "passiveentities" => {
                let id = ev.args.first().ok_or(CommandError::MissingArgument("[player_id]"))?;
                Ok(Self::PrintEntities(id.parse()?))
            }
            "passiveprinttick" => Ok(Self::PrintNextTick),
            "passive" => match ev.args.first().map(|x| x.to_lowercase()).as_deref() {
                Some("on") => Ok(Self::SetActivation(true)),
                Some("off") => Ok(Self::SetActivation(false)),
                Some(other) => Err(CommandError::InvalidActivation(other.to_owned())),
                None => Err(CommandError::MissingArgument("[on|off]")),
            },
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

#[derive(Resource)]
/// Lines read from the console by the reader thread
struct ConsoleInput(Receiver<String>);

fn read_console_lines(sender: Sender<String>) {
    let stdin = std::io::stdin();

    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };

        if line.trim().is_empty() {
            continue;
        }

        if sender.send(line).is_err() {
            // App has shut down
            break;
        }
    }
}

fn start_console_reader(mut commands: Commands) {
    let (sender, receiver) = unbounded();

    if let Err(e) = thread::Builder::new()
        .name("console reader".into())
        .spawn(move || read_console_lines(sender))
    {
        warn!("Unable to start the console reader - console commands are disabled. ({e})");
        return;
    }

    commands.insert_resource(ConsoleInput(receiver));
}

fn forward_console_lines(input: Res<ConsoleInput>, mut mw_command: MessageWriter<ConsoleCommandSent>) {
    for line in input.0.try_iter() {
        mw_command.write(ConsoleCommandSent::new(line));
    }
}

fn handle_commands(
    settings: Res<PassiveSettings>,
    pairs: Res<PassivePairs>,
    mut print_next_tick: ResMut<PrintNextTick>,
    mut mr_command: MessageReader<ConsoleCommandSent>,
    mut mw_request: MessageWriter<RequestPassiveActivation>,
) {
    for ev in mr_command.read() {
        let command = match PassiveCommand::try_from(ev) {
            Ok(command) => command,
            Err(CommandError::Unknown(name)) => {
                info!("Unknown command '{name}'. Try passive, passiveentities or passiveprinttick.");
                continue;
            }
            Err(e) => {
                // Bad arguments are dropped without telling the user
                debug!("Ignoring '{}': {e}", ev.text);
                continue;
            }
        };

        match command {
            PassiveCommand::PrintEntities(player) => {
                if !settings.debug {
                    continue;
                }

                match pairs.dump(player) {
                    Some(dump) => info!("{dump}"),
                    None => debug!("No passive pair for player {player}"),
                }
            }
            PassiveCommand::PrintNextTick => {
                if !settings.debug {
                    continue;
                }

                print_next_tick.0 = true;
                info!("The collision changes of the next tick will be printed");
            }
            PassiveCommand::SetActivation(activation) => {
                mw_request.write(RequestPassiveActivation { activation });
            }
        }
    }
}

pub(super) fn register(app: &mut App) {
    app.add_message::<ConsoleCommandSent>()
        .add_systems(Startup, start_console_reader)
        .add_systems(
            Update,
            (forward_console_lines.run_if(resource_exists::<ConsoleInput>), handle_commands).chain(),
        );
}
