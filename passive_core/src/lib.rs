//! Passive mode for multiplayer sessions.
//!
//! A player with passive mode on can't collide with other players, their vehicles or whatever
//! those vehicles are towing, and everything they can't touch is drawn faded.

pub mod ecs;
pub mod entities;
pub mod passive;
pub mod physics;
pub mod plugin;
pub mod settings;
pub mod simulation;
