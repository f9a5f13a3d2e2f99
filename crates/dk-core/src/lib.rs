//! dk-core: Core game logic for a dungeon-keeper roguelike
//!
//! This crate contains all game logic with no I/O dependencies.
//! It is designed to be pure and testable: narration, sounds and game
//! events are recorded on [`GameState`] rather than printed or played.
//!
//! The centerpiece is [`furniture::usage`], which resolves and executes
//! the interactive behavior of world furniture (chests, portals, thrones,
//! stairs, ...) on behalf of an acting creature.

pub mod collective;
pub mod content;
pub mod creature;
pub mod effect;
pub mod event;
pub mod furniture;
pub mod item;
pub mod world;

mod consts;
mod gamestate;
mod rng;

pub use consts::*;
pub use gamestate::GameState;
pub use rng::GameRng;
