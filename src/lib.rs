//! Term Snake - the classic Snake game in a terminal
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - The persisted all-time record (record module)
//! - TUI rendering and input mapping (render, input modules)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod modes;
pub mod record;
pub mod render;
