//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it one tick at a time.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::{GameConfig, MAX_FIELD_SIZE};
pub use direction::Direction;
pub use engine::{GameEngine, StepOutcome};
pub use state::{Cell, CollisionType, GamePhase, GameState, Snake};
