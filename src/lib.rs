//! Trinity engine library.
//!
//! Exposes the board representation, trinity detection, the game state
//! machine and the text protocol for use by integration tests and the
//! binary entry point.

pub mod board;
pub mod config;
pub mod detect;
pub mod engine;
pub mod error;
pub mod game;
pub mod protocol;
