//! Arena server process.
//!
//! Runs the simulation engine on its own thread at a fixed rate and bridges
//! client traffic to it as JSON lines over stdio.

pub mod bridge;
pub mod game_loop;
pub mod state;

pub use arena_core as core;
