//! Simulation engine for the asteroid arena.
//!
//! Owns the hecs ECS world, runs the systems once per tick in a fixed
//! order, and turns world state into snapshots and per-tick deltas.

pub mod counters;
pub mod delta;
pub mod engine;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use arena_core as core;
pub use engine::SimulationEngine;
