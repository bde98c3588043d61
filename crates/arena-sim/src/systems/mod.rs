//! ECS systems that operate on the arena world each tick.
//!
//! Systems are plain functions taking `&mut World` plus whatever counters,
//! settings and elapsed time they need. The engine calls them in a fixed
//! order; see `SimulationEngine::tick`.

pub mod asteroid_spawner;
pub mod bullet_expiry;
pub mod collision;
pub mod death;
pub mod motion_control;
pub mod physics;
pub mod respawn;
pub mod shoot_control;
pub mod snapshot;
