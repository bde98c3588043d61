//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behavior beyond small
//! accessors. Game logic lives in systems, not components.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::EntityKind;

/// Process-unique entity identifier. Assigned from a monotonically
/// increasing counter and never reused. Distinct from the hecs handle,
/// whose slots are recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

/// Display name (players only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Name(pub String);

/// Physical properties that systems read but rarely change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Diameter. Collision radius is `size / 2`.
    pub size: f64,
    pub mass: f64,
    pub max_speed: f64,
    /// Deceleration per millisecond applied while not thrusting.
    pub friction: f64,
}

impl Body {
    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }
}

/// Facing in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Heading(pub f64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec2);

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub DVec2);

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Acceleration(pub DVec2);

/// Hit points. `max == 0` marks an inert entity that the death system skips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Dead and eligible for death processing.
    pub fn is_destroyed(&self) -> bool {
        self.current <= 0 && self.max > 0
    }
}

/// Input flags, written only by the owning controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

/// Firing state of an armed entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Milliseconds until the next shot is allowed.
    pub next_shot_ms: f64,
    /// Bullets fired by this entity that are still alive.
    pub live_bullets: u32,
}

/// Countdown until a bullet despawns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifetime {
    pub despawn_ms: f64,
}

/// Back-reference from a bullet to the entity that fired it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner(pub EntityId);

/// Countdown until a dead player respawns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RespawnTimer {
    pub remaining_ms: f64,
}

/// Fully specified construction input for a new entity. Start from
/// `EntityTemplate::default()` and override fields by name.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityTemplate {
    pub kind: EntityKind,
    pub name: Option<String>,
    pub size: f64,
    pub mass: f64,
    pub heading: f64,
    pub position: DVec2,
    pub velocity: DVec2,
    pub acceleration: DVec2,
    pub max_speed: f64,
    pub friction: f64,
    pub health: i32,
    pub max_health: i32,
    /// Attach `ControlState` and `Weapon`.
    pub controllable: bool,
    /// Attach `Lifetime`.
    pub despawn_ms: Option<f64>,
    /// Attach `Owner`.
    pub owner: Option<EntityId>,
}

impl Default for EntityTemplate {
    fn default() -> Self {
        Self {
            kind: EntityKind::Asteroid,
            name: None,
            size: DEFAULT_SIZE,
            mass: DEFAULT_MASS,
            heading: 0.0,
            position: DVec2::new(DEFAULT_POSITION.0, DEFAULT_POSITION.1),
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            max_speed: 0.0,
            friction: 0.0,
            health: DEFAULT_HEALTH,
            max_health: DEFAULT_HEALTH,
            controllable: false,
            despawn_ms: None,
            owner: None,
        }
    }
}
