//! Wire state: what observers and controllers receive each tick.

use serde::{Deserialize, Serialize};

use crate::components::EntityId;
use crate::enums::EntityKind;
use crate::types::{ClientId, Vector};

/// One entity as seen through its transmit mask. Fields the mask hides are
/// `None` and omitted from JSON. The same shape carries deltas, where `None`
/// additionally means "unchanged since last tick".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntityKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(default, rename = "pos", skip_serializing_if = "Option::is_none")]
    pub position: Option<Vector>,
    #[serde(default, rename = "v", skip_serializing_if = "Option::is_none")]
    pub velocity: Option<Vector>,
    #[serde(default, rename = "a", skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<Vector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<i32>,
    #[serde(default, rename = "maxHealth", skip_serializing_if = "Option::is_none")]
    pub max_health: Option<i32>,
    #[serde(default, rename = "despawnTime", skip_serializing_if = "Option::is_none")]
    pub despawn_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<EntityId>,
}

impl EntityView {
    /// A record carrying only the id.
    pub fn bare(id: EntityId) -> Self {
        Self {
            id,
            kind: None,
            name: None,
            size: None,
            heading: None,
            position: None,
            velocity: None,
            acceleration: None,
            friction: None,
            health: None,
            max_health: None,
            despawn_time: None,
            owner: None,
        }
    }

    /// True when nothing but the id is present.
    pub fn is_bare(&self) -> bool {
        *self == Self::bare(self.id)
    }
}

/// Full transmissible world state, ordered by entity id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub entities: Vec<EntityView>,
    #[serde(rename = "xMax")]
    pub x_max: f64,
    #[serde(rename = "yMax")]
    pub y_max: f64,
}

/// Changes since the previous snapshot. Every live entity has an entry;
/// removed entities have none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldDelta {
    pub entities: Vec<EntityView>,
}

/// A controller's view of its own player, sent uncompressed every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    /// Milliseconds until the next shot.
    #[serde(rename = "nextShot")]
    pub next_shot: f64,
    /// Milliseconds until respawn; zero while alive.
    #[serde(rename = "respawnTime")]
    pub respawn_time: f64,
    pub health: i32,
    #[serde(rename = "maxHealth")]
    pub max_health: i32,
    #[serde(rename = "a")]
    pub acceleration: Vector,
    pub heading: f64,
}

/// Everything the simulation sends toward the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    /// Full state, sent to an observer when it connects.
    Snapshot(WorldSnapshot),
    /// Per-tick change set for observers.
    Delta(WorldDelta),
    /// Per-tick status for a controller.
    Status(PlayerStatus),
}

/// A message addressed to one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outbound {
    pub client: ClientId,
    pub message: ServerMessage,
}
