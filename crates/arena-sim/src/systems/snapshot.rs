//! Snapshot builder. Projects the ECS world through each entity's
//! transmit mask.
//!
//! Read-only: takes `&World` and produces an owned `WorldSnapshot` that
//! shares no storage with the world.

use hecs::{EntityRef, World};

use arena_core::components::*;
use arena_core::enums::{EntityKind, Field, TransmitMask};
use arena_core::state::{EntityView, PlayerStatus, WorldSnapshot};
use arena_core::types::{Bounds, Vector};

/// Build the full transmissible state, ordered by entity id.
pub fn build_snapshot(world: &World, bounds: Bounds) -> WorldSnapshot {
    let mut entities: Vec<EntityView> = world.iter().filter_map(|e| build_view(&e)).collect();
    entities.sort_by_key(|view| view.id);
    WorldSnapshot {
        entities,
        x_max: bounds.x_max,
        y_max: bounds.y_max,
    }
}

/// One entity's masked view. Entities without an id or mask are not
/// transmitted.
pub fn build_view(entity: &EntityRef<'_>) -> Option<EntityView> {
    let id = *entity.get::<&EntityId>()?;
    let mask = *entity.get::<&TransmitMask>()?;
    let body = entity.get::<&Body>().map(|b| *b);
    let health = entity.get::<&Health>().map(|h| *h);

    let mut view = EntityView::bare(id);
    for field in mask.fields() {
        match field {
            Field::Id => {}
            Field::Kind => view.kind = entity.get::<&EntityKind>().map(|k| *k),
            Field::Name => view.name = entity.get::<&Name>().map(|n| n.0.clone()),
            Field::Size => view.size = body.map(|b| b.size),
            Field::Friction => view.friction = body.map(|b| b.friction),
            Field::Heading => view.heading = entity.get::<&Heading>().map(|h| h.0),
            Field::Position => view.position = entity.get::<&Position>().map(|p| Vector::from(p.0)),
            Field::Velocity => view.velocity = entity.get::<&Velocity>().map(|v| Vector::from(v.0)),
            Field::Acceleration => {
                view.acceleration = entity.get::<&Acceleration>().map(|a| Vector::from(a.0))
            }
            Field::Health => view.health = health.map(|h| h.current),
            Field::MaxHealth => view.max_health = health.map(|h| h.max),
            Field::DespawnTime => view.despawn_time = entity.get::<&Lifetime>().map(|l| l.despawn_ms),
            Field::Owner => view.owner = entity.get::<&Owner>().map(|o| o.0),
        }
    }
    Some(view)
}

/// Status record for a controller's player.
pub fn player_status(world: &World, entity: hecs::Entity) -> Option<PlayerStatus> {
    let entity = world.entity(entity).ok()?;
    let health = *entity.get::<&Health>()?;
    Some(PlayerStatus {
        next_shot: entity.get::<&Weapon>().map_or(0.0, |w| w.next_shot_ms),
        respawn_time: entity
            .get::<&RespawnTimer>()
            .map_or(0.0, |t| t.remaining_ms),
        health: health.current,
        max_health: health.max,
        acceleration: entity
            .get::<&Acceleration>()
            .map(|a| Vector::from(a.0))
            .unwrap_or_default(),
        heading: entity.get::<&Heading>().map_or(0.0, |h| h.0),
    })
}
