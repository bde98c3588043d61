//! Entity spawn factories.
//!
//! Every entity is built from an `EntityTemplate` through `spawn_entity`,
//! which assigns the id, attaches the optional components the template asks
//! for, and checks the transmit mask against what was attached.

use glam::DVec2;
use hecs::{EntityBuilder, EntityRef, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use arena_core::components::*;
use arena_core::config::{ArenaConfig, AsteroidSettings};
use arena_core::enums::{EntityKind, Field, TransmitMask};
use arena_core::types::{heading_to_unit, Bounds};

use crate::counters::WorldCounters;

/// Spawn one entity from a template. Returns the hecs handle and the
/// assigned id.
pub fn spawn_entity(
    world: &mut World,
    counters: &mut WorldCounters,
    template: EntityTemplate,
    mask: TransmitMask,
) -> (hecs::Entity, EntityId) {
    let id = counters.allocate_id();

    let mut builder = EntityBuilder::new();
    builder
        .add(id)
        .add(template.kind)
        .add(mask)
        .add(Body {
            size: template.size,
            mass: template.mass,
            max_speed: template.max_speed,
            friction: template.friction,
        })
        .add(Heading(template.heading))
        .add(Position(template.position))
        .add(Velocity(template.velocity))
        .add(Acceleration(template.acceleration))
        .add(Health {
            current: template.health,
            max: template.max_health,
        });
    if let Some(name) = template.name {
        builder.add(Name(name));
    }
    if template.controllable {
        builder.add(ControlState::default()).add(Weapon::default());
    }
    if let Some(despawn_ms) = template.despawn_ms {
        builder.add(Lifetime { despawn_ms });
    }
    if let Some(owner) = template.owner {
        builder.add(Owner(owner));
    }

    let entity = world.spawn(builder.build());
    if let Ok(entity_ref) = world.entity(entity) {
        for field in mask.fields() {
            if !carries(&entity_ref, field) {
                log::warn!("entity {id:?} transmits {field:?} but has no such component");
            }
        }
    }
    (entity, id)
}

/// Whether the entity has the component backing a transmittable field.
pub fn carries(entity: &EntityRef<'_>, field: Field) -> bool {
    match field {
        Field::Id => entity.has::<EntityId>(),
        Field::Kind => entity.has::<EntityKind>(),
        Field::Name => entity.has::<Name>(),
        Field::Size | Field::Friction => entity.has::<Body>(),
        Field::Heading => entity.has::<Heading>(),
        Field::Position => entity.has::<Position>(),
        Field::Velocity => entity.has::<Velocity>(),
        Field::Acceleration => entity.has::<Acceleration>(),
        Field::Health | Field::MaxHealth => entity.has::<Health>(),
        Field::DespawnTime => entity.has::<Lifetime>(),
        Field::Owner => entity.has::<Owner>(),
    }
}

/// Spawn a controllable player in the arena's top-left corner.
pub fn spawn_player(
    world: &mut World,
    counters: &mut WorldCounters,
    config: &ArenaConfig,
) -> (hecs::Entity, EntityId) {
    let player = &config.player;
    let template = EntityTemplate {
        kind: EntityKind::Player,
        name: Some(arena_core::constants::DEFAULT_NAME.to_string()),
        size: player.size,
        mass: player.mass,
        position: DVec2::splat(player.size / 2.0),
        max_speed: player.max_speed,
        friction: player.friction,
        health: player.max_health,
        max_health: player.max_health,
        controllable: true,
        ..Default::default()
    };
    let spawned = spawn_entity(world, counters, template, TransmitMask::player());
    log::debug!("spawned player {:?}", spawned.1);
    spawned
}

/// Spawn an asteroid moving along `heading` and count it.
pub fn spawn_asteroid(
    world: &mut World,
    counters: &mut WorldCounters,
    settings: &AsteroidSettings,
    big: bool,
    position: DVec2,
    heading: f64,
    speed: f64,
) -> (hecs::Entity, EntityId) {
    let (size, mass, health) = if big {
        (settings.big_size, settings.big_mass, settings.big_health)
    } else {
        (settings.small_size, settings.small_mass, settings.small_health)
    };
    let template = EntityTemplate {
        kind: EntityKind::Asteroid,
        size,
        mass,
        heading,
        position,
        velocity: heading_to_unit(heading) * speed,
        max_speed: settings.max_speed,
        health,
        max_health: health,
        ..Default::default()
    };
    counters.asteroid_count += 1;
    spawn_entity(world, counters, template, TransmitMask::default())
}

/// Spawn a big asteroid at a random position with a random heading.
pub fn spawn_random_asteroid(
    world: &mut World,
    counters: &mut WorldCounters,
    rng: &mut ChaCha8Rng,
    config: &ArenaConfig,
) -> (hecs::Entity, EntityId) {
    let bounds = config.bounds();
    let position = DVec2::new(
        rng.gen_range(0.0..bounds.x_max),
        rng.gen_range(0.0..bounds.y_max),
    );
    let heading = rng.gen_range(0.0..360.0);
    spawn_asteroid(
        world,
        counters,
        &config.asteroid,
        true,
        position,
        heading,
        config.asteroid.speed,
    )
}

/// A shot decided by the shoot system, not yet in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub owner: EntityId,
    pub position: DVec2,
    pub velocity: DVec2,
    pub heading: f64,
}

/// Spawn the bullet for a shot. The caller has already charged the
/// owner's weapon.
pub fn spawn_bullet(
    world: &mut World,
    counters: &mut WorldCounters,
    config: &ArenaConfig,
    bounds: Bounds,
    shot: Shot,
) -> (hecs::Entity, EntityId) {
    let bullet = &config.bullet;
    let template = EntityTemplate {
        kind: EntityKind::Bullet,
        size: bullet.size,
        mass: bullet.mass,
        heading: shot.heading,
        position: bounds.wrap(shot.position),
        velocity: shot.velocity,
        max_speed: bullet.max_speed,
        health: 1,
        max_health: 1,
        despawn_ms: Some(bullet.lifetime_ms),
        owner: Some(shot.owner),
        ..Default::default()
    };
    spawn_entity(world, counters, template, TransmitMask::bullet())
}

/// Look up the hecs handle for an entity id.
pub fn find_entity(world: &World, id: EntityId) -> Option<hecs::Entity> {
    world
        .query::<&EntityId>()
        .iter()
        .find(|(_, candidate)| **candidate == id)
        .map(|(entity, _)| entity)
}

/// Give a bullet back to its owner's budget. A missing owner is fine: the
/// controller may have disconnected.
pub fn release_bullet(world: &mut World, owner: EntityId) {
    let Some(entity) = find_entity(world, owner) else {
        return;
    };
    if let Ok(mut weapon) = world.get::<&mut Weapon>(entity) {
        weapon.live_bullets = weapon.live_bullets.saturating_sub(1);
    }
}

/// Number of live bullets owned by `owner`.
pub fn count_bullets(world: &World, owner: EntityId) -> u32 {
    world
        .query::<&Owner>()
        .iter()
        .filter(|(_, o)| o.0 == owner)
        .count() as u32
}
