//! Lifecycle handling for entities whose health ran out.
//!
//! Players stay in the world as `PlayerDead` until the respawn system
//! revives them. Asteroids are removed and big ones split in two. Bullets
//! are removed and returned to their owner's budget.

use glam::DVec2;
use hecs::World;

use arena_core::components::*;
use arena_core::config::ArenaConfig;
use arena_core::enums::EntityKind;

use crate::counters::WorldCounters;
use crate::world_setup;

/// What one death pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeathReport {
    pub players_killed: Vec<EntityId>,
    pub asteroids_destroyed: Vec<EntityId>,
    /// Children spawned by splits.
    pub fragments: Vec<EntityId>,
    pub bullets_spent: Vec<EntityId>,
}

pub fn run(world: &mut World, counters: &mut WorldCounters, config: &ArenaConfig) -> DeathReport {
    let mut destroyed: Vec<(EntityId, hecs::Entity, EntityKind)> = world
        .query_mut::<(&EntityId, &EntityKind, &Health)>()
        .into_iter()
        .filter(|(_, (_, _, health))| health.is_destroyed())
        .map(|(entity, (id, kind, _))| (*id, entity, *kind))
        .collect();
    destroyed.sort_by(|a, b| b.0.cmp(&a.0));

    let mut report = DeathReport::default();
    for (id, entity, kind) in destroyed {
        match kind {
            EntityKind::Player => {
                kill_player(world, entity, config.player.respawn_delay_ms);
                log::debug!("player {id:?} destroyed");
                report.players_killed.push(id);
            }
            EntityKind::Asteroid => {
                let fragments = destroy_asteroid(world, counters, config, entity);
                log::debug!("asteroid {id:?} destroyed, {} fragments", fragments.len());
                report.asteroids_destroyed.push(id);
                report.fragments.extend(fragments);
            }
            EntityKind::Bullet => {
                let owner = world.get::<&Owner>(entity).ok().map(|o| o.0);
                let _ = world.despawn(entity);
                if let Some(owner) = owner {
                    world_setup::release_bullet(world, owner);
                }
                report.bullets_spent.push(id);
            }
            // Dead players carry max health 0 and never qualify.
            EntityKind::PlayerDead => {}
        }
    }
    report
}

fn kill_player(world: &mut World, entity: hecs::Entity, respawn_delay_ms: f64) {
    if let Ok((kind, health, vel, accel)) = world.query_one_mut::<(
        &mut EntityKind,
        &mut Health,
        &mut Velocity,
        &mut Acceleration,
    )>(entity)
    {
        *kind = EntityKind::PlayerDead;
        health.max = 0;
        vel.0 = DVec2::ZERO;
        accel.0 = DVec2::ZERO;
    }
    let _ = world.insert_one(
        entity,
        RespawnTimer {
            remaining_ms: respawn_delay_ms,
        },
    );
}

fn destroy_asteroid(
    world: &mut World,
    counters: &mut WorldCounters,
    config: &ArenaConfig,
    entity: hecs::Entity,
) -> Vec<EntityId> {
    let parent = world
        .query_one_mut::<(&Position, &Velocity, &Heading, &Body)>(entity)
        .ok()
        .map(|(pos, vel, heading, body)| (pos.0, vel.0.length(), heading.0, body.size));
    let _ = world.despawn(entity);
    counters.asteroid_count = counters.asteroid_count.saturating_sub(1);

    let Some((position, speed, heading, size)) = parent else {
        return Vec::new();
    };
    let settings = &config.asteroid;
    if size <= settings.small_size {
        return Vec::new();
    }
    [settings.split_heading_offset, -settings.split_heading_offset]
        .into_iter()
        .map(|offset| {
            let (_, id) = world_setup::spawn_asteroid(
                world,
                counters,
                settings,
                false,
                position,
                (heading + offset).rem_euclid(360.0),
                speed,
            );
            id
        })
        .collect()
}
