//! Weapon cooldowns and firing.

use hecs::World;

use arena_core::components::*;
use arena_core::config::ArenaConfig;
use arena_core::types::heading_to_unit;

use crate::counters::WorldCounters;
use crate::world_setup::{self, Shot};

/// Tick cooldowns and fire for every armed entity that may. Returns the
/// ids of the new bullets.
pub fn run(
    world: &mut World,
    counters: &mut WorldCounters,
    config: &ArenaConfig,
    dt_ms: f64,
) -> Vec<EntityId> {
    let bullet = &config.bullet;
    let max_bullets = config.player.max_bullets;

    let mut shots = Vec::new();
    for (_entity, (id, weapon, control, health, body, heading, pos, vel)) in world.query_mut::<(
        &EntityId,
        &mut Weapon,
        &ControlState,
        &Health,
        &Body,
        &Heading,
        &Position,
        &Velocity,
    )>() {
        weapon.next_shot_ms = (weapon.next_shot_ms - dt_ms).max(0.0);
        let ready = weapon.next_shot_ms <= 0.0 && weapon.live_bullets < max_bullets;
        if !(control.shoot && health.is_alive() && ready) {
            continue;
        }
        let direction = heading_to_unit(heading.0);
        shots.push(Shot {
            owner: *id,
            position: pos.0 + direction * body.radius(),
            velocity: vel.0 + direction * bullet.speed,
            heading: heading.0,
        });
        weapon.next_shot_ms = bullet.time_between_shots_ms;
        weapon.live_bullets += 1;
    }

    let bounds = config.bounds();
    shots
        .into_iter()
        .map(|shot| world_setup::spawn_bullet(world, counters, config, bounds, shot).1)
        .collect()
}
