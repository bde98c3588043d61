//! Brings dead players back once their timer runs out.

use glam::DVec2;
use hecs::World;

use arena_core::components::*;
use arena_core::config::PlayerSettings;
use arena_core::enums::EntityKind;

use crate::world_setup;

/// Returns the ids of players revived this step.
pub fn run(world: &mut World, player: &PlayerSettings, dt_ms: f64) -> Vec<EntityId> {
    let mut ready = Vec::new();
    for (entity, (id, kind, timer, health)) in
        world.query_mut::<(&EntityId, &EntityKind, &mut RespawnTimer, &Health)>()
    {
        if *kind != EntityKind::PlayerDead {
            continue;
        }
        timer.remaining_ms = (timer.remaining_ms - dt_ms).max(0.0);
        if health.current <= 0 && timer.remaining_ms <= 0.0 {
            ready.push((entity, *id));
        }
    }

    for (entity, id) in &ready {
        // Bullets fired before death may outlive the timer.
        let live = world_setup::count_bullets(world, *id);
        if let Ok((kind, body, health, pos, vel, weapon)) = world.query_one_mut::<(
            &mut EntityKind,
            &Body,
            &mut Health,
            &mut Position,
            &mut Velocity,
            Option<&mut Weapon>,
        )>(*entity)
        {
            *kind = EntityKind::Player;
            *health = Health::full(player.max_health);
            pos.0 = DVec2::splat(body.radius());
            vel.0 = DVec2::ZERO;
            if let Some(weapon) = weapon {
                weapon.live_bullets = live;
            }
        }
        let _ = world.remove_one::<RespawnTimer>(*entity);
        log::debug!("player {id:?} respawned");
    }
    ready.into_iter().map(|(_, id)| id).collect()
}
