//! Counts down bullet lifetimes and removes expired bullets.

use hecs::World;

use arena_core::components::{EntityId, Lifetime, Owner};

use crate::world_setup;

/// Returns the ids of the bullets removed this step.
pub fn run(world: &mut World, dt_ms: f64) -> Vec<EntityId> {
    let mut expired = Vec::new();
    for (entity, (id, lifetime, owner)) in
        world.query_mut::<(&EntityId, &mut Lifetime, Option<&Owner>)>()
    {
        lifetime.despawn_ms = (lifetime.despawn_ms - dt_ms).max(0.0);
        if lifetime.despawn_ms <= 0.0 {
            expired.push((*id, entity, owner.map(|o| o.0)));
        }
    }

    expired.sort_by(|a, b| b.0.cmp(&a.0));
    expired
        .into_iter()
        .map(|(id, entity, owner)| {
            let _ = world.despawn(entity);
            if let Some(owner) = owner {
                world_setup::release_bullet(world, owner);
            }
            id
        })
        .collect()
}
