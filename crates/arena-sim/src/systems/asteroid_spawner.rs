//! Keeps the arena stocked with asteroids.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use arena_core::components::EntityId;
use arena_core::config::ArenaConfig;

use crate::counters::WorldCounters;
use crate::world_setup;

/// Place one big asteroid when the cooldown has elapsed and the arena is
/// below its cap.
pub fn run(
    world: &mut World,
    counters: &mut WorldCounters,
    rng: &mut ChaCha8Rng,
    config: &ArenaConfig,
    dt_ms: f64,
) -> Option<EntityId> {
    counters.spawn_cooldown_ms = (counters.spawn_cooldown_ms - dt_ms).max(0.0);
    if counters.asteroid_count >= config.asteroid.max_count || counters.spawn_cooldown_ms > 0.0 {
        return None;
    }
    let (_, id) = world_setup::spawn_random_asteroid(world, counters, rng, config);
    counters.spawn_cooldown_ms = config.asteroid.spawn_interval_ms;
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn spawns_on_cooldown_until_capped() {
        let mut world = World::new();
        let mut counters = WorldCounters::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut config = ArenaConfig::default();
        config.asteroid.max_count = 2;

        assert!(run(&mut world, &mut counters, &mut rng, &config, 10.0).is_some());
        assert_eq!(counters.spawn_cooldown_ms, config.asteroid.spawn_interval_ms);
        assert!(run(&mut world, &mut counters, &mut rng, &config, 10.0).is_none());

        let interval = config.asteroid.spawn_interval_ms;
        assert!(run(&mut world, &mut counters, &mut rng, &config, interval).is_some());
        assert!(run(&mut world, &mut counters, &mut rng, &config, interval).is_none());
        assert_eq!(counters.asteroid_count, 2);
    }
}
