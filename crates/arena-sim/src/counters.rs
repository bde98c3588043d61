//! World-scoped counters, passed explicitly into the systems that need them.

use arena_core::components::EntityId;

/// Counters that outlive any single entity.
#[derive(Debug, Clone, Default)]
pub struct WorldCounters {
    next_id: u64,
    /// Live entities of kind `Asteroid`.
    pub asteroid_count: u32,
    /// Milliseconds until the spawner may place another asteroid.
    pub spawn_cooldown_ms: f64,
}

impl WorldCounters {
    /// Hand out the next entity id. Ids are never reused.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The id the next allocation will return.
    pub fn peek_next_id(&self) -> EntityId {
        EntityId(self.next_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let mut counters = WorldCounters::default();
        let a = counters.allocate_id();
        let b = counters.allocate_id();
        assert_eq!(a, EntityId(0));
        assert_eq!(b, EntityId(1));
        assert_eq!(counters.peek_next_id(), EntityId(2));
    }
}
