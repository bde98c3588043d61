//! Per-tick delta encoding.
//!
//! Each entity in the current snapshot gets an entry with its id and every
//! field whose value differs from the previous snapshot. Entities new since
//! the previous snapshot are sent whole. Entities that disappeared get no
//! entry; clients infer removal from absence.

use std::collections::HashMap;

use arena_core::components::EntityId;
use arena_core::state::{EntityView, WorldDelta, WorldSnapshot};

pub fn encode_delta(previous: &WorldSnapshot, current: &WorldSnapshot) -> WorldDelta {
    let previous: HashMap<EntityId, &EntityView> =
        previous.entities.iter().map(|view| (view.id, view)).collect();
    WorldDelta {
        entities: current
            .entities
            .iter()
            .map(|view| diff_entity(previous.get(&view.id).copied(), view))
            .collect(),
    }
}

/// Changed fields of one entity. A field that vanished from `current` is
/// not reported.
pub fn diff_entity(previous: Option<&EntityView>, current: &EntityView) -> EntityView {
    let Some(previous) = previous else {
        return current.clone();
    };
    EntityView {
        id: current.id,
        kind: changed(&previous.kind, &current.kind),
        name: changed(&previous.name, &current.name),
        size: changed(&previous.size, &current.size),
        heading: changed(&previous.heading, &current.heading),
        position: changed(&previous.position, &current.position),
        velocity: changed(&previous.velocity, &current.velocity),
        acceleration: changed(&previous.acceleration, &current.acceleration),
        friction: changed(&previous.friction, &current.friction),
        health: changed(&previous.health, &current.health),
        max_health: changed(&previous.max_health, &current.max_health),
        despawn_time: changed(&previous.despawn_time, &current.despawn_time),
        owner: changed(&previous.owner, &current.owner),
    }
}

fn changed<T: Clone + PartialEq>(previous: &Option<T>, current: &Option<T>) -> Option<T> {
    if previous == current {
        None
    } else {
        current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::enums::EntityKind;
    use arena_core::types::Vector;

    fn view(id: u64, health: i32, x: f64) -> EntityView {
        EntityView {
            kind: Some(EntityKind::Asteroid),
            health: Some(health),
            position: Some(Vector { x, y: 1.0 }),
            ..EntityView::bare(EntityId(id))
        }
    }

    fn snapshot(entities: Vec<EntityView>) -> WorldSnapshot {
        WorldSnapshot {
            entities,
            x_max: 800.0,
            y_max: 400.0,
        }
    }

    #[test]
    fn only_changed_fields_are_sent() {
        let before = snapshot(vec![view(1, 100, 5.0)]);
        let after = snapshot(vec![view(1, 90, 5.0)]);
        let delta = encode_delta(&before, &after);
        assert_eq!(
            delta.entities,
            vec![EntityView {
                health: Some(90),
                ..EntityView::bare(EntityId(1))
            }]
        );
    }

    #[test]
    fn unchanged_entity_keeps_bare_entry() {
        let state = snapshot(vec![view(1, 100, 5.0)]);
        let delta = encode_delta(&state, &state);
        assert_eq!(delta.entities.len(), 1);
        assert!(delta.entities[0].is_bare());
    }

    #[test]
    fn new_entities_sent_whole_and_removed_omitted() {
        let before = snapshot(vec![view(1, 100, 5.0), view(2, 100, 5.0)]);
        let after = snapshot(vec![view(2, 100, 6.0), view(3, 60, 0.0)]);
        let delta = encode_delta(&before, &after);
        let ids: Vec<u64> = delta.entities.iter().map(|v| v.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(delta.entities[0].position, Some(Vector { x: 6.0, y: 1.0 }));
        assert_eq!(delta.entities[0].health, None);
        assert_eq!(delta.entities[1], view(3, 60, 0.0));
    }

    #[test]
    fn first_delta_from_empty_is_full() {
        let after = snapshot(vec![view(4, 20, 2.0)]);
        let delta = encode_delta(&WorldSnapshot::default(), &after);
        assert_eq!(delta.entities, after.entities);
    }
}
