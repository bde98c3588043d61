//! Collision detection and kind-pair dispatch.
//!
//! Every unordered pair of entities is tested at most once per step. Pairs
//! are visited from the highest id down: for each `left`, every `right`
//! with a smaller id, again descending. Overlapping pairs are routed through
//! a table keyed by `(left kind, right kind)`; unregistered pairs are
//! ignored.
//!
//! Handlers see each other's updates within the same step, so collisions
//! are read from and written back to the world in one batch.

pub mod elastic;
pub mod handlers;

use glam::DVec2;
use hecs::World;

use arena_core::components::{Body, EntityId, Heading, Health, Position, Velocity};
use arena_core::config::ArenaConfig;
use arena_core::enums::EntityKind;
use arena_core::types::Bounds;

/// The slice of an entity's state that collision responses may read or change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub id: EntityId,
    pub kind: EntityKind,
    pub size: f64,
    pub mass: f64,
    pub position: DVec2,
    pub velocity: DVec2,
    pub heading: f64,
    pub health: i32,
}

/// Tuning the handlers need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRules {
    pub bullet_damage: i32,
}

impl CollisionRules {
    pub fn from_config(config: &ArenaConfig) -> Self {
        Self {
            bullet_damage: config.bullet.damage,
        }
    }
}

/// Signature of a pair handler: first participant, second participant, and
/// the displacement that separates the first from the second.
pub type HandlerFn = fn(&mut Collider, &mut Collider, DVec2, &CollisionRules);

#[derive(Clone, Copy)]
struct Dispatch {
    handler: HandlerFn,
    /// Registered for the converse order; swap arguments before calling.
    swapped: bool,
}

/// Fixed table of handlers indexed by the two kinds.
#[derive(Clone)]
pub struct HandlerRegistry {
    table: [[Option<Dispatch>; EntityKind::COUNT]; EntityKind::COUNT],
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self {
            table: [[None; EntityKind::COUNT]; EntityKind::COUNT],
        }
    }
}

impl HandlerRegistry {
    /// Registry with the arena's collision rules installed.
    pub fn standard() -> Self {
        let mut registry = Self::default();
        registry.register(EntityKind::Asteroid, EntityKind::Asteroid, handlers::asteroid_asteroid);
        registry.register(EntityKind::Bullet, EntityKind::Asteroid, handlers::bullet_asteroid);
        registry.register(EntityKind::Player, EntityKind::Asteroid, handlers::player_asteroid);
        registry
    }

    /// Install `handler` for `(first, second)`. For distinct kinds the
    /// converse order is installed too, with arguments swapped and the
    /// correction negated.
    pub fn register(&mut self, first: EntityKind, second: EntityKind, handler: HandlerFn) {
        self.table[first.index()][second.index()] = Some(Dispatch {
            handler,
            swapped: false,
        });
        if first != second {
            self.table[second.index()][first.index()] = Some(Dispatch {
                handler,
                swapped: true,
            });
        }
    }

    pub fn is_registered(&self, first: EntityKind, second: EntityKind) -> bool {
        self.table[first.index()][second.index()].is_some()
    }

    /// Call the handler for this pair. Returns false when no handler is
    /// registered.
    pub fn dispatch(
        &self,
        left: &mut Collider,
        right: &mut Collider,
        correction: DVec2,
        rules: &CollisionRules,
    ) -> bool {
        match self.table[left.kind.index()][right.kind.index()] {
            Some(Dispatch {
                handler,
                swapped: false,
            }) => {
                handler(left, right, correction, rules);
                true
            }
            Some(Dispatch {
                handler,
                swapped: true,
            }) => {
                handler(right, left, -correction, rules);
                true
            }
            None => false,
        }
    }
}

/// One overlapping pair found during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub left: EntityId,
    pub right: EntityId,
    pub handled: bool,
}

/// Owns the handler registry and runs detection over the world.
#[derive(Clone)]
pub struct CollisionResolver {
    registry: HandlerRegistry,
    rules: CollisionRules,
}

impl CollisionResolver {
    pub fn new(registry: HandlerRegistry, rules: CollisionRules) -> Self {
        Self { registry, rules }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Detect and resolve collisions across the world. Positions that
    /// separation pushed outside the arena are wrapped on write-back.
    pub fn run(&self, world: &mut World, bounds: Bounds) -> Vec<Contact> {
        let mut handles = Vec::new();
        let mut colliders = Vec::new();
        for (entity, (id, kind, body, pos, vel, heading, health)) in world.query_mut::<(
            &EntityId,
            &EntityKind,
            &Body,
            &Position,
            &Velocity,
            &Heading,
            &Health,
        )>() {
            handles.push((*id, entity));
            colliders.push(Collider {
                id: *id,
                kind: *kind,
                size: body.size,
                mass: body.mass,
                position: pos.0,
                velocity: vel.0,
                heading: heading.0,
                health: health.current,
            });
        }
        handles.sort_by_key(|(id, _)| *id);
        colliders.sort_by_key(|c| c.id);

        let contacts = self.resolve(&mut colliders);

        for ((_, entity), collider) in handles.into_iter().zip(&colliders) {
            if let Ok((pos, vel, heading, health)) = world
                .query_one_mut::<(&mut Position, &mut Velocity, &mut Heading, &mut Health)>(entity)
            {
                pos.0 = bounds.wrap(collider.position);
                vel.0 = collider.velocity;
                heading.0 = collider.heading;
                health.current = collider.health;
            }
        }
        contacts
    }

    /// Pairwise pass over colliders sorted by ascending id.
    pub fn resolve(&self, colliders: &mut [Collider]) -> Vec<Contact> {
        let mut contacts = Vec::new();
        for i in (0..colliders.len()).rev() {
            let (lower, upper) = colliders.split_at_mut(i);
            let left = &mut upper[0];
            for right in lower.iter_mut().rev() {
                let Some(correction) = overlap(left, right) else {
                    continue;
                };
                let handled = self.registry.dispatch(left, right, correction, &self.rules);
                if !handled {
                    log::trace!(
                        "no collision handler for {:?} vs {:?} ({:?}, {:?})",
                        left.kind,
                        right.kind,
                        left.id,
                        right.id
                    );
                }
                contacts.push(Contact {
                    left: left.id,
                    right: right.id,
                    handled,
                });
            }
        }
        contacts
    }
}

/// Displacement moving `left` just clear of `right`, or `None` when the
/// circles do not touch. Coincident centers separate along +x.
pub fn overlap(left: &Collider, right: &Collider) -> Option<DVec2> {
    let delta = left.position - right.position;
    let min_dist = (left.size + right.size) / 2.0;
    let dist_sq = delta.length_squared();
    if dist_sq > min_dist * min_dist {
        return None;
    }
    let angle = delta.y.atan2(delta.x);
    Some(DVec2::new(angle.cos(), angle.sin()) * (min_dist - dist_sq.sqrt()))
}
