//! Pairwise collision responses.
//!
//! A handler receives the two participants in its registered kind order and
//! the correction that moves the first one out of overlap.

use glam::DVec2;

use arena_core::types::heading_of;

use super::elastic::{self, BodyState};
use super::{Collider, CollisionRules};

fn body_state(c: &Collider) -> BodyState {
    BodyState {
        position: c.position,
        velocity: c.velocity,
        mass: c.mass,
    }
}

fn bounce(a: &mut Collider, b: &mut Collider) {
    let (va, vb) = elastic::resolve(body_state(a), body_state(b));
    a.velocity = va;
    b.velocity = vb;
}

/// Asteroids separate and bounce. Neither takes damage.
pub fn asteroid_asteroid(a: &mut Collider, b: &mut Collider, correction: DVec2, _: &CollisionRules) {
    a.position += correction;
    bounce(a, b);
    a.heading = heading_of(a.velocity);
    b.heading = heading_of(b.velocity);
}

/// The bullet is spent; the asteroid takes damage and absorbs the bullet's
/// momentum.
pub fn bullet_asteroid(
    bullet: &mut Collider,
    asteroid: &mut Collider,
    _: DVec2,
    rules: &CollisionRules,
) {
    asteroid.health -= rules.bullet_damage;
    bullet.health = 0;
    let total = asteroid.mass + bullet.mass;
    if total > 0.0 {
        asteroid.velocity =
            (asteroid.velocity * asteroid.mass + bullet.velocity * bullet.mass) / total;
    }
    asteroid.heading = heading_of(asteroid.velocity);
}

/// Ship and rock bounce apart and each loses health equal to the other's mass.
pub fn player_asteroid(
    player: &mut Collider,
    asteroid: &mut Collider,
    correction: DVec2,
    _: &CollisionRules,
) {
    player.position += correction;
    bounce(player, asteroid);
    asteroid.heading = heading_of(asteroid.velocity);
    player.health -= mass_damage(asteroid.mass);
    asteroid.health -= mass_damage(player.mass);
}

/// Health is integral; fractional masses round to the nearest point.
fn mass_damage(mass: f64) -> i32 {
    mass.round() as i32
}
