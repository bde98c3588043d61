//! Kinematic integration: acceleration, speed clamp, friction, motion, wrap.

use glam::DVec2;
use hecs::World;

use arena_core::components::{Acceleration, Body, Position, Velocity};
use arena_core::types::Bounds;

/// Integrate every moving entity over `dt_ms`.
pub fn run(world: &mut World, bounds: Bounds, snap_speed: f64, dt_ms: f64) {
    for (_entity, (body, accel, vel, pos)) in
        world.query_mut::<(&Body, &Acceleration, &mut Velocity, &mut Position)>()
    {
        vel.0 = step_velocity(body, accel.0, vel.0, snap_speed, dt_ms);
        pos.0 = bounds.wrap(pos.0 + vel.0 * dt_ms);
    }
}

/// New velocity after one step. Speed never exceeds `max_speed`, and
/// friction never reverses direction.
pub fn step_velocity(
    body: &Body,
    accel: DVec2,
    velocity: DVec2,
    snap_speed: f64,
    dt_ms: f64,
) -> DVec2 {
    let mut v = velocity + accel * dt_ms;
    let mut speed = v.length();
    if speed > body.max_speed {
        v = v / speed * body.max_speed.max(0.0);
        speed = body.max_speed.max(0.0);
    }

    if body.friction > 0.0 && accel == DVec2::ZERO {
        if speed > snap_speed {
            let slowed = (speed - body.friction * dt_ms).max(0.0);
            v = v / speed * slowed;
        } else {
            v = DVec2::ZERO;
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn body(max_speed: f64, friction: f64) -> Body {
        Body {
            size: 10.0,
            mass: 1.0,
            max_speed,
            friction,
        }
    }

    #[test]
    fn speed_is_clamped() {
        let v = step_velocity(&body(0.45, 0.0), DVec2::new(1.0, 0.0), DVec2::ZERO, 0.0025, 10.0);
        assert_relative_eq!(v.length(), 0.45);
    }

    #[test]
    fn friction_slows_but_never_reverses() {
        let b = body(1.0, 0.00015);
        let v = step_velocity(&b, DVec2::ZERO, DVec2::new(0.1, 0.0), 0.0025, 100.0);
        assert_relative_eq!(v.x, 0.085, epsilon = 1e-12);

        let v = step_velocity(&b, DVec2::ZERO, DVec2::new(0.003, 0.0), 0.0025, 1000.0);
        assert_eq!(v, DVec2::ZERO);

        let v = step_velocity(&b, DVec2::ZERO, DVec2::new(0.002, 0.0), 0.0025, 1.0);
        assert_eq!(v, DVec2::ZERO, "below snap speed coasts to a stop");
    }

    #[test]
    fn thrust_disables_friction() {
        let b = body(1.0, 0.5);
        let v = step_velocity(&b, DVec2::new(0.001, 0.0), DVec2::new(0.1, 0.0), 0.0025, 10.0);
        assert_relative_eq!(v.x, 0.11, epsilon = 1e-12);
    }

    #[test]
    fn positions_wrap() {
        let mut world = World::new();
        let e = world.spawn((
            body(1.0, 0.0),
            Acceleration(DVec2::ZERO),
            Velocity(DVec2::new(0.5, -0.5)),
            Position(DVec2::new(795.0, 2.0)),
        ));
        run(&mut world, Bounds::new(800.0, 400.0), 0.0025, 20.0);
        let pos = world.get::<&Position>(e).unwrap().0;
        assert_relative_eq!(pos.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(pos.y, 392.0, epsilon = 1e-9);
    }
}
