//! Turns and thrust from player input.

use glam::DVec2;
use hecs::World;

use arena_core::components::{Acceleration, ControlState, Heading, Health};
use arena_core::config::PlayerSettings;
use arena_core::types::heading_to_unit;

/// Apply input flags to every living entity. Entities without input, and
/// dead ones, end the step with zero acceleration.
pub fn run(world: &mut World, player: &PlayerSettings, dt_ms: f64) {
    for (_entity, (health, heading, accel, control)) in world.query_mut::<(
        &Health,
        &mut Heading,
        &mut Acceleration,
        Option<&ControlState>,
    )>() {
        if !health.is_alive() {
            accel.0 = DVec2::ZERO;
            continue;
        }
        let control = control.copied().unwrap_or_default();
        let turn = f64::from(i8::from(control.right) - i8::from(control.left));
        heading.0 = (heading.0 + turn * player.turn_rate * dt_ms).rem_euclid(360.0);
        accel.0 = if control.up {
            heading_to_unit(heading.0) * player.acceleration
        } else {
            DVec2::ZERO
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pilot(world: &mut World, control: ControlState, heading: f64) -> hecs::Entity {
        world.spawn((
            Health::full(100),
            Heading(heading),
            Acceleration(DVec2::new(5.0, 5.0)),
            control,
        ))
    }

    #[test]
    fn turning_wraps_heading() {
        let mut world = World::new();
        let settings = PlayerSettings::default();
        let left = ControlState {
            left: true,
            ..Default::default()
        };
        let e = pilot(&mut world, left, 1.0);
        run(&mut world, &settings, 10.0);
        let heading = world.get::<&Heading>(e).unwrap().0;
        assert_relative_eq!(heading, 360.0 - 0.8, epsilon = 1e-9);
        assert_eq!(world.get::<&Acceleration>(e).unwrap().0, DVec2::ZERO);
    }

    #[test]
    fn thrust_follows_heading() {
        let mut world = World::new();
        let settings = PlayerSettings::default();
        let up = ControlState {
            up: true,
            ..Default::default()
        };
        let e = pilot(&mut world, up, 90.0);
        run(&mut world, &settings, 0.0);
        let a = world.get::<&Acceleration>(e).unwrap().0;
        assert_relative_eq!(a.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(a.y, settings.acceleration);
    }

    #[test]
    fn dead_pilot_gets_no_thrust() {
        let mut world = World::new();
        let up = ControlState {
            up: true,
            right: true,
            ..Default::default()
        };
        let e = world.spawn((
            Health { current: 0, max: 0 },
            Heading(10.0),
            Acceleration(DVec2::ONE),
            up,
        ));
        run(&mut world, &PlayerSettings::default(), 16.0);
        assert_eq!(world.get::<&Acceleration>(e).unwrap().0, DVec2::ZERO);
        assert_eq!(world.get::<&Heading>(e).unwrap().0, 10.0);
    }
}
