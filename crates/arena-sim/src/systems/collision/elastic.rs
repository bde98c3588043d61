//! Two-body elastic collision in 2D.

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;

/// One side of a collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64,
}

/// Post-collision velocities of `a` and `b`. The exchange happens along the
/// line through both centers; tangential components are kept. Momentum and
/// kinetic energy are conserved.
pub fn resolve(a: BodyState, b: BodyState) -> (DVec2, DVec2) {
    let contact = a.position - b.position;
    let phi = contact.y.atan2(contact.x);
    let normal = DVec2::new(phi.cos(), phi.sin());
    let tangent = DVec2::new((phi + FRAC_PI_2).cos(), (phi + FRAC_PI_2).sin());
    (
        outgoing(a, b, phi, normal, tangent),
        outgoing(b, a, phi, normal, tangent),
    )
}

fn outgoing(this: BodyState, other: BodyState, phi: f64, normal: DVec2, tangent: DVec2) -> DVec2 {
    let (speed, theta) = polar(this.velocity);
    let (other_speed, other_theta) = polar(other.velocity);
    let along = (speed * (theta - phi).cos() * (this.mass - other.mass)
        + 2.0 * other.mass * other_speed * (other_theta - phi).cos())
        / (this.mass + other.mass);
    normal * along + tangent * speed * (theta - phi).sin()
}

fn polar(v: DVec2) -> (f64, f64) {
    (v.length(), v.y.atan2(v.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn equal_masses_head_on_swap() {
        let a = BodyState {
            position: DVec2::new(10.0, 0.0),
            velocity: DVec2::new(-1.0, 0.0),
            mass: 4.0,
        };
        let b = BodyState {
            position: DVec2::ZERO,
            velocity: DVec2::new(1.0, 0.0),
            mass: 4.0,
        };
        let (va, vb) = resolve(a, b);
        assert_relative_eq!(va.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(va.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(vb.x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn momentum_and_energy_conserved() {
        let a = BodyState {
            position: DVec2::new(3.0, 4.0),
            velocity: DVec2::new(-0.2, 0.05),
            mass: 7.0,
        };
        let b = BodyState {
            position: DVec2::new(-1.0, 1.5),
            velocity: DVec2::new(0.03, -0.06),
            mass: 20.0,
        };
        let (va, vb) = resolve(a, b);
        let before = a.velocity * a.mass + b.velocity * b.mass;
        let after = va * a.mass + vb * b.mass;
        assert_relative_eq!(before.x, after.x, epsilon = 1e-12);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-12);

        let energy = |m: f64, v: DVec2| 0.5 * m * v.length_squared();
        assert_relative_eq!(
            energy(a.mass, a.velocity) + energy(b.mass, b.velocity),
            energy(a.mass, va) + energy(b.mass, vb),
            epsilon = 1e-12
        );
    }
}
