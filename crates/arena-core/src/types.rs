//! Fundamental geometric and session types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Arena extents. Positions live in `[0, x_max) × [0, y_max)` and wrap
/// toroidally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_max: f64,
    pub y_max: f64,
}

impl Bounds {
    pub fn new(x_max: f64, y_max: f64) -> Self {
        Self { x_max, y_max }
    }

    /// Wrap a point into the arena on both axes.
    pub fn wrap(&self, point: DVec2) -> DVec2 {
        DVec2::new(wrap_axis(point.x, self.x_max), wrap_axis(point.y, self.y_max))
    }

    pub fn contains(&self, point: DVec2) -> bool {
        (0.0..self.x_max).contains(&point.x) && (0.0..self.y_max).contains(&point.y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(
            crate::constants::ARENA_X_MAX,
            crate::constants::ARENA_Y_MAX,
        )
    }
}

/// Floor-style modulo. `rem_euclid` can round up to exactly `max` for tiny
/// negative inputs, which is folded back to zero.
fn wrap_axis(value: f64, max: f64) -> f64 {
    let wrapped = value.rem_euclid(max);
    if wrapped >= max {
        0.0
    } else {
        wrapped
    }
}

/// Identifies one transport connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub u64);

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "client#{}", self.0)
    }
}

/// 2D vector as it appears on the wire: `{ "x": .., "y": .. }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl From<DVec2> for Vector {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vector> for DVec2 {
    fn from(v: Vector) -> Self {
        DVec2::new(v.x, v.y)
    }
}

/// Unit vector pointing along a heading in degrees.
pub fn heading_to_unit(heading_deg: f64) -> DVec2 {
    let radians = heading_deg.to_radians();
    DVec2::new(radians.cos(), radians.sin())
}

/// Heading in degrees of a velocity, in `[0, 360)`.
pub fn heading_of(velocity: DVec2) -> f64 {
    wrap_axis(velocity.y.atan2(velocity.x).to_degrees(), 360.0)
}
