//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::commands::SessionError;

/// What an entity is. Drives collision dispatch and lifecycle handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Player,
    /// A player waiting to respawn. Never collides, never dies again.
    PlayerDead,
    Asteroid,
    Bullet,
}

impl EntityKind {
    pub const COUNT: usize = 4;

    pub const ALL: [EntityKind; Self::COUNT] = [
        EntityKind::Player,
        EntityKind::PlayerDead,
        EntityKind::Asteroid,
        EntityKind::Bullet,
    ];

    /// Dense index for table lookups.
    pub fn index(self) -> usize {
        match self {
            EntityKind::Player => 0,
            EntityKind::PlayerDead => 1,
            EntityKind::Asteroid => 2,
            EntityKind::Bullet => 3,
        }
    }
}

/// A field an entity may expose to remote observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Kind,
    Name,
    Size,
    Heading,
    Position,
    Velocity,
    Acceleration,
    Friction,
    Health,
    MaxHealth,
    DespawnTime,
    Owner,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Id,
        Field::Kind,
        Field::Name,
        Field::Size,
        Field::Heading,
        Field::Position,
        Field::Velocity,
        Field::Acceleration,
        Field::Friction,
        Field::Health,
        Field::MaxHealth,
        Field::DespawnTime,
        Field::Owner,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Per-entity set of transmitted fields, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransmitMask {
    bits: u16,
}

impl TransmitMask {
    pub fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn with(mut self, field: Field) -> Self {
        self.bits |= field.bit();
        self
    }

    pub fn without(mut self, field: Field) -> Self {
        self.bits &= !field.bit();
        self
    }

    pub fn contains(&self, field: Field) -> bool {
        self.bits & field.bit() != 0
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(|f| self.contains(*f))
    }

    /// Mask used by players: the default set plus their display name.
    pub fn player() -> Self {
        Self::default().with(Field::Name)
    }

    /// Bullets expose their timer and owner but not their health.
    pub fn bullet() -> Self {
        Self::default()
            .with(Field::DespawnTime)
            .with(Field::Owner)
            .without(Field::Health)
            .without(Field::MaxHealth)
    }
}

impl Default for TransmitMask {
    fn default() -> Self {
        [
            Field::Id,
            Field::Kind,
            Field::Size,
            Field::Heading,
            Field::Position,
            Field::Velocity,
            Field::Acceleration,
            Field::Friction,
            Field::Health,
            Field::MaxHealth,
        ]
        .into_iter()
        .fold(Self::empty(), Self::with)
    }
}

/// Role a connection takes once it announces itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Receives world snapshots and deltas.
    Observer,
    /// Drives one player entity.
    Controller,
}

impl Role {
    pub fn parse(s: &str) -> Result<Self, SessionError> {
        match s {
            "vis" | "observer" => Ok(Role::Observer),
            "control" | "controller" => Ok(Role::Controller),
            other => Err(SessionError::UnknownRole(other.to_string())),
        }
    }
}
