//! Gameplay configuration.
//!
//! Every tuning value lives here with its default taken from `constants`.
//! A TOML file may override any subset of keys.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::Bounds;

/// Complete tuning for one arena.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub arena: ArenaSettings,
    pub player: PlayerSettings,
    pub bullet: BulletSettings,
    pub asteroid: AsteroidSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub x_max: f64,
    pub y_max: f64,
    /// Scheduler frequency in Hz.
    pub tick_rate: u32,
    /// Seed for asteroid placement.
    pub seed: u64,
    /// Coasting speed below which friction snaps velocity to zero.
    pub friction_snap_speed: f64,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            x_max: ARENA_X_MAX,
            y_max: ARENA_Y_MAX,
            tick_rate: TICK_RATE,
            seed: DEFAULT_SEED,
            friction_snap_speed: FRICTION_SNAP_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub max_speed: f64,
    pub acceleration: f64,
    /// Degrees per millisecond.
    pub turn_rate: f64,
    pub mass: f64,
    pub size: f64,
    pub friction: f64,
    pub max_health: i32,
    pub respawn_delay_ms: f64,
    pub max_bullets: u32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            max_speed: PLAYER_MAX_SPEED,
            acceleration: PLAYER_ACCELERATION,
            turn_rate: PLAYER_TURN_RATE,
            mass: PLAYER_MASS,
            size: PLAYER_SIZE,
            friction: PLAYER_FRICTION,
            max_health: PLAYER_MAX_HEALTH,
            respawn_delay_ms: PLAYER_RESPAWN_DELAY_MS,
            max_bullets: MAX_BULLETS_PER_PLAYER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletSettings {
    pub damage: i32,
    pub time_between_shots_ms: f64,
    pub lifetime_ms: f64,
    pub speed: f64,
    pub mass: f64,
    pub size: f64,
    pub max_speed: f64,
}

impl Default for BulletSettings {
    fn default() -> Self {
        Self {
            damage: BULLET_DAMAGE,
            time_between_shots_ms: TIME_BETWEEN_SHOTS_MS,
            lifetime_ms: BULLET_LIFETIME_MS,
            speed: BULLET_SPEED,
            mass: BULLET_MASS,
            size: BULLET_SIZE,
            max_speed: UNBOUNDED_MAX_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidSettings {
    pub spawn_interval_ms: f64,
    pub speed: f64,
    pub max_count: u32,
    pub max_speed: f64,
    pub big_size: f64,
    pub big_mass: f64,
    pub big_health: i32,
    pub small_size: f64,
    pub small_mass: f64,
    pub small_health: i32,
    /// Degrees each child deviates from the parent heading on a split.
    pub split_heading_offset: f64,
}

impl Default for AsteroidSettings {
    fn default() -> Self {
        Self {
            spawn_interval_ms: ASTEROID_SPAWN_INTERVAL_MS,
            speed: ASTEROID_SPEED,
            max_count: MAX_ASTEROIDS,
            max_speed: UNBOUNDED_MAX_SPEED,
            big_size: BIG_ASTEROID_SIZE,
            big_mass: BIG_ASTEROID_MASS,
            big_health: BIG_ASTEROID_HEALTH,
            small_size: SMALL_ASTEROID_SIZE,
            small_mass: SMALL_ASTEROID_MASS,
            small_health: SMALL_ASTEROID_HEALTH,
            split_heading_offset: SPLIT_HEADING_OFFSET,
        }
    }
}

impl ArenaConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.arena.x_max, self.arena.y_max)
    }

    /// Load and validate a configuration file. Only `.toml` is supported.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("loaded arena config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the systems cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.arena.x_max > 0.0 && self.arena.y_max > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "arena bounds must be positive, got {}x{}",
                self.arena.x_max, self.arena.y_max
            )));
        }
        if self.arena.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick_rate must be non-zero".into()));
        }
        if self.asteroid.small_size > self.asteroid.big_size {
            return Err(ConfigError::Invalid(format!(
                "small asteroid size {} exceeds big asteroid size {}",
                self.asteroid.small_size, self.asteroid.big_size
            )));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
