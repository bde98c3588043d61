//! Simulation constants and tuning parameters.
//!
//! All times are milliseconds, distances are arena units and velocities are
//! units per millisecond. These are the defaults behind `ArenaConfig`.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

// --- Arena ---

/// Horizontal size of the arena.
pub const ARENA_X_MAX: f64 = 800.0;

/// Vertical size of the arena.
pub const ARENA_Y_MAX: f64 = 400.0;

// --- Players ---

/// Maximum player speed.
pub const PLAYER_MAX_SPEED: f64 = 0.45;

/// Player thrust acceleration (units/ms²).
pub const PLAYER_ACCELERATION: f64 = 0.0003;

/// Player turn rate (degrees/ms).
pub const PLAYER_TURN_RATE: f64 = 0.18;

pub const PLAYER_MASS: f64 = 7.0;

/// Player diameter.
pub const PLAYER_SIZE: f64 = 48.0;

/// Deceleration applied to a coasting player.
pub const PLAYER_FRICTION: f64 = 0.00015;

pub const PLAYER_MAX_HEALTH: i32 = 100;

/// Time a dead player waits before respawning.
pub const PLAYER_RESPAWN_DELAY_MS: f64 = 3000.0;

// --- Bullets ---

/// Maximum live bullets per player.
pub const MAX_BULLETS_PER_PLAYER: u32 = 4;

/// Damage a bullet deals to an asteroid.
pub const BULLET_DAMAGE: i32 = 20;

/// Minimum time between shots.
pub const TIME_BETWEEN_SHOTS_MS: f64 = 500.0;

/// Bullet lifetime.
pub const BULLET_LIFETIME_MS: f64 = 3000.0;

/// Muzzle speed added to the shooter's velocity.
pub const BULLET_SPEED: f64 = 0.09;

pub const BULLET_MASS: f64 = 1.0;

pub const BULLET_SIZE: f64 = 4.0;

// --- Asteroids ---

/// Minimum time between asteroid spawns.
pub const ASTEROID_SPAWN_INTERVAL_MS: f64 = 6000.0;

/// Speed of a freshly spawned asteroid.
pub const ASTEROID_SPEED: f64 = 0.06;

/// No more asteroids are spawned once this many are alive.
pub const MAX_ASTEROIDS: u32 = 7;

pub const BIG_ASTEROID_SIZE: f64 = 64.0;
pub const BIG_ASTEROID_MASS: f64 = 20.0;
pub const BIG_ASTEROID_HEALTH: i32 = 60;

pub const SMALL_ASTEROID_SIZE: f64 = 32.0;
pub const SMALL_ASTEROID_MASS: f64 = 3.0;
pub const SMALL_ASTEROID_HEALTH: i32 = 20;

/// Heading offset (degrees) of each child relative to a split parent.
pub const SPLIT_HEADING_OFFSET: f64 = 45.0;

/// Speed clamp for asteroids and bullets (effectively unbounded).
pub const UNBOUNDED_MAX_SPEED: f64 = 999.0;

// --- Physics ---

/// Below this speed a coasting entity with friction snaps to rest.
pub const FRICTION_SNAP_SPEED: f64 = 0.0025;

// --- Entity defaults ---

pub const DEFAULT_NAME: &str = "unnamed";
pub const DEFAULT_SIZE: f64 = 64.0;
pub const DEFAULT_MASS: f64 = 5.0;
pub const DEFAULT_HEALTH: i32 = 100;
pub const DEFAULT_POSITION: (f64, f64) = (32.0, 32.0);

/// RNG seed for asteroid placement.
pub const DEFAULT_SEED: u64 = 42;
