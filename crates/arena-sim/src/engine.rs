//! Simulation engine. Owns the arena and everything that changes it.
//!
//! `SimulationEngine` holds the hecs world, world counters, the seeded RNG
//! and the client sessions. Client commands are applied as soon as they are
//! handed in; `tick` runs every system once and returns the messages to send.
//! Headless and single-threaded; the scheduler lives in the server crate.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arena_core::commands::{ClientCommand, ControlUpdate, SessionError};
use arena_core::components::{ControlState, Name};
use arena_core::config::ArenaConfig;
use arena_core::enums::Role;
use arena_core::state::{Outbound, ServerMessage, WorldSnapshot};
use arena_core::types::ClientId;

use crate::counters::WorldCounters;
use crate::delta;
use crate::session::{ControlledPlayer, SessionRegistry};
use crate::systems;
use crate::systems::collision::{CollisionResolver, CollisionRules, HandlerRegistry};
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: ArenaConfig,
    counters: WorldCounters,
    rng: ChaCha8Rng,
    collision: CollisionResolver,
    sessions: SessionRegistry,
    previous: WorldSnapshot,
    tick_count: u64,
}

impl SimulationEngine {
    /// Create an empty arena. Asteroids arrive through the spawner on the
    /// first tick.
    pub fn new(config: ArenaConfig) -> Self {
        let collision =
            CollisionResolver::new(HandlerRegistry::standard(), CollisionRules::from_config(&config));
        Self {
            world: World::new(),
            rng: ChaCha8Rng::seed_from_u64(config.arena.seed),
            counters: WorldCounters::default(),
            collision,
            sessions: SessionRegistry::default(),
            previous: WorldSnapshot::default(),
            tick_count: 0,
            config,
        }
    }

    /// Apply one client command. Session errors are logged and absorbed;
    /// the returned messages are for immediate delivery.
    pub fn handle_command(&mut self, command: ClientCommand) -> Vec<Outbound> {
        let result = match command {
            ClientCommand::Connect { client, role } => self.connect(client, &role),
            ClientCommand::ControlState { client, state } => {
                self.update_controls(client, state).map(|_| Vec::new())
            }
            ClientCommand::SetName { client, name } => {
                self.set_name(client, name).map(|_| Vec::new())
            }
            ClientCommand::Disconnect { client } => self.disconnect(client).map(|_| Vec::new()),
        };
        result.unwrap_or_else(|err| {
            log::warn!("ignoring client command: {err}");
            Vec::new()
        })
    }

    /// Register a client under the role it announced. Observers get a full
    /// snapshot right away; controllers get a fresh player.
    pub fn connect(&mut self, client: ClientId, role: &str) -> Result<Vec<Outbound>, SessionError> {
        if self.sessions.role_of(client).is_some() {
            return Err(SessionError::AlreadyConnected(client));
        }
        match Role::parse(role)? {
            Role::Observer => {
                self.sessions.add_observer(client)?;
                log::info!("{client} connected as observer");
                Ok(vec![Outbound {
                    client,
                    message: ServerMessage::Snapshot(self.snapshot()),
                }])
            }
            Role::Controller => {
                let (entity, id) =
                    world_setup::spawn_player(&mut self.world, &mut self.counters, &self.config);
                self.sessions
                    .add_controller(client, ControlledPlayer { entity, id })?;
                log::info!("{client} connected as controller of {id:?}");
                Ok(Vec::new())
            }
        }
    }

    /// Merge a partial input update into the controller's player.
    pub fn update_controls(
        &mut self,
        client: ClientId,
        update: ControlUpdate,
    ) -> Result<(), SessionError> {
        let player = self.sessions.controller(client)?;
        if let Ok(mut state) = self.world.get::<&mut ControlState>(player.entity) {
            update.apply_to(&mut state);
        }
        Ok(())
    }

    pub fn set_name(&mut self, client: ClientId, name: String) -> Result<(), SessionError> {
        let player = self.sessions.controller(client)?;
        if let Ok(mut current) = self.world.get::<&mut Name>(player.entity) {
            current.0 = name;
        }
        Ok(())
    }

    /// Forget a client and despawn its player. Bullets it fired stay alive.
    pub fn disconnect(&mut self, client: ClientId) -> Result<(), SessionError> {
        if let Some(player) = self.sessions.remove(client)? {
            let _ = self.world.despawn(player.entity);
            log::info!("{client} disconnected, removed {:?}", player.id);
        } else {
            log::info!("{client} disconnected");
        }
        Ok(())
    }

    /// Advance the arena by `elapsed_ms` and return this tick's messages:
    /// a delta for every observer and a status for every controller.
    pub fn tick(&mut self, elapsed_ms: f64) -> Vec<Outbound> {
        let dt = elapsed_ms.max(0.0);
        self.run_systems(dt);
        self.tick_count += 1;

        let current = self.snapshot();
        let delta = delta::encode_delta(&self.previous, &current);
        self.previous = current;

        let mut outbound: Vec<Outbound> = self
            .sessions
            .observers()
            .map(|client| Outbound {
                client,
                message: ServerMessage::Delta(delta.clone()),
            })
            .collect();
        for (client, player) in self.sessions.controllers() {
            if let Some(status) = systems::snapshot::player_status(&self.world, player.entity) {
                outbound.push(Outbound {
                    client,
                    message: ServerMessage::Status(status),
                });
            }
        }
        outbound
    }

    /// Run every system once, in order.
    fn run_systems(&mut self, dt: f64) {
        let bounds = self.config.bounds();

        systems::motion_control::run(&mut self.world, &self.config.player, dt);
        systems::physics::run(
            &mut self.world,
            bounds,
            self.config.arena.friction_snap_speed,
            dt,
        );
        systems::bullet_expiry::run(&mut self.world, dt);
        self.collision.run(&mut self.world, bounds);
        systems::death::run(&mut self.world, &mut self.counters, &self.config);
        systems::shoot_control::run(&mut self.world, &mut self.counters, &self.config, dt);
        systems::respawn::run(&mut self.world, &self.config.player, dt);
        systems::asteroid_spawner::run(
            &mut self.world,
            &mut self.counters,
            &mut self.rng,
            &self.config,
            dt,
        );
    }

    /// Full transmissible state right now.
    pub fn snapshot(&self) -> WorldSnapshot {
        systems::snapshot::build_snapshot(&self.world, self.config.bounds())
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn counters(&self) -> &WorldCounters {
        &self.counters
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// The player a controller drives.
    pub fn player_of(&self, client: ClientId) -> Option<ControlledPlayer> {
        self.sessions.controller(client).ok()
    }

    /// Mutable world access for test setups.
    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> (&mut World, &mut WorldCounters) {
        (&mut self.world, &mut self.counters)
    }
}
