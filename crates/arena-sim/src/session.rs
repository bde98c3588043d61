//! Connected clients and the players they drive.

use std::collections::{BTreeMap, BTreeSet};

use arena_core::commands::SessionError;
use arena_core::components::EntityId;
use arena_core::enums::Role;
use arena_core::types::ClientId;

/// The player entity bound to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlledPlayer {
    pub entity: hecs::Entity,
    pub id: EntityId,
}

/// Which client holds which role. A client holds at most one role.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    observers: BTreeSet<ClientId>,
    controllers: BTreeMap<ClientId, ControlledPlayer>,
}

impl SessionRegistry {
    pub fn role_of(&self, client: ClientId) -> Option<Role> {
        if self.observers.contains(&client) {
            Some(Role::Observer)
        } else if self.controllers.contains_key(&client) {
            Some(Role::Controller)
        } else {
            None
        }
    }

    fn ensure_new(&self, client: ClientId) -> Result<(), SessionError> {
        match self.role_of(client) {
            Some(_) => Err(SessionError::AlreadyConnected(client)),
            None => Ok(()),
        }
    }

    pub fn add_observer(&mut self, client: ClientId) -> Result<(), SessionError> {
        self.ensure_new(client)?;
        self.observers.insert(client);
        Ok(())
    }

    pub fn add_controller(
        &mut self,
        client: ClientId,
        player: ControlledPlayer,
    ) -> Result<(), SessionError> {
        self.ensure_new(client)?;
        self.controllers.insert(client, player);
        Ok(())
    }

    pub fn controller(&self, client: ClientId) -> Result<ControlledPlayer, SessionError> {
        match self.controllers.get(&client) {
            Some(player) => Ok(*player),
            None if self.observers.contains(&client) => Err(SessionError::NotAController(client)),
            None => Err(SessionError::UnknownClient(client)),
        }
    }

    /// Forget a client. Returns its player if it was a controller.
    pub fn remove(&mut self, client: ClientId) -> Result<Option<ControlledPlayer>, SessionError> {
        if self.observers.remove(&client) {
            return Ok(None);
        }
        self.controllers
            .remove(&client)
            .map(Some)
            .ok_or(SessionError::UnknownClient(client))
    }

    pub fn observers(&self) -> impl Iterator<Item = ClientId> + '_ {
        self.observers.iter().copied()
    }

    pub fn controllers(&self) -> impl Iterator<Item = (ClientId, ControlledPlayer)> + '_ {
        self.controllers.iter().map(|(client, player)| (*client, *player))
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty() && self.controllers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(world: &mut hecs::World, id: u64) -> ControlledPlayer {
        ControlledPlayer {
            entity: world.spawn((EntityId(id),)),
            id: EntityId(id),
        }
    }

    #[test]
    fn roles_are_exclusive() {
        let mut world = hecs::World::new();
        let mut sessions = SessionRegistry::default();
        sessions.add_observer(ClientId(1)).unwrap();
        let p = player(&mut world, 0);
        assert_eq!(
            sessions.add_controller(ClientId(1), p),
            Err(SessionError::AlreadyConnected(ClientId(1)))
        );
        sessions.add_controller(ClientId(2), p).unwrap();
        assert_eq!(sessions.role_of(ClientId(2)), Some(Role::Controller));
        assert_eq!(
            sessions.controller(ClientId(1)),
            Err(SessionError::NotAController(ClientId(1)))
        );
        assert_eq!(
            sessions.controller(ClientId(9)),
            Err(SessionError::UnknownClient(ClientId(9)))
        );
    }

    #[test]
    fn remove_returns_player() {
        let mut world = hecs::World::new();
        let mut sessions = SessionRegistry::default();
        let p = player(&mut world, 3);
        sessions.add_controller(ClientId(5), p).unwrap();
        sessions.add_observer(ClientId(6)).unwrap();
        assert_eq!(sessions.remove(ClientId(5)), Ok(Some(p)));
        assert_eq!(sessions.remove(ClientId(6)), Ok(None));
        assert!(sessions.remove(ClientId(6)).is_err());
        assert!(sessions.is_empty());
    }
}
