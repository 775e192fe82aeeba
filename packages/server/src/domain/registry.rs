//! Registry of live connections and their identities.

use super::{
    error::RoomError,
    identity::{Identity, IdentityGenerator},
    value_object::{ConnectionId, DisplayName},
};

/// Online identities in join order. Source of truth for "who is online".
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    identities: Vec<Identity>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `connection_id` with a generated default identity.
    ///
    /// Registering an id that is already present returns the stored identity.
    pub fn register(
        &mut self,
        connection_id: ConnectionId,
        generator: &dyn IdentityGenerator,
    ) -> Identity {
        if let Some(existing) = self.get(&connection_id) {
            return existing.clone();
        }

        let identity = Identity::new(connection_id, generator.display_name(), generator.color());
        self.identities.push(identity.clone());
        identity
    }

    /// Replace the display name of `connection_id`, keeping id and color.
    pub fn rename(
        &mut self,
        connection_id: &ConnectionId,
        display_name: DisplayName,
    ) -> Result<Identity, RoomError> {
        let identity = self
            .identities
            .iter_mut()
            .find(|identity| &identity.connection_id == connection_id)
            .ok_or_else(|| RoomError::ConnectionNotFound(connection_id.to_string()))?;

        identity.display_name = display_name;
        Ok(identity.clone())
    }

    /// Remove `connection_id`. Idempotent; returns the removed identity if any.
    pub fn unregister(&mut self, connection_id: &ConnectionId) -> Option<Identity> {
        let position = self
            .identities
            .iter()
            .position(|identity| &identity.connection_id == connection_id)?;
        Some(self.identities.remove(position))
    }

    pub fn get(&self, connection_id: &ConnectionId) -> Option<&Identity> {
        self.identities
            .iter()
            .find(|identity| &identity.connection_id == connection_id)
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.get(connection_id).is_some()
    }

    /// Point-in-time view of all online identities, in join order.
    pub fn snapshot(&self) -> Vec<Identity> {
        self.identities.clone()
    }

    pub fn connection_ids(&self) -> Vec<ConnectionId> {
        self.identities
            .iter()
            .map(|identity| identity.connection_id.clone())
            .collect()
    }

    pub fn connection_ids_except(&self, excluded: &ConnectionId) -> Vec<ConnectionId> {
        self.identities
            .iter()
            .map(|identity| &identity.connection_id)
            .filter(|id| *id != excluded)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
