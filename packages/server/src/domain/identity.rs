//! Identity of a connection and the port that produces default identities.

use super::value_object::{Color, ConnectionId, DisplayName};

/// Display name and color of one connection.
///
/// `connection_id` and `color` never change for the lifetime of the
/// connection; only `display_name` can be replaced through a rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub connection_id: ConnectionId,
    pub display_name: DisplayName,
    pub color: Color,
}

impl Identity {
    pub fn new(connection_id: ConnectionId, display_name: DisplayName, color: Color) -> Self {
        Self {
            connection_id,
            display_name,
            color,
        }
    }
}

/// Source of default display names and colors for new connections.
///
/// The production implementation is random; tests inject fixed values.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityGenerator: Send + Sync {
    fn display_name(&self) -> DisplayName;

    fn color(&self) -> Color;
}
