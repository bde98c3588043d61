//! Commands sent by the transport layer on behalf of connected clients.
//!
//! Commands are applied to the simulation as soon as they are received.

use serde::{Deserialize, Deserializer, Serialize};

use crate::components::ControlState;
use crate::types::ClientId;

/// Everything a connection can ask of the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientCommand {
    /// A connection announced its role (`"vis"` or `"control"`).
    Connect { client: ClientId, role: String },
    /// Partial update of a controller's input flags.
    ControlState {
        client: ClientId,
        state: ControlUpdate,
    },
    /// Rename the controller's player.
    SetName { client: ClientId, name: String },
    /// The connection went away.
    Disconnect { client: ClientId },
}

/// Partial input record. Absent flags leave the current value untouched and
/// unrecognized keys are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlUpdate {
    #[serde(default, deserialize_with = "flag", skip_serializing_if = "Option::is_none")]
    pub up: Option<bool>,
    #[serde(default, deserialize_with = "flag", skip_serializing_if = "Option::is_none")]
    pub down: Option<bool>,
    #[serde(default, deserialize_with = "flag", skip_serializing_if = "Option::is_none")]
    pub left: Option<bool>,
    #[serde(default, deserialize_with = "flag", skip_serializing_if = "Option::is_none")]
    pub right: Option<bool>,
    #[serde(default, deserialize_with = "flag", skip_serializing_if = "Option::is_none")]
    pub shoot: Option<bool>,
}

impl ControlUpdate {
    /// Merge the present flags into `state`.
    pub fn apply_to(&self, state: &mut ControlState) {
        let merges = [
            (self.up, &mut state.up),
            (self.down, &mut state.down),
            (self.left, &mut state.left),
            (self.right, &mut state.right),
            (self.shoot, &mut state.shoot),
        ];
        for (update, slot) in merges {
            if let Some(pressed) = update {
                *slot = pressed;
            }
        }
    }
}

/// Key states arrive as either booleans or numbers (non-zero = pressed).
/// Anything else leaves that key untouched.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Number(f64),
    Other(serde::de::IgnoredAny),
}

fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<FlagValue>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        FlagValue::Bool(b) => Some(b),
        FlagValue::Number(n) => Some(n != 0.0),
        FlagValue::Other(_) => None,
    }))
}

/// Session-level failures. None of these are fatal; the engine logs and
/// drops the offending message.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown role: {0:?}")]
    UnknownRole(String),

    #[error("{0} is not connected")]
    UnknownClient(ClientId),

    #[error("{0} is already connected")]
    AlreadyConnected(ClientId),

    #[error("{0} is not a controller")]
    NotAController(ClientId),
}
