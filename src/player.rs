//! Player struct definition
//!
//! Represents a connected player with their state and communication channel.

use tokio::sync::mpsc;

use crate::error::SendError;
use crate::fleet::Fleet;
use crate::message::ServerMessage;
use crate::types::ClientId;

/// Connected player information
///
/// Holds all state related to one connection: its unique ID, the name
/// registered by `join`, the outbound message channel, the placed fleet,
/// and the readiness flag.
#[derive(Debug)]
pub struct Player {
    /// Unique identifier for this connection
    pub id: ClientId,
    /// Registered name (None before `join`)
    pub name: Option<String>,
    /// Server → Client message channel
    pub sender: mpsc::Sender<ServerMessage>,
    /// Ships placed so far (empty before `place`)
    pub fleet: Fleet,
    /// Declared placement complete
    pub ready: bool,
}

impl Player {
    /// Create a new player with the given ID and sender channel
    pub fn new(id: ClientId, sender: mpsc::Sender<ServerMessage>) -> Self {
        Self {
            id,
            name: None,
            sender,
            fleet: Fleet::empty(),
            ready: false,
        }
    }

    /// Send a message to this player
    ///
    /// Returns an error if the channel is closed (client disconnected).
    pub async fn send(&self, msg: ServerMessage) -> Result<(), SendError> {
        self.sender
            .send(msg)
            .await
            .map_err(|_| SendError::ChannelClosed)
    }

    /// Get the display name for this player
    ///
    /// Returns the registered name if set, otherwise "Unknown".
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Check if this player has registered with `join`
    pub fn has_joined(&self) -> bool {
        self.name.is_some()
    }
}
