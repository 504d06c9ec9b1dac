//! Message protocol definitions
//!
//! JSON-based bidirectional message protocol using Serde's tagged enum
//! for type-safe serialization/deserialization. The field names and tag
//! strings are the wire contract with the graphical client, so the tests
//! below assert literal JSON.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::fleet::ShotOutcome;
use crate::types::Coord;

/// Client → Server message
///
/// All messages from client to server. Uses tagged enum with snake_case naming.
///
/// Coordinates arrive as raw label strings rather than parsed `Coord`s so
/// that a bad label is answered with an `error` reply instead of being
/// dropped as an undecodable frame.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Register under a name (server assigns "PlayerN" if absent)
    Join { name: Option<String> },
    /// Place the fleet as straight-line endpoint pairs
    Place {
        #[serde(default)]
        ships: Vec<ShipEndpoints>,
    },
    /// Declare placement complete
    Ready,
    /// Fire at a cell on the opponent board
    Move { coord: String },
}

/// The two end cells of one ship, as sent by the client
#[derive(Debug, Clone, Deserialize)]
pub struct ShipEndpoints {
    pub start: String,
    pub end: String,
}

/// Server → Client message
///
/// All messages from server to client. Uses tagged enum with snake_case naming.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Both players are ready, gameplay begins
    StartGameplay,
    /// The receiving connection may move
    Turn { message: String },
    /// Outcome of the receiver's own move; `sunk_coords` lists every
    /// cell of the sunk ship and is present only on a sink
    Result {
        status: ShotOutcome,
        coord: Coord,
        #[serde(skip_serializing_if = "Option::is_none")]
        sunk_coords: Option<Vec<Coord>>,
    },
    /// A move was just made against the receiver; a sink is reported
    /// as a plain hit on this side
    OpponentMove { coord: Coord, status: ShotOutcome },
    /// Terminal message carrying the victor's registered name
    Gameover { winner: String },
    /// Protocol violation notice; does not close the connection
    Error { message: String },
}

/// Convert AppError to ServerMessage for client notification
impl From<AppError> for ServerMessage {
    fn from(err: AppError) -> Self {
        let message = match &err {
            AppError::NotYourTurn => "It is not your turn.".to_string(),
            AppError::OpponentNotConnected => "Opponent is not connected yet.".to_string(),
            AppError::MatchFull => "The match is full.".to_string(),
            AppError::NotJoined => "Join the game first.".to_string(),
            AppError::MatchStarted => "The match has already started.".to_string(),
            AppError::MatchOver => "The match is already over.".to_string(),
            AppError::MalformedCoordinate(label) => {
                format!("Malformed coordinate '{}'.", label)
            }
            AppError::InvalidShipShape { start, end } => {
                format!("Ship endpoints {} and {} do not form a straight line.", start, end)
            }
            // Fatal errors are not converted (connection closes)
            _ => "Internal error.".to_string(),
        };
        ServerMessage::Error { message }
    }
}
