//! Error types for the battleship server
//!
//! Defines application-level errors and message send errors.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Application-level errors
///
/// Covers both fatal errors (connection termination) and
/// protocol errors (send error message to client).
#[derive(Debug, Error)]
pub enum AppError {
    /// IO error (fatal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Channel send error (fatal - internal channel broken)
    #[error("Channel send error")]
    ChannelSend,

    /// A single inbound frame grew past the decoder's buffer cap
    #[error("Message frame too large")]
    FrameTooLarge,

    /// Label does not name a cell on the board
    #[error("Malformed coordinate: {0:?}")]
    MalformedCoordinate(String),

    /// Ship endpoints are neither row-aligned nor column-aligned
    #[error("Invalid ship shape: {start} to {end}")]
    InvalidShipShape { start: String, end: String },

    /// Move from a connection that does not hold the turn
    #[error("Move out of turn")]
    NotYourTurn,

    /// Move while the second player is absent
    #[error("Opponent not connected")]
    OpponentNotConnected,

    /// Join while both seats are taken
    #[error("Match is full")]
    MatchFull,

    /// Place/ready/move from a connection that never joined
    #[error("Not joined")]
    NotJoined,

    /// Setup-phase message after gameplay started
    #[error("Match already started")]
    MatchStarted,

    /// Move after the match finished
    #[error("Match is over")]
    MatchOver,
}

/// Message send errors
///
/// Occurs when attempting to send messages through closed channels.
#[derive(Debug, Error)]
pub enum SendError {
    /// The receiving end of the channel has been closed
    #[error("Channel closed")]
    ChannelClosed,
}
