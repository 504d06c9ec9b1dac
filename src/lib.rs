//! Authoritative Two-Player Battleship Server Library
//!
//! A TCP battleship server speaking streamed JSON messages, built with
//! tokio using the Actor pattern for state management. The server is
//! the sole authority on hits, sinks, turn order, and wins; clients
//! only encode intents and render reported state.
//!
//! # Features
//! - Registration with `join` (names decide who moves first)
//! - Fleet placement from straight-line endpoint pairs
//! - Strict server-enforced turn alternation
//! - Hit/sink/win arbitration with sink concealment from the defender
//! - Incremental decoding of concatenated JSON frames
//! - Disconnection handling, including mid-match walkovers
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `GameServer` is the central actor managing all match state
//! - Each connection has a `handler` task communicating with the server
//! - No locks needed - all state access goes through message passing
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use tokio::sync::mpsc;
//! use battleship_server::{GameServer, handle_connection};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:5001").await.unwrap();
//!     let (cmd_tx, cmd_rx) = mpsc::channel(256);
//!
//!     tokio::spawn(GameServer::new(cmd_rx).run());
//!
//!     while let Ok((stream, _)) = listener.accept().await {
//!         let cmd_tx = cmd_tx.clone();
//!         tokio::spawn(handle_connection(stream, cmd_tx));
//!     }
//! }
//! ```

pub mod codec;
pub mod error;
pub mod fleet;
pub mod handler;
pub mod message;
pub mod player;
pub mod server;
pub mod session;
pub mod types;

// Re-export main types for convenience
pub use codec::MessageDecoder;
pub use error::{AppError, SendError};
pub use fleet::{Fleet, Ship, ShotOutcome, ShotReport};
pub use handler::handle_connection;
pub use message::{ClientMessage, ServerMessage, ShipEndpoints};
pub use player::Player;
pub use server::{Command, GameServer};
pub use session::{Phase, Session};
pub use types::{ClientId, Coord, BOARD_SIZE};
