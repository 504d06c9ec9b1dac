//! TCP connection handler
//!
//! Handles individual client connections: incremental frame decoding,
//! message parsing, and bidirectional communication with the GameServer.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::codec::MessageDecoder;
use crate::error::AppError;
use crate::message::{ClientMessage, ServerMessage};
use crate::server::Command;
use crate::types::ClientId;

/// Bytes requested per socket read
const READ_CHUNK_SIZE: usize = 2048;

/// Buffer size for the server -> client message channel
const OUTBOUND_BUFFER_SIZE: usize = 32;

/// Handle a new TCP connection
///
/// Sets up bidirectional communication with the GameServer actor and
/// manages the connection lifecycle. The player is deregistered when
/// either direction fails or the peer closes the socket.
pub async fn handle_connection(
    stream: TcpStream,
    cmd_tx: mpsc::Sender<Command>,
) -> Result<(), AppError> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    debug!("New TCP connection from {}", peer_addr);

    let (mut read_half, mut write_half) = stream.into_split();

    // Generate client ID
    let client_id = ClientId::new();
    info!("Client {} connected from {}", client_id, peer_addr);

    // Create channel for server -> client messages
    let (msg_tx, mut msg_rx) = mpsc::channel::<ServerMessage>(OUTBOUND_BUFFER_SIZE);

    // Register with GameServer
    if cmd_tx
        .send(Command::Connect {
            client_id,
            sender: msg_tx,
        })
        .await
        .is_err()
    {
        error!("Failed to register client {} - server closed", client_id);
        return Err(AppError::ChannelSend);
    }

    // Clone cmd_tx for read task
    let cmd_tx_read = cmd_tx.clone();

    // Spawn read task (socket bytes -> frames -> Command)
    let read_task = tokio::spawn(async move {
        let mut decoder = MessageDecoder::new();
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            match read_half.read(&mut chunk).await {
                // Zero-length read: peer closed the connection
                Ok(0) => {
                    debug!("Client {} closed the connection", client_id);
                    break;
                }
                Ok(n) => {
                    decoder.push(&chunk[..n]);
                    let (messages, decode_err) = decoder.drain::<ClientMessage>();
                    for msg in messages {
                        let cmd = client_message_to_command(client_id, msg);
                        if cmd_tx_read.send(cmd).await.is_err() {
                            debug!("Server closed, ending read task for {}", client_id);
                            return;
                        }
                    }
                    if let Some(e) = decode_err {
                        // Malformed bytes are dropped; the connection continues
                        warn!("Invalid JSON from {}: {}", client_id, e);
                    }
                }
                Err(e) => {
                    error!("Read error for {}: {}", client_id, e);
                    break;
                }
            }
        }
        debug!("Read task ended for {}", client_id);
    });

    // Spawn write task (ServerMessage -> socket bytes)
    let write_task = tokio::spawn(async move {
        while let Some(msg) = msg_rx.recv().await {
            match serde_json::to_vec(&msg) {
                Ok(json) => {
                    // Frames are written back-to-back; the client's own
                    // incremental decoder splits them
                    if write_half.write_all(&json).await.is_err() {
                        debug!("Socket write failed, ending write task");
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to serialize message: {}", e);
                    // Continue - don't break on serialization errors
                }
            }
        }
        debug!("Write task ended for client");
    });

    // Wait for either task to complete
    tokio::select! {
        _ = read_task => {
            debug!("Read task completed for {}", client_id);
        }
        _ = write_task => {
            debug!("Write task completed for {}", client_id);
        }
    }

    // Send disconnect command
    let _ = cmd_tx.send(Command::Disconnect { client_id }).await;

    info!("Client {} disconnected", client_id);

    Ok(())
}

/// Convert a ClientMessage to a Command
fn client_message_to_command(client_id: ClientId, msg: ClientMessage) -> Command {
    match msg {
        ClientMessage::Join { name } => Command::Join { client_id, name },
        ClientMessage::Place { ships } => Command::Place { client_id, ships },
        ClientMessage::Ready => Command::Ready { client_id },
        ClientMessage::Move { coord } => Command::Move { client_id, coord },
    }
}
