//! GameServer Actor implementation
//!
//! The central actor that owns all match state: connected players, the
//! session, and the turn pointer. Uses the Actor pattern with mpsc
//! channels for message passing, so every inbound message is applied to
//! the state machine atomically. Connection handlers never touch
//! shared state directly.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::fleet::{Fleet, Ship};
use crate::message::{ServerMessage, ShipEndpoints};
use crate::player::Player;
use crate::session::{Phase, Session};
use crate::types::{ClientId, Coord};

/// Prompt carried by every `turn` message
const TURN_PROMPT: &str = "Your turn!";

/// Commands sent from handlers to the GameServer actor
#[derive(Debug)]
pub enum Command {
    /// New socket connected
    Connect {
        client_id: ClientId,
        sender: mpsc::Sender<ServerMessage>,
    },
    /// Socket disconnected
    Disconnect { client_id: ClientId },
    /// Register under a name
    Join {
        client_id: ClientId,
        name: Option<String>,
    },
    /// Build the player's fleet from endpoint pairs
    Place {
        client_id: ClientId,
        ships: Vec<ShipEndpoints>,
    },
    /// Declare placement complete
    Ready { client_id: ClientId },
    /// Fire at a cell on the opponent board
    Move { client_id: ClientId, coord: String },
}

/// The main GameServer actor
///
/// Manages all state and processes commands from connection handlers.
/// Exactly one match runs at a time; the session is created by the
/// first `join` and destroyed when its last seat empties.
pub struct GameServer {
    /// All connected sockets: ClientId -> Player (seated or not)
    players: HashMap<ClientId, Player>,
    /// The one active match, if any
    session: Option<Session>,
    /// Command receiver channel
    receiver: mpsc::Receiver<Command>,
}

impl GameServer {
    /// Create a new GameServer with the given command receiver
    pub fn new(receiver: mpsc::Receiver<Command>) -> Self {
        Self {
            players: HashMap::new(),
            session: None,
            receiver,
        }
    }

    /// Run the GameServer event loop
    ///
    /// Continuously receives and processes commands until all senders
    /// are dropped.
    pub async fn run(mut self) {
        info!("GameServer started");

        while let Some(cmd) = self.receiver.recv().await {
            self.handle_command(cmd).await;
        }

        info!("GameServer shutting down");
    }

    /// Process a single command
    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Connect { client_id, sender } => {
                self.handle_connect(client_id, sender).await;
            }
            Command::Disconnect { client_id } => {
                self.handle_disconnect(client_id).await;
            }
            Command::Join { client_id, name } => {
                self.handle_join(client_id, name).await;
            }
            Command::Place { client_id, ships } => {
                self.handle_place(client_id, ships).await;
            }
            Command::Ready { client_id } => {
                self.handle_ready(client_id).await;
            }
            Command::Move { client_id, coord } => {
                self.handle_move(client_id, coord).await;
            }
        }
    }

    /// Handle new socket connection
    async fn handle_connect(&mut self, client_id: ClientId, sender: mpsc::Sender<ServerMessage>) {
        info!("Client {} connected", client_id);
        let player = Player::new(client_id, sender);
        self.players.insert(client_id, player);
        debug!("Total connections: {}", self.players.len());
    }

    /// Handle socket disconnection
    ///
    /// Removes the player's registration and fleet. A departure from a
    /// running match ends it as a walkover: the remaining player is
    /// declared the winner rather than being left to fire at an absent
    /// fleet forever.
    async fn handle_disconnect(&mut self, client_id: ClientId) {
        info!("Client {} disconnected", client_id);

        let Some(player) = self.players.remove(&client_id) else {
            return;
        };
        let leaver = player.display_name().to_string();

        let opponent;
        let was_playing;
        let destroy = {
            let Some(session) = self.session.as_mut() else {
                return;
            };
            if !session.contains(client_id) {
                return;
            }
            opponent = session.opponent_of(client_id);
            was_playing = session.phase == Phase::Playing;
            session.remove_seat(client_id)
        };

        if destroy {
            self.session = None;
            debug!("Session destroyed (no seats left)");
            return;
        }

        if was_playing {
            if let Some(opponent_id) = opponent {
                if let Some(session) = self.session.as_mut() {
                    session.phase = Phase::Over;
                    session.turn = None;
                }
                let winner = self.player_name(opponent_id).to_string();
                info!("{} left mid-match; {} wins by walkover", leaver, winner);
                self.send_to(opponent_id, ServerMessage::Gameover { winner })
                    .await;
            }
        }
    }

    /// Handle player registration
    ///
    /// The first join creates the session; the second fills it. A third
    /// concurrent player is refused. A repeated join from a seated
    /// player renames them, which is only allowed before gameplay
    /// starts since name order decides who moves first.
    async fn handle_join(&mut self, client_id: ClientId, name: Option<String>) {
        if !self.players.contains_key(&client_id) {
            return;
        }

        if self.session.is_none() {
            self.session = Some(Session::new(client_id));
        }

        if self.is_seated(client_id) {
            // renaming is only allowed before gameplay starts
            if self.phase() != Phase::Setup {
                self.send_to(client_id, AppError::MatchStarted.into()).await;
                return;
            }
        } else {
            let full = self.session.as_ref().map(|s| s.is_full()).unwrap_or(false);
            if full {
                self.send_to(client_id, AppError::MatchFull.into()).await;
                return;
            }
            if let Some(session) = self.session.as_mut() {
                session.seat(client_id);
            }
        }

        let seat_no = self
            .session
            .as_ref()
            .and_then(|s| s.seat_index(client_id))
            .map_or(1, |i| i + 1);
        let name = name.unwrap_or_else(|| format!("Player{}", seat_no));

        if let Some(player) = self.players.get_mut(&client_id) {
            player.name = Some(name.clone());
        }
        info!("Player joined: {}", name);
    }

    /// Handle fleet placement
    ///
    /// Every endpoint pair must decode to valid coordinates and span a
    /// straight line; a bad pair rejects the whole placement with an
    /// `error` reply and leaves the previous fleet untouched. Overlap
    /// and fleet composition are deliberately not validated.
    async fn handle_place(&mut self, client_id: ClientId, ships: Vec<ShipEndpoints>) {
        if !self.is_seated(client_id) {
            self.send_to(client_id, AppError::NotJoined.into()).await;
            return;
        }
        if self.phase() != Phase::Setup {
            self.send_to(client_id, AppError::MatchStarted.into()).await;
            return;
        }

        let mut placed = Vec::with_capacity(ships.len());
        for endpoints in &ships {
            let built = endpoints
                .start
                .parse::<Coord>()
                .and_then(|start| endpoints.end.parse::<Coord>().map(|end| (start, end)))
                .and_then(|(start, end)| Ship::between(start, end));
            match built {
                Ok(ship) => placed.push(ship),
                Err(err) => {
                    warn!("Rejected placement from {}: {}", self.player_name(client_id), err);
                    self.send_to(client_id, err.into()).await;
                    return;
                }
            }
        }

        let name = self.player_name(client_id).to_string();
        if let Some(player) = self.players.get_mut(&client_id) {
            player.fleet = Fleet::new(placed);
        }
        info!("{} placed ships.", name);
    }

    /// Handle readiness declaration
    ///
    /// The call that brings the ready count to two starts the game:
    /// both players get `start_gameplay` and the first mover by name
    /// order gets `turn`. A repeated `ready` changes nothing.
    async fn handle_ready(&mut self, client_id: ClientId) {
        if !self.is_seated(client_id) {
            self.send_to(client_id, AppError::NotJoined.into()).await;
            return;
        }
        if self.phase() != Phase::Setup {
            self.send_to(client_id, AppError::MatchStarted.into()).await;
            return;
        }

        let name;
        {
            let Some(player) = self.players.get_mut(&client_id) else {
                return;
            };
            if player.ready {
                return;
            }
            player.ready = true;
            name = player.display_name().to_string();
        }

        let ready_count = self.ready_count();
        info!("{} is ready. Total ready: {}", name, ready_count);

        if ready_count == 2 {
            info!("Both players are ready. Starting game...");

            let order = self.ordered_players();
            for id in &order {
                debug!("Sending 'start_gameplay' to {}", self.player_name(*id));
                self.send_to(*id, ServerMessage::StartGameplay).await;
            }

            if let Some(session) = self.session.as_mut() {
                session.phase = Phase::Playing;
                session.turn = order.first().copied();
            }
            if let Some(first) = order.first() {
                self.send_to(
                    *first,
                    ServerMessage::Turn {
                        message: TURN_PROMPT.to_string(),
                    },
                )
                .await;
            }
        }
    }

    /// Handle a move
    ///
    /// Only the connection holding the turn may fire. The shot is
    /// resolved against the opponent's fleet; the mover learns the full
    /// outcome, the opponent sees a sink only as a hit. Sinking the
    /// last ship ends the match; anything else flips the turn.
    async fn handle_move(&mut self, client_id: ClientId, coord: String) {
        let (phase, turn) = match self.session.as_ref() {
            Some(session) => (session.phase, session.turn),
            None => (Phase::Setup, None),
        };
        if phase == Phase::Over {
            self.send_to(client_id, AppError::MatchOver.into()).await;
            return;
        }
        if turn != Some(client_id) {
            self.send_to(client_id, AppError::NotYourTurn.into()).await;
            return;
        }

        let target = match coord.parse::<Coord>() {
            Ok(target) => target,
            Err(err) => {
                warn!("Rejected move with bad coordinate {:?}", coord);
                self.send_to(client_id, err.into()).await;
                return;
            }
        };

        let Some(opponent_id) = self
            .session
            .as_ref()
            .and_then(|s| s.opponent_of(client_id))
        else {
            self.send_to(client_id, AppError::OpponentNotConnected.into())
                .await;
            return;
        };

        let report = match self.players.get_mut(&opponent_id) {
            Some(opponent) => opponent.fleet.register_hit(target),
            None => {
                self.send_to(client_id, AppError::OpponentNotConnected.into())
                    .await;
                return;
            }
        };

        let mover_name = self.player_name(client_id).to_string();
        debug!("{} fired at {}: {:?}", mover_name, target, report.outcome);

        self.send_to(
            client_id,
            ServerMessage::Result {
                status: report.outcome,
                coord: target,
                sunk_coords: report.sunk_cells,
            },
        )
        .await;
        self.send_to(
            opponent_id,
            ServerMessage::OpponentMove {
                coord: target,
                status: report.outcome.concealed(),
            },
        )
        .await;

        let all_sunk = self
            .players
            .get(&opponent_id)
            .map(|p| p.fleet.all_sunk())
            .unwrap_or(false);

        if all_sunk {
            info!("Game over. Winner: {}", mover_name);
            let seats = self
                .session
                .as_ref()
                .map(|s| s.seats().to_vec())
                .unwrap_or_default();
            for id in seats {
                self.send_to(
                    id,
                    ServerMessage::Gameover {
                        winner: mover_name.clone(),
                    },
                )
                .await;
            }
            if let Some(session) = self.session.as_mut() {
                session.phase = Phase::Over;
                session.turn = None;
            }
        } else {
            if let Some(session) = self.session.as_mut() {
                session.turn = Some(opponent_id);
            }
            info!("Turn changed, now: {}", self.player_name(opponent_id));
            self.send_to(
                opponent_id,
                ServerMessage::Turn {
                    message: TURN_PROMPT.to_string(),
                },
            )
            .await;
        }
    }

    /// Helper: best-effort delivery; a failed send is logged, never retried
    async fn send_to(&self, client_id: ClientId, msg: ServerMessage) {
        if let Some(player) = self.players.get(&client_id) {
            if player.send(msg).await.is_err() {
                warn!("Failed to send message to {}", player.display_name());
            }
        }
    }

    /// Helper: registered name for logs and payloads
    fn player_name(&self, client_id: ClientId) -> &str {
        self.players
            .get(&client_id)
            .map(|p| p.display_name())
            .unwrap_or("Unknown")
    }

    /// Helper: whether this connection is seated in the session
    fn is_seated(&self, client_id: ClientId) -> bool {
        self.session
            .as_ref()
            .map(|s| s.contains(client_id))
            .unwrap_or(false)
    }

    /// Helper: current match phase (Setup when no session exists)
    fn phase(&self) -> Phase {
        self.session.as_ref().map(|s| s.phase).unwrap_or(Phase::Setup)
    }

    /// Helper: seated players that have declared ready
    fn ready_count(&self) -> usize {
        let Some(session) = self.session.as_ref() else {
            return 0;
        };
        session
            .seats()
            .iter()
            .filter(|id| self.players.get(id).map(|p| p.ready).unwrap_or(false))
            .count()
    }

    /// Helper: seats ordered lexicographically by name, ties broken by
    /// join order. Stable across calls; decides who moves first.
    fn ordered_players(&self) -> Vec<ClientId> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let mut order: Vec<ClientId> = session.seats().to_vec();
        order.sort_by(|a, b| self.player_name(*a).cmp(self.player_name(*b)));
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::ShotOutcome;
    use tokio::sync::mpsc::Receiver;

    fn new_server() -> GameServer {
        let (_tx, rx) = mpsc::channel(8);
        GameServer::new(rx)
    }

    async fn join(server: &mut GameServer, name: Option<&str>) -> (ClientId, Receiver<ServerMessage>) {
        let client_id = ClientId::new();
        let (tx, rx) = mpsc::channel(64);
        server
            .handle_command(Command::Connect { client_id, sender: tx })
            .await;
        server
            .handle_command(Command::Join {
                client_id,
                name: name.map(str::to_string),
            })
            .await;
        (client_id, rx)
    }

    fn endpoints(start: &str, end: &str) -> ShipEndpoints {
        ShipEndpoints {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    async fn place(server: &mut GameServer, client_id: ClientId, ships: Vec<ShipEndpoints>) {
        server.handle_command(Command::Place { client_id, ships }).await;
    }

    async fn ready(server: &mut GameServer, client_id: ClientId) {
        server.handle_command(Command::Ready { client_id }).await;
    }

    async fn fire(server: &mut GameServer, client_id: ClientId, coord: &str) {
        server
            .handle_command(Command::Move {
                client_id,
                coord: coord.to_string(),
            })
            .await;
    }

    fn recv(rx: &mut Receiver<ServerMessage>) -> ServerMessage {
        rx.try_recv().expect("expected a pending message")
    }

    fn assert_silent(rx: &mut Receiver<ServerMessage>) {
        assert!(rx.try_recv().is_err(), "expected no pending messages");
    }

    fn turn_msg() -> ServerMessage {
        ServerMessage::Turn {
            message: "Your turn!".to_string(),
        }
    }

    /// Two joined players with a one-ship fleet each (A1-B1 for the
    /// first player, C3-C4 for the second), both ready: game started,
    /// first mover chosen by name order.
    async fn started_game(
        server: &mut GameServer,
    ) -> (ClientId, Receiver<ServerMessage>, ClientId, Receiver<ServerMessage>) {
        let (p1, mut rx1) = join(server, Some("Player1")).await;
        let (p2, mut rx2) = join(server, Some("Player2")).await;
        place(server, p1, vec![endpoints("A1", "B1")]).await;
        place(server, p2, vec![endpoints("C3", "C4")]).await;
        ready(server, p1).await;
        ready(server, p2).await;

        assert_eq!(recv(&mut rx1), ServerMessage::StartGameplay);
        assert_eq!(recv(&mut rx2), ServerMessage::StartGameplay);
        assert_eq!(recv(&mut rx1), turn_msg());
        assert_silent(&mut rx2);

        (p1, rx1, p2, rx2)
    }

    #[tokio::test]
    async fn test_game_starts_only_when_both_ready() {
        let mut server = new_server();
        let (p1, mut rx1) = join(&mut server, Some("Player1")).await;
        let (p2, mut rx2) = join(&mut server, Some("Player2")).await;
        place(&mut server, p1, vec![endpoints("A1", "B1")]).await;
        place(&mut server, p2, vec![endpoints("C3", "C4")]).await;

        ready(&mut server, p1).await;
        assert_silent(&mut rx1);
        assert_silent(&mut rx2);

        ready(&mut server, p2).await;
        assert_eq!(recv(&mut rx1), ServerMessage::StartGameplay);
        assert_eq!(recv(&mut rx2), ServerMessage::StartGameplay);
        // first mover by lexicographic name order
        assert_eq!(recv(&mut rx1), turn_msg());
        assert_silent(&mut rx2);
    }

    #[tokio::test]
    async fn test_repeated_ready_does_not_restart_game() {
        let mut server = new_server();
        let (p1, mut rx1) = join(&mut server, Some("Player1")).await;
        let (p2, mut rx2) = join(&mut server, Some("Player2")).await;
        ready(&mut server, p1).await;
        ready(&mut server, p1).await;
        assert_silent(&mut rx1);

        ready(&mut server, p2).await;
        assert_eq!(recv(&mut rx1), ServerMessage::StartGameplay);
        assert_eq!(recv(&mut rx1), turn_msg());
        assert_eq!(recv(&mut rx2), ServerMessage::StartGameplay);
        assert_silent(&mut rx2);
    }

    #[tokio::test]
    async fn test_default_names_assigned_in_join_order() {
        let mut server = new_server();
        let (p1, mut rx1) = join(&mut server, None).await;
        let (p2, mut rx2) = join(&mut server, None).await;
        ready(&mut server, p1).await;
        ready(&mut server, p2).await;

        assert_eq!(recv(&mut rx1), ServerMessage::StartGameplay);
        assert_eq!(recv(&mut rx2), ServerMessage::StartGameplay);
        // "Player1" sorts before "Player2", so the first joiner moves first
        assert_eq!(recv(&mut rx1), turn_msg());
        assert_silent(&mut rx2);
    }

    #[tokio::test]
    async fn test_third_join_refused() {
        let mut server = new_server();
        let _seated = join(&mut server, Some("Player1")).await;
        let _seated2 = join(&mut server, Some("Player2")).await;

        let (_, mut rx3) = join(&mut server, Some("Player3")).await;
        match recv(&mut rx3) {
            ServerMessage::Error { message } => assert_eq!(message, "The match is full."),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_place_before_join_refused() {
        let mut server = new_server();
        let client_id = ClientId::new();
        let (tx, mut rx) = mpsc::channel(64);
        server
            .handle_command(Command::Connect { client_id, sender: tx })
            .await;

        place(&mut server, client_id, vec![endpoints("A1", "B1")]).await;
        assert!(matches!(recv(&mut rx), ServerMessage::Error { .. }));
    }

    #[tokio::test]
    async fn test_diagonal_placement_rejected() {
        let mut server = new_server();
        let (p1, mut rx1) = join(&mut server, Some("Player1")).await;

        place(&mut server, p1, vec![endpoints("A1", "B2")]).await;
        match recv(&mut rx1) {
            ServerMessage::Error { message } => {
                assert!(message.contains("straight line"), "{}", message)
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_out_of_turn_move_rejected_without_state_change() {
        let mut server = new_server();
        let (p1, mut rx1, p2, mut rx2) = started_game(&mut server).await;

        fire(&mut server, p2, "A1").await;
        match recv(&mut rx2) {
            ServerMessage::Error { message } => assert_eq!(message, "It is not your turn."),
            other => panic!("unexpected message: {:?}", other),
        }
        assert_silent(&mut rx1);

        // the turn holder is unaffected and fires normally
        fire(&mut server, p1, "C3").await;
        assert_eq!(
            recv(&mut rx1),
            ServerMessage::Result {
                status: ShotOutcome::Hit,
                coord: "C3".parse().unwrap(),
                sunk_coords: None,
            }
        );
    }

    #[tokio::test]
    async fn test_move_before_start_rejected() {
        let mut server = new_server();
        let (p1, mut rx1) = join(&mut server, Some("Player1")).await;

        fire(&mut server, p1, "A1").await;
        match recv(&mut rx1) {
            ServerMessage::Error { message } => assert_eq!(message, "It is not your turn."),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_coordinate_keeps_turn() {
        let mut server = new_server();
        let (p1, mut rx1, _p2, mut rx2) = started_game(&mut server).await;

        fire(&mut server, p1, "banana").await;
        match recv(&mut rx1) {
            ServerMessage::Error { message } => assert!(message.contains("banana"), "{}", message),
            other => panic!("unexpected message: {:?}", other),
        }
        assert_silent(&mut rx2);

        // turn did not flip; the same player fires again
        fire(&mut server, p1, "C3").await;
        assert!(matches!(recv(&mut rx1), ServerMessage::Result { .. }));
    }

    #[tokio::test]
    async fn test_turn_alternates_strictly() {
        let mut server = new_server();
        let (p1, mut rx1, p2, mut rx2) = started_game(&mut server).await;

        fire(&mut server, p1, "J10").await; // miss
        assert!(matches!(recv(&mut rx1), ServerMessage::Result { .. }));
        assert!(matches!(recv(&mut rx2), ServerMessage::OpponentMove { .. }));
        assert_eq!(recv(&mut rx2), turn_msg());

        fire(&mut server, p2, "J10").await; // miss
        assert!(matches!(recv(&mut rx2), ServerMessage::Result { .. }));
        assert!(matches!(recv(&mut rx1), ServerMessage::OpponentMove { .. }));
        assert_eq!(recv(&mut rx1), turn_msg());

        // a mover never keeps the turn
        fire(&mut server, p2, "J10").await;
        assert!(matches!(recv(&mut rx2), ServerMessage::Error { .. }));
    }

    /// The scenario from the protocol definition: a two-cell ship at
    /// A1-B1 is hit, then sunk, and sinking the last ship wins.
    #[tokio::test]
    async fn test_hit_sink_and_win_broadcast() {
        let mut server = new_server();
        let (p1, mut rx1, p2, mut rx2) = started_game(&mut server).await;

        // Player1 misses so that Player2 holds the turn
        fire(&mut server, p1, "J10").await;
        assert_eq!(
            recv(&mut rx1),
            ServerMessage::Result {
                status: ShotOutcome::Miss,
                coord: "J10".parse().unwrap(),
                sunk_coords: None,
            }
        );
        assert_eq!(
            recv(&mut rx2),
            ServerMessage::OpponentMove {
                coord: "J10".parse().unwrap(),
                status: ShotOutcome::Miss,
            }
        );
        assert_eq!(recv(&mut rx2), turn_msg());

        // Player2 hits A1 on Player1's A1-B1 ship
        fire(&mut server, p2, "A1").await;
        assert_eq!(
            recv(&mut rx2),
            ServerMessage::Result {
                status: ShotOutcome::Hit,
                coord: "A1".parse().unwrap(),
                sunk_coords: None,
            }
        );
        assert_eq!(
            recv(&mut rx1),
            ServerMessage::OpponentMove {
                coord: "A1".parse().unwrap(),
                status: ShotOutcome::Hit,
            }
        );
        assert_eq!(recv(&mut rx1), turn_msg());

        // Player1 misses again
        fire(&mut server, p1, "J10").await;
        recv(&mut rx1);
        recv(&mut rx2);
        assert_eq!(recv(&mut rx2), turn_msg());

        // Player2 sinks the only ship and wins
        fire(&mut server, p2, "B1").await;
        assert_eq!(
            recv(&mut rx2),
            ServerMessage::Result {
                status: ShotOutcome::Sink,
                coord: "B1".parse().unwrap(),
                sunk_coords: Some(vec!["A1".parse().unwrap(), "B1".parse().unwrap()]),
            }
        );
        // the defender sees the sink only as a hit
        assert_eq!(
            recv(&mut rx1),
            ServerMessage::OpponentMove {
                coord: "B1".parse().unwrap(),
                status: ShotOutcome::Hit,
            }
        );
        assert_eq!(
            recv(&mut rx1),
            ServerMessage::Gameover {
                winner: "Player2".to_string(),
            }
        );
        assert_eq!(
            recv(&mut rx2),
            ServerMessage::Gameover {
                winner: "Player2".to_string(),
            }
        );
        // no subsequent turn is issued
        assert_silent(&mut rx1);
        assert_silent(&mut rx2);

        // the match is terminal: further moves are refused
        fire(&mut server, p2, "C3").await;
        match recv(&mut rx2) {
            ServerMessage::Error { message } => assert_eq!(message, "The match is already over."),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mid_match_disconnect_awards_walkover() {
        let mut server = new_server();
        let (p1, mut rx1, p2, mut rx2) = started_game(&mut server).await;

        server.handle_command(Command::Disconnect { client_id: p2 }).await;
        assert_eq!(
            recv(&mut rx1),
            ServerMessage::Gameover {
                winner: "Player1".to_string(),
            }
        );
        assert_silent(&mut rx2);

        // the finished match refuses further moves
        fire(&mut server, p1, "C3").await;
        match recv(&mut rx1) {
            ServerMessage::Error { message } => assert_eq!(message, "The match is already over."),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_setup_disconnect_frees_the_seat() {
        let mut server = new_server();
        let (p1, _rx1) = join(&mut server, Some("Player1")).await;
        server.handle_command(Command::Disconnect { client_id: p1 }).await;

        // the seat is free again for a fresh pair
        let (p3, mut rx3) = join(&mut server, Some("Player3")).await;
        let (p4, mut rx4) = join(&mut server, Some("Player4")).await;
        ready(&mut server, p3).await;
        ready(&mut server, p4).await;
        assert_eq!(recv(&mut rx3), ServerMessage::StartGameplay);
        assert_eq!(recv(&mut rx4), ServerMessage::StartGameplay);
    }
}
