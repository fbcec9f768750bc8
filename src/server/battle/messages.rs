use actix::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::types::{Move, PlayerResult};

/// Message client -> server.
///
/// `Handshake` is expected exactly once, first; `Move` carries the raw
/// wire value so an out-of-range move can be logged and dropped without
/// failing the whole frame.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "action", content = "data")]
pub enum ClientWsMessage {
    Handshake { display_name: String, algorithm: String },
    Move { value: u8 },
    Ping,
}

// Message serveur -> client, delivered in round order per match.
#[derive(Message, Serialize, Deserialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "action", content = "data")]
pub enum ServerWsMessage {
    Connected,
    OpponentFound {
        opponent_name: String,
    },
    MoveRequested {
        round: u32,
    },
    RoundOutcome {
        round: u32,
        opponent_move: Move,
        result: PlayerResult,
    },
    MatchComplete,
    OpponentDisconnected,
    Error {
        message: String,
    },
}

/// Message: a session's move, routed into its match actor.
#[derive(Message)]
#[rtype(result = "()")]
pub struct SubmitMove {
    pub session_id: Uuid,
    pub mv: Move,
}

/// Message: one participant's connection ended; abort the match.
#[derive(Message)]
#[rtype(result = "()")]
pub struct PeerDisconnected {
    pub session_id: Uuid,
}

/// Message: close the session's WebSocket. Idempotent — a session that
/// already stopped simply drops it.
#[derive(Message)]
#[rtype(result = "()")]
pub struct CloseSession;
