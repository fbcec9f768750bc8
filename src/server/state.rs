// src/server/state.rs

//! Application state for the arena server.
//!
//! Holds the matchmaker actor address and the shared match registry.
//! Injected into WebSocket handlers so each new connection can register
//! and route moves.

use actix::Addr;
use std::sync::Arc;

use crate::server::matchmaking::server::Matchmaker;
use crate::server::registry::MatchRegistry;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the matchmaker actor (waiting pool, pairing).
    pub matchmaker: Addr<Matchmaker>,
    /// Concurrent index of active matches, shared with every session.
    pub registry: Arc<MatchRegistry>,
}

impl AppState {
    pub fn new(matchmaker: Addr<Matchmaker>, registry: Arc<MatchRegistry>) -> Self {
        AppState {
            matchmaker,
            registry,
        }
    }
}
