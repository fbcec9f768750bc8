// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the arena's server components, including:
//! - Application state and routing
//! - Per-connection WebSocket sessions
//! - Matchmaking (FIFO waiting pool, pairing)
//! - Per-match battle actors (round synchronization)
//! - The concurrent match registry and disconnect handling
//! - Statistics persistence

pub mod battle;
pub mod disconnect;
pub mod matchmaking;
pub mod registry;
pub mod router;
pub mod session;
pub mod state;
pub mod stats_sink;
pub mod ws_error;
