//! Main entry point for the arena server.
//!
//! Initializes the actor system, configures application state, and
//! launches the HTTP server with the streaming WebSocket endpoint.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;

use server::matchmaking::server::Matchmaker;
use server::registry::MatchRegistry;
use server::stats_sink::StatsRecorder;

pub mod config;
mod game;
mod server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::init();

    // Concurrent match index, shared by the matchmaker and every session.
    let registry = Arc::new(MatchRegistry::new());

    // Start the StatsRecorder actor (one JSON line per completed match).
    let stats_recorder = StatsRecorder::new(config::server::STATS_FILE).start();

    // Start the Matchmaker actor (waiting pool, pairing).
    let matchmaker = Matchmaker::new(registry.clone(), stats_recorder.recipient()).start();

    // Shared application state for WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(matchmaker, registry));

    let bind_addr = std::env::var(config::server::BIND_ADDR_ENV)
        .unwrap_or_else(|_| config::server::DEFAULT_BIND_ADDR.to_string());

    // Start the HTTP server with the streaming endpoint.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*")),
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind(bind_addr)?
    .run()
    .await
}
