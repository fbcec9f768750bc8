//! HTTP and WebSocket routing configuration.
//!
//! A single streaming endpoint: one WebSocket connection per player, from
//! handshake through matchmaking to the final round.

use actix_web::web;

use crate::server::session::ws_battle;

/// Configure the application's WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws/battle").to(ws_battle));
}
