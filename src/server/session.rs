/// WebSocket session handler for one arena connection.
///
/// This actor manages a single client's connection: it accepts the
/// handshake, relays move submissions into the assigned match via the
/// registry, serializes server messages back to the client, and funnels
/// stream termination through the disconnect handler. It is the "one
/// logical task per connection" of the engine.
use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::game::rules::is_valid_move;
use crate::game::types::Move;
use crate::server::battle::messages::{ClientWsMessage, CloseSession, ServerWsMessage, SubmitMove};
use crate::server::disconnect::handle_disconnect;
use crate::server::matchmaking::server::{Matchmaker, Register};
use crate::server::registry::MatchRegistry;
use crate::server::ws_error::ws_error_message;

/// Identity metadata received in the handshake, set once.
#[derive(Clone, Debug)]
pub struct PlayerProfile {
    pub display_name: String,
    pub algorithm: String,
}

impl PlayerProfile {
    /// Display label combining name and algorithm, as persisted in
    /// statistics records.
    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name, self.algorithm)
    }
}

/// A session's outbound delivery endpoint: the only way the matchmaker
/// and match actors push events to the connection. Closed exactly once,
/// at session termination.
#[derive(Clone)]
pub struct PlayerEndpoint {
    messages: Recipient<ServerWsMessage>,
    control: Recipient<CloseSession>,
}

impl PlayerEndpoint {
    pub fn new(messages: Recipient<ServerWsMessage>, control: Recipient<CloseSession>) -> Self {
        Self { messages, control }
    }

    /// Whether the backing connection actor is still alive.
    pub fn connected(&self) -> bool {
        self.messages.connected()
    }

    pub fn send(&self, msg: ServerWsMessage) {
        self.messages.do_send(msg);
    }

    pub fn close(&self) {
        self.control.do_send(CloseSession);
    }
}

/// Represents one live connection to the arena.
pub struct BattleSession {
    pub session_id: Uuid,
    /// Set by the handshake; a session without a profile may not register
    /// or submit moves.
    profile: Option<PlayerProfile>,
    matchmaker: Addr<Matchmaker>,
    registry: Arc<MatchRegistry>,
}

impl BattleSession {
    pub fn new(matchmaker: Addr<Matchmaker>, registry: Arc<MatchRegistry>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            profile: None,
            matchmaker,
            registry,
        }
    }

    fn handle_handshake(
        &mut self,
        display_name: String,
        algorithm: String,
        ctx: &mut ws::WebsocketContext<Self>,
    ) {
        if self.profile.is_some() {
            warn!(
                "[Session] Duplicate handshake from {} ignored",
                self.session_id
            );
            return;
        }
        info!(
            "[Session] Handshake from {}: {} ({})",
            self.session_id, display_name, algorithm
        );
        let profile = PlayerProfile {
            display_name,
            algorithm,
        };
        self.profile = Some(profile.clone());

        // Confirm the connection before matchmaking may emit anything.
        self.send_server_message(ServerWsMessage::Connected, ctx);

        let endpoint = PlayerEndpoint::new(
            ctx.address().recipient::<ServerWsMessage>(),
            ctx.address().recipient::<CloseSession>(),
        );
        self.matchmaker.do_send(Register {
            session_id: self.session_id,
            profile,
            endpoint,
        });
    }

    fn handle_move(&mut self, value: u8) {
        if self.profile.is_none() {
            warn!(
                "[Session] Move received before handshake from {}",
                self.session_id
            );
            return;
        }
        if !is_valid_move(value) {
            warn!(
                "[Session] Invalid move from {}: {}",
                self.session_id, value
            );
            return;
        }
        // is_valid_move guarantees the conversion.
        let Ok(mv) = Move::try_from(value) else {
            return;
        };
        match self.registry.match_for_session(self.session_id) {
            Some(match_addr) => match_addr.do_send(SubmitMove {
                session_id: self.session_id,
                mv,
            }),
            None => {
                // No match yet, or the match was already torn down; the
                // event is dropped, never retried.
                warn!(
                    "[Session] Move from {} has no active match; dropped",
                    self.session_id
                );
            }
        }
    }

    fn send_server_message(&self, msg: ServerWsMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                warn!("[Session] Failed to serialize server message: {}", e);
                ctx.text(ws_error_message(
                    "INTERNAL_ERROR",
                    "Internal server error",
                    None,
                ));
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

impl Actor for BattleSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!("[Session] New streaming connection: {}", self.session_id);
    }

    /// Called once the stream ended, cleanly or not. Unwinds matchmaking
    /// and match state for this session.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!("[Session] Connection closed: {}", self.session_id);
        handle_disconnect(self.session_id, &self.registry, &self.matchmaker);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for BattleSession {
    /// Handles incoming WebSocket messages from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => match serde_json::from_str::<ClientWsMessage>(&text) {
                Ok(ClientWsMessage::Handshake {
                    display_name,
                    algorithm,
                }) => self.handle_handshake(display_name, algorithm, ctx),
                Ok(ClientWsMessage::Move { value }) => self.handle_move(value),
                Ok(ClientWsMessage::Ping) => {
                    // Keep-alive; nothing to do.
                }
                Err(_) => {
                    debug!("[Session] Malformed message from {}", self.session_id);
                    ctx.text(ws_error_message(
                        "INVALID_MESSAGE",
                        "Invalid client message",
                        None,
                    ));
                }
            },
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(_)) => ctx.stop(),
            Err(_) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for BattleSession {
    type Result = ();

    /// Forwards an engine event to the client.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        self.send_server_message(msg, ctx);
    }
}

impl Handler<CloseSession> for BattleSession {
    type Result = ();

    /// Closes the outbound endpoint. A second close finds the actor
    /// already stopped and is dropped by the mailbox.
    fn handle(&mut self, _msg: CloseSession, ctx: &mut Self::Context) {
        ctx.close(Some(ws::CloseReason {
            code: ws::CloseCode::Normal,
            description: None,
        }));
        ctx.stop();
    }
}

/// WebSocket endpoint for the arena.
///
/// Identity arrives in the handshake message, not in the URL; the
/// connection id is generated here.
pub async fn ws_battle(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(
        BattleSession::new(data.matchmaker.clone(), data.registry.clone()),
        &req,
        stream,
    )
}
