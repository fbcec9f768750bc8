// src/server/disconnect.rs

//! Disconnect handling.
//!
//! A session terminating (cleanly or not) is a first-class event: it must
//! leave no trace in the waiting pool and must abort the session's match,
//! if any, without blocking on the peer. Both effects are message sends,
//! each idempotent on the receiving side, so invoking this twice for the
//! same session is safe.

use actix::Addr;
use uuid::Uuid;

use crate::server::battle::messages::PeerDisconnected;
use crate::server::matchmaking::server::{Deregister, Matchmaker};
use crate::server::registry::MatchRegistry;

/// Unwinds matchmaker and match state for a terminated session.
pub fn handle_disconnect(session_id: Uuid, registry: &MatchRegistry, matchmaker: &Addr<Matchmaker>) {
    // Drop the session from the waiting pool; no-op if it was matched or
    // never registered. If the matchmaker finds the session already
    // paired instead, it routes the disconnect into the match itself,
    // which covers a termination landing between registration and
    // pairing — at that point the lookup below still sees nothing.
    matchmaker.do_send(Deregister { session_id });

    // Fast path: already assigned to a match, route the disconnect into
    // it directly. The match actor removes the registry entries, notifies
    // the survivor, and closes both endpoints.
    if let Some(match_addr) = registry.match_for_session(session_id) {
        match_addr.do_send(PeerDisconnected { session_id });
    }
}
