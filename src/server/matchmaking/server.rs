/// Matchmaker actor.
///
/// Owns the FIFO pool of handshaked sessions with no opponent yet and
/// pairs them oldest-first into matches. The actor mailbox is the single
/// mutual-exclusion point around the pool: two concurrent registrations
/// can never both observe an empty pool, nor can a session be paired
/// twice.
use actix::prelude::*;
use log::{debug, info};
use std::collections::VecDeque;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::game::TOTAL_ROUNDS;
use crate::server::battle::messages::PeerDisconnected;
use crate::server::battle::server::{BattleMatch, MatchPlayer};
use crate::server::registry::MatchRegistry;
use crate::server::session::{PlayerEndpoint, PlayerProfile};
use crate::server::stats_sink::RecordStatistics;

/// A handshaked session awaiting an opponent.
pub struct WaitingPlayer {
    pub session_id: Uuid,
    pub profile: PlayerProfile,
    pub endpoint: PlayerEndpoint,
}

/// Ordered pool of waiting sessions. Plain struct: the owning actor is
/// its only writer.
#[derive(Default)]
pub struct WaitingPool {
    queue: VecDeque<WaitingPlayer>,
}

impl WaitingPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// The pop-or-push critical section: pairs `player` with the oldest
    /// live waiting session, or enqueues it when none is available.
    /// Entries whose connection already went away are discarded on the
    /// way, so a ghost never gets paired; a re-registration of the same
    /// session replaces its stale entry instead of pairing with itself.
    /// Returns the pair in arrival order (the waiting session first).
    pub fn pair_or_enqueue(
        &mut self,
        player: WaitingPlayer,
        alive: impl Fn(&WaitingPlayer) -> bool,
    ) -> Option<(WaitingPlayer, WaitingPlayer)> {
        while let Some(head) = self.queue.pop_front() {
            if head.session_id == player.session_id {
                continue;
            }
            if alive(&head) {
                return Some((head, player));
            }
            debug!(
                "[Matchmaking] Dropping stale waiting entry {}",
                head.session_id
            );
        }
        self.queue.push_back(player);
        None
    }

    /// Removes a session from the pool. No-op if absent.
    pub fn remove(&mut self, session_id: Uuid) -> bool {
        let before = self.queue.len();
        self.queue.retain(|p| p.session_id != session_id);
        self.queue.len() != before
    }
}

/// Main matchmaker actor.
pub struct Matchmaker {
    pool: WaitingPool,
    registry: Arc<MatchRegistry>,
    stats_recorder: Recipient<RecordStatistics>,
}

impl Matchmaker {
    pub fn new(registry: Arc<MatchRegistry>, stats_recorder: Recipient<RecordStatistics>) -> Self {
        Self {
            pool: WaitingPool::new(),
            registry,
            stats_recorder,
        }
    }

    /// Creates the match actor for a fresh pair and registers it before
    /// the actor starts emitting round events, so move routing can never
    /// observe a half-created match.
    fn create_match(&self, one: WaitingPlayer, two: WaitingPlayer) {
        let match_id = Uuid::new_v4();
        let session_ids = [one.session_id, two.session_id];

        info!(
            "[Matchmaking] Match created: {} - {} vs {} ({} active)",
            match_id,
            one.profile.display_name,
            two.profile.display_name,
            self.registry.active_matches() + 1
        );

        let players = [MatchPlayer::from_waiting(one), MatchPlayer::from_waiting(two)];
        let registry = self.registry.clone();
        let stats_recorder = self.stats_recorder.clone();
        BattleMatch::create(move |ctx| {
            registry.insert(match_id, ctx.address(), session_ids);
            BattleMatch::new(match_id, players, TOTAL_ROUNDS, registry, stats_recorder)
        });
    }
}

impl Actor for Matchmaker {
    type Context = Context<Self>;
}

/// Message: a handshaked session enters matchmaking.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Register {
    pub session_id: Uuid,
    pub profile: PlayerProfile,
    pub endpoint: PlayerEndpoint,
}

/// Message: a session's connection ended; drop it from the pool if it is
/// still waiting.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Deregister {
    pub session_id: Uuid,
}

impl Handler<Register> for Matchmaker {
    type Result = ();

    /// Pairs the session with the oldest waiting one or enqueues it.
    fn handle(&mut self, msg: Register, _ctx: &mut Self::Context) -> Self::Result {
        if !msg.endpoint.connected() {
            // The connection died before its registration was processed;
            // pairing it would strand the opponent in a match nobody plays.
            debug!(
                "[Matchmaking] Session {} disconnected before registration; dropped",
                msg.session_id
            );
            return;
        }
        let player = WaitingPlayer {
            session_id: msg.session_id,
            profile: msg.profile,
            endpoint: msg.endpoint,
        };
        match self.pool.pair_or_enqueue(player, |p| p.endpoint.connected()) {
            Some((one, two)) => self.create_match(one, two),
            None => {
                debug!(
                    "[Matchmaking] Session {} waiting for an opponent ({} in pool)",
                    msg.session_id,
                    self.pool.len()
                );
            }
        }
    }
}

impl Handler<Deregister> for Matchmaker {
    type Result = ();

    fn handle(&mut self, msg: Deregister, _ctx: &mut Self::Context) -> Self::Result {
        if self.pool.remove(msg.session_id) {
            debug!(
                "[Matchmaking] Session {} left the waiting pool",
                msg.session_id
            );
            return;
        }
        // The session may have been paired after it disconnected but
        // before this message was processed. Register and Deregister from
        // one session arrive here in order, so this lookup sees any match
        // the registration produced and routes the lost disconnect on.
        if let Some(match_addr) = self.registry.match_for_session(msg.session_id) {
            match_addr.do_send(PeerDisconnected {
                session_id: msg.session_id,
            });
        }
    }
}
