use actix::prelude::*;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::config::game::ROUND_TIMEOUT_SECS;
use crate::game::state::{MatchState, ResolvedRound, RoundProgress};
use crate::game::stats;
use crate::game::types::Seat;
use crate::server::battle::messages::{PeerDisconnected, ServerWsMessage, SubmitMove};
use crate::server::matchmaking::server::WaitingPlayer;
use crate::server::registry::MatchRegistry;
use crate::server::session::{PlayerEndpoint, PlayerProfile};
use crate::server::stats_sink::RecordStatistics;

/// One participant of a match, player one first by arrival order.
pub struct MatchPlayer {
    pub session_id: Uuid,
    pub profile: PlayerProfile,
    pub endpoint: PlayerEndpoint,
}

impl MatchPlayer {
    pub fn from_waiting(player: WaitingPlayer) -> Self {
        Self {
            session_id: player.session_id,
            profile: player.profile,
            endpoint: player.endpoint,
        }
    }
}

/// Per-match actor.
///
/// The actor mailbox is the match's serialization domain: move arrivals
/// from the two connections and the disconnect path are processed one at
/// a time, so the "both slots filled" check never races. Matches are
/// independent actors and run fully in parallel with each other.
pub struct BattleMatch {
    match_id: Uuid,
    players: [MatchPlayer; 2],
    state: MatchState,
    registry: Arc<MatchRegistry>,
    stats_recorder: Recipient<RecordStatistics>,
    round_timer: Option<SpawnHandle>,
    /// Set once on completion or abort; any later event is dropped.
    finished: bool,
}

impl BattleMatch {
    pub fn new(
        match_id: Uuid,
        players: [MatchPlayer; 2],
        total_rounds: u32,
        registry: Arc<MatchRegistry>,
        stats_recorder: Recipient<RecordStatistics>,
    ) -> Self {
        Self {
            match_id,
            players,
            state: MatchState::new(total_rounds),
            registry,
            stats_recorder,
            round_timer: None,
            finished: false,
        }
    }

    fn seat_of(&self, session_id: Uuid) -> Option<Seat> {
        if self.players[0].session_id == session_id {
            Some(Seat::One)
        } else if self.players[1].session_id == session_id {
            Some(Seat::Two)
        } else {
            None
        }
    }

    fn player(&self, seat: Seat) -> &MatchPlayer {
        &self.players[seat.index()]
    }

    fn broadcast(&self, msg: ServerWsMessage) {
        for player in &self.players {
            player.endpoint.send(msg.clone());
        }
    }

    /// Opens the next round: requests a move from both participants and
    /// arms the stall timer when one is configured.
    fn open_round(&mut self, ctx: &mut Context<Self>) {
        self.broadcast(ServerWsMessage::MoveRequested {
            round: self.state.current_round(),
        });
        if let Some(secs) = ROUND_TIMEOUT_SECS {
            let handle = ctx.run_later(Duration::from_secs(secs), |act, ctx| {
                act.abort_stalled(ctx);
            });
            self.round_timer = Some(handle);
        }
    }

    fn cancel_round_timer(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.round_timer.take() {
            ctx.cancel_future(handle);
        }
    }

    /// Emits the round's outcome to both participants, then either opens
    /// the next round or completes the match. Each connection observes
    /// its outcome before the next round's request.
    fn finish_round(&mut self, resolved: ResolvedRound, ctx: &mut Context<Self>) {
        self.cancel_round_timer(ctx);
        for seat in [Seat::One, Seat::Two] {
            self.player(seat).endpoint.send(ServerWsMessage::RoundOutcome {
                round: resolved.round,
                opponent_move: resolved.moves[seat.opponent().index()],
                result: resolved.outcome.for_seat(seat),
            });
        }
        if resolved.match_over {
            self.complete(ctx);
        } else {
            self.open_round(ctx);
        }
    }

    fn complete(&mut self, ctx: &mut Context<Self>) {
        self.finished = true;
        let [p1, p2] = &self.players;
        info!(
            "[Match] {} completed: {}={}, {}={}, Ties={}, Duration={}ms",
            self.match_id,
            p1.profile.display_name,
            self.state.players[0].wins,
            p2.profile.display_name,
            self.state.players[1].wins,
            self.state.ties,
            self.state.duration().as_millis()
        );

        self.broadcast(ServerWsMessage::MatchComplete);

        // Fire-and-forget: the recorder runs in its own mailbox, so the
        // hand-off never blocks match teardown.
        let record = stats::finalize(
            self.match_id,
            [p1.profile.label(), p2.profile.label()],
            &self.state,
        );
        self.stats_recorder.do_send(RecordStatistics(record));

        self.teardown(ctx);
    }

    /// Aborts a round nobody resolved within the configured timeout.
    /// No statistics are finalized.
    fn abort_stalled(&mut self, ctx: &mut Context<Self>) {
        if self.finished {
            return;
        }
        self.finished = true;
        warn!(
            "[Match] {} aborted: round {} stalled",
            self.match_id,
            self.state.current_round()
        );
        self.broadcast(ServerWsMessage::Error {
            message: "Round timed out".to_string(),
        });
        self.teardown(ctx);
    }

    /// Removes the match from the registry, closes both endpoints, and
    /// stops the actor. Any in-flight event referencing this match id is
    /// thereafter "match not found" and dropped.
    fn teardown(&mut self, ctx: &mut Context<Self>) {
        self.cancel_round_timer(ctx);
        self.registry.remove(
            self.match_id,
            [self.players[0].session_id, self.players[1].session_id],
        );
        for player in &self.players {
            player.endpoint.close();
        }
        ctx.stop();
    }
}

impl Actor for BattleMatch {
    type Context = Context<Self>;

    /// Entered at pairing: notify both participants and open round 1.
    fn started(&mut self, ctx: &mut Self::Context) {
        for seat in [Seat::One, Seat::Two] {
            let opponent = self.player(seat.opponent());
            self.player(seat).endpoint.send(ServerWsMessage::OpponentFound {
                opponent_name: opponent.profile.display_name.clone(),
            });
        }
        self.open_round(ctx);
    }
}

impl Handler<SubmitMove> for BattleMatch {
    type Result = ();

    /// Records one participant's move for the open round; resolves the
    /// round once both slots are filled.
    fn handle(&mut self, msg: SubmitMove, ctx: &mut Self::Context) -> Self::Result {
        if self.finished {
            return;
        }
        let Some(seat) = self.seat_of(msg.session_id) else {
            warn!(
                "[Match] {} got a move from unknown session {}",
                self.match_id, msg.session_id
            );
            return;
        };
        match self.state.record_move(seat, msg.mv) {
            RoundProgress::Recorded => {}
            RoundProgress::Duplicate => {
                // Retries and duplicates are absorbed here, not errors.
                debug!(
                    "[Match] {} duplicate move from {} for round {}",
                    self.match_id,
                    msg.session_id,
                    self.state.current_round()
                );
            }
            RoundProgress::Resolved(resolved) => self.finish_round(resolved, ctx),
        }
    }
}

impl Handler<PeerDisconnected> for BattleMatch {
    type Result = ();

    /// One participant's stream ended: notify the survivor, unwind the
    /// registry, and stop. Idempotent — a second disconnect finds the
    /// match already finished.
    fn handle(&mut self, msg: PeerDisconnected, ctx: &mut Self::Context) -> Self::Result {
        if self.finished {
            return;
        }
        let Some(seat) = self.seat_of(msg.session_id) else {
            return;
        };
        self.finished = true;
        warn!(
            "[Match] Player {} disconnected from match {}",
            msg.session_id, self.match_id
        );
        self.player(seat.opponent())
            .endpoint
            .send(ServerWsMessage::OpponentDisconnected);
        self.teardown(ctx);
    }
}
