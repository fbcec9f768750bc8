//! Per-match round state.
//!
//! `MatchState` holds everything one match mutates round to round: the
//! current round number, the two per-round move slots, running counters,
//! and lifecycle timestamps. It is a plain struct with no locking of its
//! own — the owning match actor is its single serialization domain, so no
//! two events for the same match ever touch it in parallel.

use std::time::{Duration, Instant};

use crate::game::rules;
use crate::game::types::{MatchOutcome, Move, Seat};

/// Running per-player counters, updated as moves are recorded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerCounters {
    pub rocks: u32,
    pub papers: u32,
    pub scissors: u32,
    pub wins: u32,
}

impl PlayerCounters {
    fn record(&mut self, mv: Move) {
        match mv {
            Move::Rock => self.rocks += 1,
            Move::Paper => self.papers += 1,
            Move::Scissors => self.scissors += 1,
        }
    }
}

/// What happened to a submitted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundProgress {
    /// First move of the round from this seat; the round stays open.
    Recorded,
    /// This seat's slot was already filled for the open round; ignored.
    Duplicate,
    /// Both slots filled; the round resolved and the state advanced.
    Resolved(ResolvedRound),
}

/// A fully resolved round, reported once per round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRound {
    pub round: u32,
    /// Both moves, player one first.
    pub moves: [Move; 2],
    pub outcome: MatchOutcome,
    /// True when this was the final round of the match.
    pub match_over: bool,
}

pub struct MatchState {
    current_round: u32,
    total_rounds: u32,
    /// Move slots for the open round, player one first. Cleared together
    /// when the next round opens.
    slots: [Option<Move>; 2],
    pub players: [PlayerCounters; 2],
    pub ties: u32,
    started_at: Instant,
    completed_at: Option<Instant>,
}

impl MatchState {
    pub fn new(total_rounds: u32) -> Self {
        Self {
            current_round: 1,
            total_rounds,
            slots: [None, None],
            players: [PlayerCounters::default(), PlayerCounters::default()],
            ties: 0,
            started_at: Instant::now(),
            completed_at: None,
        }
    }

    /// Round currently awaiting moves, starting at 1.
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Wall-clock time from creation to completion, or to now while the
    /// match is still running.
    pub fn duration(&self) -> Duration {
        match self.completed_at {
            Some(at) => at.duration_since(self.started_at),
            None => self.started_at.elapsed(),
        }
    }

    /// Records `seat`'s move for the open round.
    ///
    /// A second move from the same seat before the round resolves is a
    /// duplicate and leaves the state untouched. When the other slot is
    /// already filled, the round resolves: counters update, the round
    /// number advances (or the match completes), and both slots clear.
    pub fn record_move(&mut self, seat: Seat, mv: Move) -> RoundProgress {
        if self.is_complete() {
            return RoundProgress::Duplicate;
        }
        let slot = &mut self.slots[seat.index()];
        if slot.is_some() {
            return RoundProgress::Duplicate;
        }
        *slot = Some(mv);
        self.players[seat.index()].record(mv);

        match (self.slots[0], self.slots[1]) {
            (Some(one), Some(two)) => RoundProgress::Resolved(self.resolve_round(one, two)),
            _ => RoundProgress::Recorded,
        }
    }

    fn resolve_round(&mut self, one: Move, two: Move) -> ResolvedRound {
        let outcome = rules::resolve(one, two);
        match outcome {
            MatchOutcome::PlayerOneWin => self.players[0].wins += 1,
            MatchOutcome::PlayerTwoWin => self.players[1].wins += 1,
            MatchOutcome::Tie => self.ties += 1,
        }

        let resolved = ResolvedRound {
            round: self.current_round,
            moves: [one, two],
            outcome,
            match_over: self.current_round >= self.total_rounds,
        };

        self.slots = [None, None];
        if resolved.match_over {
            self.completed_at = Some(Instant::now());
        } else {
            self.current_round += 1;
        }
        resolved
    }
}
