//! Round resolution rules.
//!
//! Pure functions: cyclic dominance between the three moves, move value
//! validation, and mapping a match-level outcome to each player's view.

use crate::game::types::{MatchOutcome, Move, PlayerResult, Seat};

/// Checks that a raw wire value names one of the three recognized moves.
pub fn is_valid_move(value: u8) -> bool {
    value <= 2
}

/// Resolves one round. Each move beats exactly one other and loses to
/// exactly one other; identical moves tie.
pub fn resolve(one: Move, two: Move) -> MatchOutcome {
    if one == two {
        MatchOutcome::Tie
    } else if one.beats() == two {
        MatchOutcome::PlayerOneWin
    } else {
        MatchOutcome::PlayerTwoWin
    }
}

impl MatchOutcome {
    /// The result from the perspective of the player in `seat`.
    /// A tie maps identically for both.
    pub fn for_seat(self, seat: Seat) -> PlayerResult {
        match (self, seat) {
            (MatchOutcome::Tie, _) => PlayerResult::Tie,
            (MatchOutcome::PlayerOneWin, Seat::One) => PlayerResult::Win,
            (MatchOutcome::PlayerOneWin, Seat::Two) => PlayerResult::Loss,
            (MatchOutcome::PlayerTwoWin, Seat::Two) => PlayerResult::Win,
            (MatchOutcome::PlayerTwoWin, Seat::One) => PlayerResult::Loss,
        }
    }
}
