use serde::{Deserialize, Serialize};

/// One of the three recognized moves. Wire value is the discriminant
/// (0 = Rock, 1 = Paper, 2 = Scissors).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Move {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

impl Move {
    /// The move this move defeats.
    pub fn beats(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }
}

impl From<Move> for u8 {
    fn from(mv: Move) -> u8 {
        mv as u8
    }
}

impl TryFrom<u8> for Move {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Move::Rock),
            1 => Ok(Move::Paper),
            2 => Ok(Move::Scissors),
            other => Err(format!("invalid move value: {}", other)),
        }
    }
}

/// Which side of a match a session occupies, in arrival order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub fn opponent(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// Index into per-player arrays (player one first).
    pub fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }
}

/// Match-level outcome of a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    PlayerOneWin,
    PlayerTwoWin,
    Tie,
}

/// Player-relative result of a round, as reported to each client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerResult {
    Win,
    Loss,
    Tie,
}
