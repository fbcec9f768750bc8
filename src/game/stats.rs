//! Final statistics derivation.
//!
//! Converts a completed match's counters into an immutable
//! `MatchStatistics` record: raw counts, throughput, per-player move bias,
//! and a cheap seed-collision heuristic. Pure — the server layer hands the
//! record to the statistics recorder and never mutates it afterwards.

use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::config::game::SEED_COLLISION_THRESHOLD;
use crate::game::state::MatchState;

/// Immutable summary of one completed match. One record per match.
#[derive(Clone, Debug, Serialize)]
pub struct MatchStatistics {
    pub match_id: Uuid,
    pub player_one_name: String,
    pub player_two_name: String,

    pub player_one_rocks: u32,
    pub player_one_papers: u32,
    pub player_one_scissors: u32,
    pub player_one_wins: u32,

    pub player_two_rocks: u32,
    pub player_two_papers: u32,
    pub player_two_scissors: u32,
    pub player_two_wins: u32,

    pub ties: u32,
    pub total_rounds: u32,

    pub duration_millis: u64,
    pub rounds_per_second: f64,
    /// Writes issued to the statistics store for this match (always 1:
    /// the engine batches the whole match into a single record).
    pub storage_ops: u64,

    /// Frequency of the player's most common move, in percent of total
    /// rounds. 33.3% is a uniform random player.
    pub player_one_bias: f64,
    pub player_two_bias: f64,
    /// True when both players' move distributions are near-identical,
    /// suggesting both drew from the same random sequence.
    pub seed_collision_detected: bool,

    /// Unix milliseconds at record creation.
    pub created_at: u64,
}

/// Builds the statistics record for a completed match.
///
/// `player_names` are the composed display labels, player one first.
pub fn finalize(match_id: Uuid, player_names: [String; 2], state: &MatchState) -> MatchStatistics {
    let [p1, p2] = state.players;
    let total_rounds = state.total_rounds();
    // A sub-millisecond match still reports a finite throughput.
    let duration_millis = (state.duration().as_millis() as u64).max(1);

    let [one_name, two_name] = player_names;
    MatchStatistics {
        match_id,
        player_one_name: one_name,
        player_two_name: two_name,
        player_one_rocks: p1.rocks,
        player_one_papers: p1.papers,
        player_one_scissors: p1.scissors,
        player_one_wins: p1.wins,
        player_two_rocks: p2.rocks,
        player_two_papers: p2.papers,
        player_two_scissors: p2.scissors,
        player_two_wins: p2.wins,
        ties: state.ties,
        total_rounds,
        duration_millis,
        rounds_per_second: (total_rounds as f64 * 1000.0) / duration_millis as f64,
        storage_ops: 1,
        player_one_bias: bias_percent(p1.rocks, p1.papers, p1.scissors, total_rounds),
        player_two_bias: bias_percent(p2.rocks, p2.papers, p2.scissors, total_rounds),
        seed_collision_detected: detect_seed_collision(state),
        created_at: unix_millis(),
    }
}

/// Percentage of rounds taken by the player's most frequent move.
fn bias_percent(rocks: u32, papers: u32, scissors: u32, total_rounds: u32) -> f64 {
    if total_rounds == 0 {
        return 0.0;
    }
    let max = rocks.max(papers).max(scissors);
    (max as f64 * 100.0) / total_rounds as f64
}

/// Heuristic: if every per-move count differs by fewer than the configured
/// threshold between the two players, their random sequences were
/// suspiciously similar.
fn detect_seed_collision(state: &MatchState) -> bool {
    let [p1, p2] = state.players;
    p1.rocks.abs_diff(p2.rocks) < SEED_COLLISION_THRESHOLD
        && p1.papers.abs_diff(p2.papers) < SEED_COLLISION_THRESHOLD
        && p1.scissors.abs_diff(p2.scissors) < SEED_COLLISION_THRESHOLD
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
