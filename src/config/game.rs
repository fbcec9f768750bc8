/// Game configuration constants.
///
/// This module defines the main match parameters such as round count and
/// the statistics heuristics applied at match completion.
pub const TOTAL_ROUNDS: u32 = 1000; // Number of rounds played per match.

/// If every per-move counter differs by fewer than this many rounds between
/// the two players, the match is flagged as a possible seed collision
/// (both clients likely drew from near-identical random sequences).
pub const SEED_COLLISION_THRESHOLD: u32 = 5;

/// Optional limit (in seconds) a round may stay open awaiting moves.
/// `None` disables the timer: a silent peer is ended by the transport-level
/// disconnect, never by the engine. When set, a stalled round aborts the
/// match without finalizing statistics.
pub const ROUND_TIMEOUT_SECS: Option<u64> = None;
