/// Server configuration constants.
///
/// Bind address and the statistics output file. The bind address can be
/// overridden with the `ARENA_BIND` environment variable.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Environment variable checked at startup for an alternate bind address.
pub const BIND_ADDR_ENV: &str = "ARENA_BIND";

/// File the statistics recorder appends one JSON line per completed match to.
pub const STATS_FILE: &str = "match_statistics.jsonl";
