/// Matchmaking module: FIFO waiting pool and pairing of handshaked sessions.

pub mod server;
