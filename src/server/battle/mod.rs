/// Battle module: per-match actor driving synchronized rounds, and the
/// wire/actor messages it exchanges with sessions.

pub mod messages;
pub mod server;
