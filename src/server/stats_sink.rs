// src/server/stats_sink.rs

//! Statistics persistence collaborator.
//!
//! `StatsRecorder` accepts one finalized record per completed match and
//! appends it as a JSON line. It runs in its own mailbox: matches hand
//! records off with `do_send` and never wait on the write. Failures here
//! are logged and never affect protocol state.

use actix::prelude::*;
use log::{info, warn};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::game::stats::MatchStatistics;

/// Message: persist one completed match's statistics.
#[derive(Message)]
#[rtype(result = "()")]
pub struct RecordStatistics(pub MatchStatistics);

pub struct StatsRecorder {
    path: PathBuf,
}

impl StatsRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn append(&self, stats: &MatchStatistics) -> std::io::Result<()> {
        let line = serde_json::to_string(stats)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

impl Actor for StatsRecorder {
    type Context = Context<Self>;
}

impl Handler<RecordStatistics> for StatsRecorder {
    type Result = ();

    fn handle(&mut self, msg: RecordStatistics, _ctx: &mut Self::Context) -> Self::Result {
        let stats = msg.0;
        match self.append(&stats) {
            Ok(()) => info!(
                "[Stats] Match {} saved: RPS={:.2}, P1 Bias={:.2}%, P2 Bias={:.2}%, Collision={}",
                stats.match_id,
                stats.rounds_per_second,
                stats.player_one_bias,
                stats.player_two_bias,
                stats.seed_collision_detected
            ),
            Err(e) => warn!(
                "[Stats] Failed to save statistics for match {}: {}",
                stats.match_id, e
            ),
        }
    }
}
