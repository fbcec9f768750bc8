// src/server/registry.rs

//! Concurrent index of active matches.
//!
//! Two maps kept in lockstep: match id -> match actor (move routing) and
//! session id -> match id (disconnect routing and re-entry guards).
//! Entries for a match are inserted once at pairing and removed together
//! at completion or abort; lookups for different matches never contend.

use actix::Addr;
use dashmap::DashMap;
use uuid::Uuid;

use crate::server::battle::server::BattleMatch;

#[derive(Default)]
pub struct MatchRegistry {
    matches: DashMap<Uuid, Addr<BattleMatch>>,
    assignments: DashMap<Uuid, Uuid>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a freshly paired match and both participants' assignments.
    pub fn insert(&self, match_id: Uuid, addr: Addr<BattleMatch>, session_ids: [Uuid; 2]) {
        self.matches.insert(match_id, addr);
        for session_id in session_ids {
            self.assignments.insert(session_id, match_id);
        }
    }

    /// Removes a match and both assignments. Safe to call twice: the
    /// second call finds nothing to remove.
    pub fn remove(&self, match_id: Uuid, session_ids: [Uuid; 2]) {
        self.matches.remove(&match_id);
        for session_id in session_ids {
            // Only drop the assignment if it still points at this match;
            // the session may already be in a newer one.
            self.assignments
                .remove_if(&session_id, |_, assigned| *assigned == match_id);
        }
    }

    /// The match actor a session's events route into, if any.
    pub fn match_for_session(&self, session_id: Uuid) -> Option<Addr<BattleMatch>> {
        let match_id = *self.assignments.get(&session_id)?;
        self.matches.get(&match_id).map(|entry| entry.value().clone())
    }

    pub fn active_matches(&self) -> usize {
        self.matches.len()
    }
}
