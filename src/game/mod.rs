// src/game/mod.rs

//! Game layer root module.
//!
//! Pure match logic, free of any actor or transport concern:
//! - Move and outcome types shared with the server layer
//! - Round resolution rules (cyclic dominance)
//! - Per-match round state and counters
//! - Final statistics derivation

pub mod rules;
pub mod state;
pub mod stats;
pub mod types;
