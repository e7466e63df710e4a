#![deny(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements depth limited adversarial search for games with one maximizing agent and
//! any number of adversaries. You provide a game that implements [oracle::StateOracle] and a
//! 'scoring' function that turns a game state into an `f64`, and pick how the adversaries are
//! assumed to play: worst case (minimax, optionally with alpha-beta pruning) or uniformly random
//! (expectimax).
//!
//! The game is only ever asked for legal moves and successor states, so the search works for any
//! turn based game where agents move one at a time in a fixed order.
//!
//! A one ply [reflex::ReflexAgent] for grid games is included as a baseline to compare searches
//! against.

mod error;
pub use error::{ConfigError, SearchError};

pub mod oracle;
pub mod reflex;
pub mod score;
pub mod search;
pub mod turn;

#[cfg(test)]
mod test_games;
