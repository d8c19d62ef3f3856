//! Lunch Roulette - batch matching tool for community lunch rounds
//!
//! This library pairs members of a community for one-off lunches. The core
//! is a greedy randomized pairing engine over scored person-pairs; around it
//! sit a CSV roster source, a result sink that records rounds as dated
//! columns, and a notifier that drives an external mail command.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{score_pair, RoundMatcher, ScoreIndex, PREVIOUS_MATCH_TIER};
pub use crate::error::AppError;
pub use crate::models::{Frequency, Pair, Person, PersonId, RoundResult};
pub use crate::services::{match_column_header, write_round, Notifier, Roster};
