// Core algorithm exports
pub mod index;
pub mod matcher;
pub mod scoring;

pub use index::ScoreIndex;
pub use matcher::RoundMatcher;
pub use scoring::{score_pair, PREVIOUS_MATCH_TIER};
