use crate::models::PersonId;
use serde::{Deserialize, Serialize};

/// An unordered pair of distinct person identities.
///
/// Construction normalizes the order so that `Pair::new(a, b)` and
/// `Pair::new(b, a)` are the same value, which lets the pair act as a map
/// key regardless of which member it was looked up through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    first: PersonId,
    second: PersonId,
}

impl Pair {
    /// Build the canonical pair for two distinct identities.
    ///
    /// # Panics
    /// Panics if both identities are equal; a person never pairs with
    /// themselves, so an equal pair is a caller bug.
    pub fn new(a: impl Into<PersonId>, b: impl Into<PersonId>) -> Self {
        let (a, b) = (a.into(), b.into());
        assert_ne!(a, b, "a pair must contain two distinct people");
        if a < b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    /// Whether `id` is one of the two members.
    pub fn contains(&self, id: &str) -> bool {
        self.first == id || self.second == id
    }

    /// The other member of the pair, if `id` is a member at all.
    pub fn partner_of(&self, id: &str) -> Option<&str> {
        if self.first == id {
            Some(&self.second)
        } else if self.second == id {
            Some(&self.first)
        } else {
            None
        }
    }
}

/// The outcome of one round of matching.
///
/// Pairs are disjoint: no identity appears in more than one pair. People the
/// matcher could not place (odd roster, exhausted candidates) end up in
/// `unmatched`; that is a normal outcome, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundResult {
    pub pairs: Vec<Pair>,
    pub unmatched: Vec<PersonId>,
}

impl RoundResult {
    /// Number of people placed into a pair this round.
    pub fn matched_count(&self) -> usize {
        self.pairs.len() * 2
    }

    /// All partners assigned to `id` this round.
    ///
    /// The baseline matcher assigns at most one, but the result shape allows
    /// several so downstream consumers need no change if that ever happens.
    pub fn partners_of<'a>(&'a self, id: &str) -> Vec<&'a str> {
        self.pairs
            .iter()
            .filter_map(|pair| pair.partner_of(id))
            .collect()
    }
}
