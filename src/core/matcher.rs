use crate::core::index::ScoreIndex;
use crate::models::{Person, RoundResult};
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Greedy randomized matcher for one roulette round.
///
/// Walks the candidate tiers from most to least preferred and commits one
/// random pair at a time, invalidating both chosen people so nobody is
/// reconsidered. The matching is not globally optimal and does not try to
/// be; the tier ordering plus random tie-breaking is the whole policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundMatcher;

impl RoundMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Pair up the eligible roster for one round.
    ///
    /// The supplied RNG is the sole source of nondeterminism: a fixed seed
    /// over a fixed roster reproduces the identical result. Leftover people
    /// (odd roster, or every remaining candidate pair already invalidated)
    /// are reported in `unmatched`, which is a normal outcome.
    pub fn match_round<R: Rng>(&self, people: &[Person], rng: &mut R) -> RoundResult {
        let mut index = ScoreIndex::build(people);
        debug!(
            candidates = index.remaining_pairs(),
            tiers = ?index.tiers_descending(),
            "score index built"
        );

        let mut pairs = Vec::new();
        // The tier list is frozen up front; invalidation only ever empties
        // buckets, so emptied ones simply stop yielding.
        for tier in index.tiers_descending() {
            while let Some(pair) = index.pick_random(tier, rng) {
                index.invalidate(pair.first());
                index.invalidate(pair.second());
                debug!(tier, first = pair.first(), second = pair.second(), "pair committed");
                pairs.push(pair);
            }
        }

        let matched: HashSet<&str> = pairs
            .iter()
            .flat_map(|pair| [pair.first(), pair.second()])
            .collect();
        let unmatched = people
            .iter()
            .filter(|person| !matched.contains(person.email.as_str()))
            .map(|person| person.email.clone())
            .collect();

        RoundResult { pairs, unmatched }
    }
}
