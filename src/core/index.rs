use crate::core::scoring::score_pair;
use crate::models::{Pair, Person, PersonId};
use rand::Rng;
use std::collections::{BTreeMap, HashMap};

/// Every candidate pair for one round, grouped by tier.
///
/// Built once from the eligible roster and then consumed destructively by
/// the matcher: committing a pair invalidates both of its members, which
/// removes every other pair touching them. The index is private working
/// state for a single round and holds no I/O.
///
/// Buckets are vectors so a uniform draw is an O(1) index; a per-person
/// adjacency map makes invalidation proportional to the person's remaining
/// degree rather than the full roster.
#[derive(Debug, Default)]
pub struct ScoreIndex {
    /// Tier -> pairs currently live at that tier. Ordered so tiers can be
    /// walked from highest to lowest, with the prior-match tier last.
    buckets: BTreeMap<i32, Vec<Pair>>,
    /// Pair -> its tier, for constant-time removal bookkeeping.
    tiers: HashMap<Pair, i32>,
    /// Person -> pairs that include them.
    adjacency: HashMap<PersonId, Vec<Pair>>,
}

impl ScoreIndex {
    /// Score all N*(N-1)/2 unordered pairs of the eligible roster.
    ///
    /// Rebuilding from the same roster always produces the same tier
    /// assignment; the only randomness in a round lives in [`pick_random`].
    ///
    /// [`pick_random`]: ScoreIndex::pick_random
    pub fn build(people: &[Person]) -> Self {
        let mut index = ScoreIndex::default();

        for (i, a) in people.iter().enumerate() {
            for b in &people[i + 1..] {
                let tier = score_pair(a, b);
                let pair = Pair::new(a.email.clone(), b.email.clone());

                index.buckets.entry(tier).or_default().push(pair.clone());
                index.tiers.insert(pair.clone(), tier);
                index
                    .adjacency
                    .entry(a.email.clone())
                    .or_default()
                    .push(pair.clone());
                index.adjacency.entry(b.email.clone()).or_default().push(pair);
            }
        }

        index
    }

    /// Draw one pair uniformly at random from the given tier's live pairs.
    ///
    /// Returns `None` once the bucket is empty or the tier never existed.
    /// The pair stays in the index; committing it is the caller's decision,
    /// expressed by invalidating both members.
    pub fn pick_random<R: Rng>(&self, tier: i32, rng: &mut R) -> Option<Pair> {
        let bucket = self.buckets.get(&tier)?;
        if bucket.is_empty() {
            return None;
        }
        Some(bucket[rng.gen_range(0..bucket.len())].clone())
    }

    /// Remove every pair that includes `person` from the whole index.
    ///
    /// A pair removed through one member also disappears from lookups via
    /// the other member; the tier bookkeeping makes the second removal a
    /// no-op.
    pub fn invalidate(&mut self, person: &str) {
        for pair in self.adjacency.remove(person).unwrap_or_default() {
            let Some(tier) = self.tiers.remove(&pair) else {
                // Already removed via the other member.
                continue;
            };
            if let Some(bucket) = self.buckets.get_mut(&tier) {
                if let Some(pos) = bucket.iter().position(|p| *p == pair) {
                    bucket.swap_remove(pos);
                }
            }
        }
    }

    /// The tiers present at build time, highest first, prior-match tier
    /// last.
    ///
    /// The list is a frozen snapshot: invalidation empties buckets but
    /// never invents new tiers, so callers walk this list once and skip
    /// buckets that have emptied under them.
    pub fn tiers_descending(&self) -> Vec<i32> {
        self.buckets.keys().rev().copied().collect()
    }

    /// Number of live pairs across all tiers.
    pub fn remaining_pairs(&self) -> usize {
        self.tiers.len()
    }
}
