use crate::models::Person;

/// Tier assigned to a pair that has already met in a prior round.
///
/// Lowest priority, but deliberately not removed from consideration: once
/// every non-negative tier is exhausted, a repeat pairing beats leaving both
/// people unmatched.
pub const PREVIOUS_MATCH_TIER: i32 = -1;

/// Compute the compatibility tier for two distinct eligible people.
///
/// Higher tiers are matched first. The rule, evaluated in order:
/// 1. The two have matched in any prior round -> [`PREVIOUS_MATCH_TIER`].
/// 2. Either is new to their cluster -> 2 if they share a cluster, 1 if not.
///    Newcomers are steered toward their own cluster first to build a local
///    anchor.
/// 3. Otherwise -> 1 across clusters, 0 within one. Established members are
///    steered toward cross-cluster pairings to diversify connections.
///
/// The result is symmetric: `score_pair(a, b) == score_pair(b, a)`. The
/// function is pure and total over all distinct eligible pairs.
pub fn score_pair(a: &Person, b: &Person) -> i32 {
    if a.has_matched(&b.email) || b.has_matched(&a.email) {
        return PREVIOUS_MATCH_TIER;
    }

    if a.new_to_cluster || b.new_to_cluster {
        return if a.cluster == b.cluster { 2 } else { 1 };
    }

    // For everyone else, prefer matching with someone outside their cluster.
    if a.cluster != b.cluster {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use std::collections::HashSet;

    fn person(email: &str, cluster: &str, newcomer: bool) -> Person {
        Person {
            email: email.to_string(),
            friendly_name: email.to_string(),
            full_name: email.to_string(),
            gender: "".to_string(),
            cluster: cluster.to_string(),
            year: "2024".to_string(),
            new_to_cluster: newcomer,
            frequency: Frequency::Normal,
            history: HashSet::new(),
        }
    }

    #[test]
    fn test_newcomer_same_cluster_scores_highest() {
        let newcomer = person("n@x.com", "sales", true);
        let veteran = person("v@x.com", "sales", false);
        assert_eq!(score_pair(&newcomer, &veteran), 2);
    }

    #[test]
    fn test_newcomer_cross_cluster() {
        let newcomer = person("n@x.com", "sales", true);
        let veteran = person("v@x.com", "eng", false);
        assert_eq!(score_pair(&newcomer, &veteran), 1);
    }

    #[test]
    fn test_veterans_prefer_cross_cluster() {
        let a = person("a@x.com", "sales", false);
        let b = person("b@x.com", "eng", false);
        let c = person("c@x.com", "sales", false);
        assert_eq!(score_pair(&a, &b), 1);
        assert_eq!(score_pair(&a, &c), 0);
    }

    #[test]
    fn test_prior_match_wins_over_everything() {
        let mut a = person("a@x.com", "sales", true);
        let b = person("b@x.com", "sales", true);
        a.history.insert(b.email.clone());
        assert_eq!(score_pair(&a, &b), PREVIOUS_MATCH_TIER);
        // History recorded on either side is enough.
        assert_eq!(score_pair(&b, &a), PREVIOUS_MATCH_TIER);
    }

    #[test]
    fn test_score_is_symmetric() {
        let people = vec![
            person("a@x.com", "sales", false),
            person("b@x.com", "eng", true),
            person("c@x.com", "sales", true),
            person("d@x.com", "ops", false),
        ];
        for a in &people {
            for b in &people {
                if a.email != b.email {
                    assert_eq!(score_pair(a, b), score_pair(b, a));
                }
            }
        }
    }
}
