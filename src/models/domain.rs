use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Opaque, stable identity for a person within a round.
///
/// The roster uses email addresses, but nothing in the engine depends on
/// that; any unique string works.
pub type PersonId = String;

/// How often a person wants to participate in the roulette.
///
/// Only excluded-vs-not affects matching today. `Frequent` is accepted from
/// the roster but not yet given any differentiated weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Excluded,
    Normal,
    Frequent,
}

impl Frequency {
    /// Parse the roster's numeric frequency cell. Blank means excluded.
    pub fn from_cell(cell: &str) -> Option<Frequency> {
        match cell.trim() {
            "" | "0" => Some(Frequency::Excluded),
            "1" => Some(Frequency::Normal),
            "2" => Some(Frequency::Frequent),
            _ => None,
        }
    }
}

/// One member of the community, as loaded from the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub email: PersonId,
    pub friendly_name: String,
    pub full_name: String,
    /// Free-form; only rendered into notification text, never scored.
    pub gender: String,
    /// Group/cohort identifier used to bias pairing.
    pub cluster: String,
    /// Carried from the roster for the operator's benefit; not scored.
    pub year: String,
    /// Newcomers are steered toward their own cluster first.
    pub new_to_cluster: bool,
    pub frequency: Frequency,
    /// Everyone this person has been paired with in any prior round.
    /// Immutable input to a round; only the result sink ever extends it.
    pub history: HashSet<PersonId>,
}

impl Person {
    /// Whether this person takes part in the round at all.
    pub fn eligible(&self) -> bool {
        self.frequency != Frequency::Excluded
    }

    /// Whether `other` appears in this person's prior-match history.
    pub fn has_matched(&self, other: &str) -> bool {
        self.history.contains(other)
    }
}
