use crate::models::{Frequency, Person, PersonId};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Positions of the fixed columns every roster file must carry, in addition
/// to any number of `match_YYYYMMDD` round columns.
struct FixedColumns {
    email: usize,
    friendly_name: usize,
    full_name: usize,
    gender: usize,
    cluster: usize,
    year: usize,
    new_to_cluster: usize,
    frequency: usize,
}

/// Errors raised while loading or validating a roster file.
///
/// Every variant is a hard failure: a malformed roster is a contract
/// violation and nothing downstream tries to recover from or skip bad rows.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Roster missing required column {0}")]
    MissingColumn(String),

    #[error("Duplicate email in roster: {0}")]
    DuplicateEmail(String),

    #[error("Row {row} has an empty email cell")]
    EmptyEmail { row: usize },

    #[error("Invalid frequency {value:?} for {email}")]
    InvalidFrequency { email: String, value: String },

    #[error("Invalid new_to_cluster flag {value:?} for {email}")]
    InvalidFlag { email: String, value: String },

    #[error("Round column {column} references unknown email {partner}")]
    UnknownPartner { column: String, partner: String },
}

/// The round column header for a lunch date, e.g. `match_20260315`.
pub fn match_column_header(date: NaiveDate) -> String {
    format!("match_{}", date.format("%Y%m%d"))
}

/// Whether a header names a round column.
pub fn is_match_column_header(header: &str) -> bool {
    header
        .strip_prefix("match_")
        .map(|rest| rest.len() == 8 && rest.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

/// An in-memory roster: validated people plus the raw rows they came from.
///
/// The raw headers and rows are kept so the result sink can rewrite the file
/// with one extra column without disturbing anything it does not understand.
/// History is the union of each person's entries across every round column.
#[derive(Debug, Clone)]
pub struct Roster {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    people: Vec<Person>,
    by_email: HashMap<PersonId, usize>,
}

impl Roster {
    /// Load and validate the roster CSV at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path.as_ref())?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect::<Vec<String>>());
        }

        Self::from_rows(headers, rows)
    }

    /// Build a roster from already-split header and data rows.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, RosterError> {
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| RosterError::MissingColumn(name.to_string()))
        };
        let cols = FixedColumns {
            email: column("email")?,
            friendly_name: column("friendly_name")?,
            full_name: column("full_name")?,
            gender: column("gender")?,
            cluster: column("cluster")?,
            year: column("year")?,
            new_to_cluster: column("new_to_cluster")?,
            frequency: column("frequency")?,
        };
        let match_columns: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| is_match_column_header(h))
            .map(|(i, _)| i)
            .collect();
        debug!(columns = headers.len(), rounds = match_columns.len(), "roster columns parsed");

        let cell = |row: &Vec<String>, col: usize| -> String {
            row.get(col).map(|s| s.trim().to_string()).unwrap_or_default()
        };

        // First pass: identities, so history references can be checked.
        let mut by_email: HashMap<PersonId, usize> = HashMap::new();
        for (i, row) in rows.iter().enumerate() {
            let email = cell(row, cols.email);
            if email.is_empty() {
                // Row numbers for the operator are 1-based and include the
                // header row, matching what a spreadsheet shows.
                return Err(RosterError::EmptyEmail { row: i + 2 });
            }
            if by_email.insert(email.clone(), i).is_some() {
                return Err(RosterError::DuplicateEmail(email));
            }
        }

        // Second pass: full person records with history.
        let mut people = Vec::with_capacity(rows.len());
        for row in &rows {
            let email = cell(row, cols.email);

            let frequency_cell = cell(row, cols.frequency);
            let frequency = Frequency::from_cell(&frequency_cell).ok_or_else(|| {
                RosterError::InvalidFrequency {
                    email: email.clone(),
                    value: frequency_cell.clone(),
                }
            })?;

            let flag_cell = cell(row, cols.new_to_cluster);
            let new_to_cluster = parse_flag(&flag_cell).ok_or_else(|| RosterError::InvalidFlag {
                email: email.clone(),
                value: flag_cell.clone(),
            })?;

            let mut history = HashSet::new();
            for &col in &match_columns {
                for partner in cell(row, col).split(';') {
                    let partner = partner.trim();
                    if partner.is_empty() {
                        continue;
                    }
                    if !by_email.contains_key(partner) {
                        return Err(RosterError::UnknownPartner {
                            column: headers[col].clone(),
                            partner: partner.to_string(),
                        });
                    }
                    history.insert(partner.to_string());
                }
            }

            people.push(Person {
                email,
                friendly_name: cell(row, cols.friendly_name),
                full_name: cell(row, cols.full_name),
                gender: cell(row, cols.gender),
                cluster: cell(row, cols.cluster),
                year: cell(row, cols.year),
                new_to_cluster,
                frequency,
                history,
            });
        }

        Ok(Self { headers, rows, people, by_email })
    }

    /// Everyone on the roster, excluded people included, in file order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// The subset the engine should see: everyone not opted out.
    pub fn eligible_people(&self) -> Vec<Person> {
        self.people.iter().filter(|p| p.eligible()).cloned().collect()
    }

    pub fn person(&self, email: &str) -> Option<&Person> {
        self.by_email.get(email).map(|&i| &self.people[i])
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Index of the round column for `date`, if the roster has one.
    pub fn match_column(&self, date: NaiveDate) -> Option<usize> {
        let header = match_column_header(date);
        self.headers.iter().position(|h| *h == header)
    }

    /// The raw cell for `email` in the given column.
    pub fn cell(&self, email: &str, column: usize) -> Option<&str> {
        let &row = self.by_email.get(email)?;
        self.rows[row].get(column).map(|s| s.trim())
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

fn parse_flag(cell: &str) -> Option<bool> {
    match cell.to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Some(false),
        "1" | "true" | "yes" => Some(true),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        [
            "email",
            "friendly_name",
            "full_name",
            "gender",
            "cluster",
            "year",
            "new_to_cluster",
            "frequency",
            "match_20250101",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn row(email: &str, cluster: &str, newcomer: &str, freq: &str, past: &str) -> Vec<String> {
        vec![
            email.to_string(),
            email.split('@').next().unwrap().to_string(),
            format!("{} Person", email),
            "they".to_string(),
            cluster.to_string(),
            "2024".to_string(),
            newcomer.to_string(),
            freq.to_string(),
            past.to_string(),
        ]
    }

    #[test]
    fn test_load_builds_history_from_round_columns() {
        let roster = Roster::from_rows(
            headers(),
            vec![
                row("a@x.com", "s", "0", "1", "b@x.com"),
                row("b@x.com", "e", "1", "1", "a@x.com"),
                row("c@x.com", "s", "0", "0", ""),
            ],
        )
        .unwrap();

        assert_eq!(roster.len(), 3);
        assert!(roster.person("a@x.com").unwrap().has_matched("b@x.com"));
        assert!(roster.person("b@x.com").unwrap().new_to_cluster);
        assert_eq!(roster.eligible_people().len(), 2);
    }

    #[test]
    fn test_multi_partner_cells_split_on_semicolon() {
        let roster = Roster::from_rows(
            headers(),
            vec![
                row("a@x.com", "s", "0", "1", "b@x.com; c@x.com"),
                row("b@x.com", "e", "0", "1", "a@x.com"),
                row("c@x.com", "s", "0", "1", "a@x.com"),
            ],
        )
        .unwrap();

        let a = roster.person("a@x.com").unwrap();
        assert!(a.has_matched("b@x.com"));
        assert!(a.has_matched("c@x.com"));
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let err = Roster::from_rows(
            headers(),
            vec![
                row("a@x.com", "s", "0", "1", ""),
                row("a@x.com", "e", "0", "1", ""),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, RosterError::DuplicateEmail(email) if email == "a@x.com"));
    }

    #[test]
    fn test_unknown_history_reference_is_rejected() {
        let err = Roster::from_rows(
            headers(),
            vec![row("a@x.com", "s", "0", "1", "ghost@x.com")],
        )
        .unwrap_err();
        assert!(matches!(err, RosterError::UnknownPartner { partner, .. } if partner == "ghost@x.com"));
    }

    #[test]
    fn test_missing_required_column_is_rejected() {
        let mut partial = headers();
        partial.retain(|h| h != "cluster");
        let err = Roster::from_rows(partial, vec![]).unwrap_err();
        assert!(matches!(err, RosterError::MissingColumn(col) if col == "cluster"));
    }

    #[test]
    fn test_garbage_frequency_is_rejected() {
        let err = Roster::from_rows(
            headers(),
            vec![row("a@x.com", "s", "0", "weekly", "")],
        )
        .unwrap_err();
        assert!(matches!(err, RosterError::InvalidFrequency { .. }));
    }

    #[test]
    fn test_match_column_headers() {
        assert!(is_match_column_header("match_20250101"));
        assert!(!is_match_column_header("match_2025"));
        assert!(!is_match_column_header("match_2025010a"));
        assert!(!is_match_column_header("rematch_20250101"));

        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(match_column_header(date), "match_20260315");
    }
}
