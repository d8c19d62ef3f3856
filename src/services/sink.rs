use crate::models::{PersonId, RoundResult};
use crate::services::roster::{match_column_header, Roster};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors raised while persisting a round back into the roster file.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Roster already has a {0} column; refusing to overwrite a recorded round")]
    ColumnExists(String),

    #[error("Round result references {0}, which is not on the roster")]
    UnknownPerson(PersonId),
}

/// Write the roster back out with the round recorded in a new column.
///
/// The output keeps every existing column and row untouched and appends one
/// `match_YYYYMMDD` column at the end, so earlier round columns stay valid.
/// Each matched person's cell holds their partner's email; multiple partners
/// are joined with `;` (the matcher emits at most one today, but the format
/// supports more). Unmatched people get an empty cell.
pub fn write_round(
    roster: &Roster,
    result: &RoundResult,
    date: NaiveDate,
    out: impl AsRef<Path>,
) -> Result<(), SinkError> {
    let header = match_column_header(date);
    if roster.headers().iter().any(|h| *h == header) {
        return Err(SinkError::ColumnExists(header));
    }

    // Partner cells keyed by email. Checked against the roster so a result
    // computed from some other roster fails loudly instead of writing a
    // column full of holes.
    let mut partners: HashMap<&str, Vec<&str>> = HashMap::new();
    for pair in &result.pairs {
        for id in [pair.first(), pair.second()] {
            if roster.person(id).is_none() {
                return Err(SinkError::UnknownPerson(id.to_string()));
            }
        }
        partners.entry(pair.first()).or_default().push(pair.second());
        partners.entry(pair.second()).or_default().push(pair.first());
    }

    let mut writer = csv::Writer::from_path(out.as_ref())?;

    let mut headers: Vec<&str> = roster.headers().iter().map(String::as_str).collect();
    headers.push(&header);
    writer.write_record(&headers)?;

    for (person, row) in roster.people().iter().zip(roster.rows()) {
        let cell = partners
            .get(person.email.as_str())
            .map(|p| p.join(";"))
            .unwrap_or_default();

        let mut record: Vec<&str> = row.iter().map(String::as_str).collect();
        // Rows may be ragged if older tools trimmed trailing empty cells.
        record.resize(roster.headers().len(), "");
        record.push(&cell);
        writer.write_record(&record)?;
    }

    writer.flush().map_err(csv::Error::from)?;
    info!(
        column = %header,
        pairs = result.pairs.len(),
        unmatched = result.unmatched.len(),
        out = %out.as_ref().display(),
        "round written"
    );
    Ok(())
}
