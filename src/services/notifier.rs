use crate::config::NotifierSettings;
use crate::models::{Person, PersonId};
use crate::services::roster::{match_column_header, Roster};
use chrono::NaiveDate;
use std::process::Command;
use thiserror::Error;
use tracing::{error, info};

/// Errors that stop a notification run before any messages go out.
///
/// A single message failing to send is not in here: the external mail
/// process owns retries, so per-recipient failures are collected into the
/// [`NotifySummary`] and the run keeps going.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Roster has no {0} column; run --roulette for that date first")]
    MissingRound(String),

    #[error("Round column references {0}, which is not on the roster")]
    UnknownPartner(PersonId),

    #[error("Failed to spawn mail command {command:?}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of one notification run.
#[derive(Debug, Default)]
pub struct NotifySummary {
    pub sent: usize,
    pub failures: Vec<PersonId>,
}

/// Dispatches one message per matched person through an external mail
/// command (originally a PowerShell script driving Outlook).
///
/// Messages go out serially; the mail automation on the other side is not
/// built for parallel sends.
#[derive(Debug, Clone)]
pub struct Notifier {
    command: String,
    script: String,
}

impl Notifier {
    pub fn new(settings: NotifierSettings) -> Self {
        Self {
            command: settings.command,
            script: settings.script,
        }
    }

    /// Send a pairing message to every person matched on `date`.
    ///
    /// Unmatched people receive nothing. People matched to several partners
    /// get one message per partner.
    pub fn send_round(&self, roster: &Roster, date: NaiveDate) -> Result<NotifySummary, NotifyError> {
        let column = roster
            .match_column(date)
            .ok_or_else(|| NotifyError::MissingRound(match_column_header(date)))?;
        let pretty_date = date.format("%A %B %d, %Y").to_string();

        let mut summary = NotifySummary::default();
        for person in roster.people() {
            let cell = roster.cell(&person.email, column).unwrap_or_default();
            for partner_email in cell.split(';').map(str::trim).filter(|s| !s.is_empty()) {
                let partner = roster
                    .person(partner_email)
                    .ok_or_else(|| NotifyError::UnknownPartner(partner_email.to_string()))?;

                info!(recipient = %person.email, partner = %partner.email, "sending match email");
                let status = Command::new(&self.command)
                    .arg(&self.script)
                    .args(message_args(person, partner, &pretty_date))
                    .status()
                    .map_err(|source| NotifyError::Spawn {
                        command: self.command.clone(),
                        source,
                    })?;

                if status.success() {
                    summary.sent += 1;
                } else {
                    error!(recipient = %person.email, code = ?status.code(), "mail command failed");
                    summary.failures.push(person.email.clone());
                }
            }
        }

        Ok(summary)
    }
}

/// Argument list handed to the mail script for one recipient/partner pair.
///
/// The flag names are the mail script's interface; changing them breaks the
/// script, not this binary.
fn message_args(recipient: &Person, partner: &Person, pretty_date: &str) -> Vec<String> {
    vec![
        "-email".to_string(),
        recipient.email.clone(),
        "-friendlyName".to_string(),
        recipient.friendly_name.clone(),
        "-lunchDate".to_string(),
        pretty_date.to_string(),
        "-otherEmail".to_string(),
        partner.email.clone(),
        "-otherFriendlyName".to_string(),
        partner.friendly_name.clone(),
        "-otherFullName".to_string(),
        partner.full_name.clone(),
        "-otherGender".to_string(),
        partner.gender.clone(),
    ]
}
