use crate::services::{NotifyError, RosterError, SinkError};
use thiserror::Error;

/// Top-level error for the binary: every failure a run can surface.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}
