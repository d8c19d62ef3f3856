// Service exports
pub mod notifier;
pub mod roster;
pub mod sink;

pub use notifier::{Notifier, NotifyError, NotifySummary};
pub use roster::{is_match_column_header, match_column_header, Roster, RosterError};
pub use sink::{write_round, SinkError};
