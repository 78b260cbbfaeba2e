//! Building the payload sent to POST /save-ticket.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::ticket::Ticket;
use crate::TicketEntry;

/// Name recorded for a line that somehow lost its name
pub const UNKNOWN_ITEM_NAME: &str = "Unknown";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SubmissionError {
    #[error("No items to save!")]
    EmptyTicket,
    #[error("Failed to save: Invalid data.")]
    InvalidEntry { index: usize },
}

/// Map every line of the ticket to a [`TicketEntry`] stamped with `now`.
///
/// All entries of one submission carry the same timestamp. The ticket itself is not touched.
pub fn build_submission(
    ticket: &Ticket,
    now: DateTime<Utc>,
) -> Result<Vec<TicketEntry>, SubmissionError> {
    if ticket.is_empty() {
        return Err(SubmissionError::EmptyTicket);
    }

    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let entries: Vec<TicketEntry> = ticket
        .lines()
        .iter()
        .map(|line| TicketEntry {
            name: if line.name.trim().is_empty() {
                UNKNOWN_ITEM_NAME.to_string()
            } else {
                line.name.clone()
            },
            timestamp: timestamp.clone(),
            quantity: line.quantity,
        })
        .collect();

    validate_entries(&entries)?;
    Ok(entries)
}

/// Every entry needs a name and a timestamp before anything goes over the wire
pub fn validate_entries(entries: &[TicketEntry]) -> Result<(), SubmissionError> {
    if entries.is_empty() {
        return Err(SubmissionError::EmptyTicket);
    }
    match entries
        .iter()
        .position(|entry| entry.name.is_empty() || entry.timestamp.is_empty())
    {
        Some(index) => Err(SubmissionError::InvalidEntry { index }),
        None => Ok(()),
    }
}
