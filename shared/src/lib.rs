use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod export;
pub mod submission;
pub mod ticket;

pub use catalog::{parse_catalog, validate_catalog, CatalogError, CatalogItem};
pub use export::{export_file_name, ExportRow, ExportSheet, EXPORT_SHEET_NAME};
pub use submission::{build_submission, SubmissionError, UNKNOWN_ITEM_NAME};
pub use ticket::{LineItem, LineView, Ticket, TicketAction, TicketError, TicketView};

/// One line of a submitted ticket as it travels to the ticket log service.
///
/// Price is deliberately absent: the log only records what was sold and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketEntry {
    pub name: String,
    /// ISO-8601 UTC timestamp with millisecond precision, shared by every entry of one submission
    pub timestamp: String,
    pub quantity: u32,
}

/// Success body for POST /save-ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveTicketResponse {
    pub message: String,
}

/// Error body for POST /save-ticket.
///
/// `details` is only present for client errors; server errors stay generic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveTicketErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Log line forwarded from the browser to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRequest {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}

/// Format an amount the way the till displays it, e.g. `$5.00`
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Format an amount as plain two-decimal text, e.g. `5.00`
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}
