//! Spreadsheet layout for exported tickets.
//!
//! This module only decides what goes in the sheet; writing the workbook file is left to
//! the frontend.

use chrono::NaiveDate;

use crate::format_amount;
use crate::ticket::Ticket;

pub const EXPORT_SHEET_NAME: &str = "Ticket";
pub const EXPORT_HEADERS: [&str; 4] = ["Name", "Price", "Quantity", "Total"];

/// One row of the exported sheet. The summary row leaves price and quantity blank.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub name: String,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
    /// Two-decimal text, e.g. `5.00`
    pub total: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSheet {
    pub sheet_name: String,
    pub rows: Vec<ExportRow>,
}

impl ExportSheet {
    /// Build the sheet for a ticket, or `None` when there is nothing to export
    pub fn from_ticket(ticket: &Ticket) -> Option<Self> {
        if ticket.is_empty() {
            return None;
        }

        let mut rows: Vec<ExportRow> = ticket
            .lines()
            .iter()
            .map(|line| ExportRow {
                name: line.name.clone(),
                price: Some(line.price),
                quantity: Some(line.quantity),
                total: format_amount(line.total()),
            })
            .collect();

        rows.push(ExportRow {
            name: "Total".to_string(),
            price: None,
            quantity: None,
            total: ticket.formatted_subtotal(),
        });

        Some(Self {
            sheet_name: EXPORT_SHEET_NAME.to_string(),
            rows,
        })
    }

    pub fn headers(&self) -> &'static [&'static str; 4] {
        &EXPORT_HEADERS
    }
}

/// `ticket_<YYYY-MM-DD>.xlsx` for the given export date
pub fn export_file_name(date: NaiveDate) -> String {
    format!("ticket_{}.xlsx", date.format("%Y-%m-%d"))
}
