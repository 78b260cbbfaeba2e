//! Ticket state for the till.
//!
//! A [`Ticket`] owns the ordered list of line items. Lines are keyed by item name: adding an
//! item that is already on the ticket bumps its quantity instead of creating a second line.
//! Every mutation returns a freshly computed [`TicketView`] so callers never read the line
//! vector directly to render it.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::{format_amount, format_money};

/// A single line on the ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    /// Unit price captured when the item was first added
    pub price: f64,
    /// Always >= 1 while the line exists
    pub quantity: u32,
}

impl LineItem {
    pub fn total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A line as displayed on the ticket
#[derive(Debug, Clone, PartialEq)]
pub struct LineView {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub line_total: f64,
    /// Line total formatted for display, e.g. `$5.00`
    pub formatted_total: String,
}

/// Derived view of the whole ticket, rebuilt from scratch after every mutation
#[derive(Debug, Clone, PartialEq)]
pub struct TicketView {
    pub lines: Vec<LineView>,
    pub subtotal: f64,
    /// Subtotal formatted for display, e.g. `$5.00`
    pub formatted_total: String,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TicketError {
    #[error("Invalid price for {name}: {price}")]
    InvalidPrice { name: String, price: f64 },
}

/// A user action against the ticket. Lines are addressed by item name.
#[derive(Debug, Clone, PartialEq)]
pub enum TicketAction {
    Add(CatalogItem),
    Increment(String),
    Decrement(String),
    Remove(String),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ticket {
    lines: Vec<LineItem>,
}

impl Ticket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a catalog item.
    ///
    /// An item already on the ticket has its quantity incremented; otherwise a new line with
    /// quantity 1 is appended. The catalog price is snapshotted on the new line and later
    /// catalog changes never touch existing lines.
    pub fn add(&mut self, item: &CatalogItem) -> Result<TicketView, TicketError> {
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(TicketError::InvalidPrice {
                name: item.name.clone(),
                price: item.price,
            });
        }

        match self.lines.iter_mut().find(|line| line.name == item.name) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(LineItem {
                name: item.name.clone(),
                price: item.price,
                quantity: 1,
            }),
        }

        Ok(self.view())
    }

    /// Increment the line at `index`. Stale indices are ignored.
    pub fn increment(&mut self, index: usize) -> TicketView {
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity += 1;
        }
        self.view()
    }

    /// Decrement the line at `index`, removing it once its quantity reaches zero.
    /// Stale indices are ignored.
    pub fn decrement(&mut self, index: usize) -> TicketView {
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = line.quantity.saturating_sub(1);
            if line.quantity == 0 {
                self.lines.remove(index);
            }
        }
        self.view()
    }

    /// Remove the line at `index` outright. Stale indices are ignored.
    pub fn remove(&mut self, index: usize) -> TicketView {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
        self.view()
    }

    pub fn increment_named(&mut self, name: &str) -> TicketView {
        match self.position(name) {
            Some(index) => self.increment(index),
            None => self.view(),
        }
    }

    pub fn decrement_named(&mut self, name: &str) -> TicketView {
        match self.position(name) {
            Some(index) => self.decrement(index),
            None => self.view(),
        }
    }

    pub fn remove_named(&mut self, name: &str) -> TicketView {
        match self.position(name) {
            Some(index) => self.remove(index),
            None => self.view(),
        }
    }

    /// Drop every line, e.g. after a charge
    pub fn clear(&mut self) -> TicketView {
        self.lines.clear();
        self.view()
    }

    /// Apply one action. On error the ticket is left untouched.
    pub fn apply(&mut self, action: TicketAction) -> Result<TicketView, TicketError> {
        match action {
            TicketAction::Add(item) => self.add(&item),
            TicketAction::Increment(name) => Ok(self.increment_named(&name)),
            TicketAction::Decrement(name) => Ok(self.decrement_named(&name)),
            TicketAction::Remove(name) => Ok(self.remove_named(&name)),
            TicketAction::Clear => Ok(self.clear()),
        }
    }

    /// Recompute line totals and the subtotal
    pub fn view(&self) -> TicketView {
        let lines: Vec<LineView> = self
            .lines
            .iter()
            .map(|line| {
                let line_total = line.total();
                LineView {
                    name: line.name.clone(),
                    price: line.price,
                    quantity: line.quantity,
                    line_total,
                    formatted_total: format_money(line_total),
                }
            })
            .collect();

        let subtotal = self.subtotal();
        TicketView {
            lines,
            subtotal,
            formatted_total: format_money(subtotal),
        }
    }

    pub fn subtotal(&self) -> f64 {
        // Starting from +0.0 keeps an empty ticket from rendering as "$-0.00"
        self.lines.iter().fold(0.0, |acc, line| acc + line.total())
    }

    /// Subtotal as two-decimal text
    pub fn formatted_subtotal(&self) -> String {
        format_amount(self.subtotal())
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: f64) -> CatalogItem {
        CatalogItem {
            name: name.to_string(),
            price,
            image_class: "c1".to_string(),
        }
    }

    #[test]
    fn test_add_same_item_twice_increments_quantity() {
        let mut ticket = Ticket::new();
        ticket.add(&item("Cookie", 2.5)).unwrap();
        let view = ticket.add(&item("Cookie", 2.5)).unwrap();

        assert_eq!(ticket.len(), 1);
        assert_eq!(ticket.lines()[0].quantity, 2);
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.formatted_total, "$5.00");
    }

    #[test]
    fn test_add_then_increment_line() {
        let mut ticket = Ticket::new();
        ticket.add(&item("Cookie", 2.50)).unwrap();
        let view = ticket.increment(0);

        assert_eq!(
            ticket.lines(),
            &[LineItem {
                name: "Cookie".to_string(),
                price: 2.50,
                quantity: 2
            }]
        );
        assert_eq!(view.formatted_total, "$5.00");
        assert_eq!(view.lines[0].formatted_total, "$5.00");
    }

    #[test]
    fn test_add_rejects_invalid_price() {
        let mut ticket = Ticket::new();
        let result = ticket.add(&item("Cookie", f64::NAN));
        assert!(matches!(result, Err(TicketError::InvalidPrice { .. })));
        assert!(ticket.is_empty());

        let result = ticket.add(&item("Cookie", -2.0));
        assert!(matches!(result, Err(TicketError::InvalidPrice { .. })));
        assert!(ticket.is_empty());
    }

    #[test]
    fn test_price_is_snapshotted_at_add_time() {
        let mut ticket = Ticket::new();
        ticket.add(&item("Cookie", 2.0)).unwrap();
        // Catalog price changed after the line was created
        let view = ticket.add(&item("Cookie", 9.0)).unwrap();

        assert_eq!(ticket.lines()[0].price, 2.0);
        assert_eq!(view.subtotal, 4.0);
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let mut ticket = Ticket::new();
        ticket.add(&item("Cookie", 2.5)).unwrap();
        ticket.add(&item("Brownie", 3.0)).unwrap();

        let view = ticket.decrement(0);

        assert_eq!(ticket.len(), 1);
        assert_eq!(ticket.lines()[0].name, "Brownie");
        assert_eq!(view.formatted_total, "$3.00");
    }

    #[test]
    fn test_decrement_keeps_line_above_one() {
        let mut ticket = Ticket::new();
        ticket.add(&item("Cookie", 2.5)).unwrap();
        ticket.add(&item("Cookie", 2.5)).unwrap();

        ticket.decrement(0);

        assert_eq!(ticket.lines()[0].quantity, 1);
    }

    #[test]
    fn test_remove_deletes_line_regardless_of_quantity() {
        let mut ticket = Ticket::new();
        ticket.add(&item("Cookie", 2.5)).unwrap();
        ticket.increment(0);
        ticket.increment(0);

        let view = ticket.remove(0);

        assert!(ticket.is_empty());
        assert_eq!(view.subtotal, 0.0);
        assert_eq!(view.formatted_total, "$0.00");
    }

    #[test]
    fn test_out_of_range_index_is_noop() {
        let mut ticket = Ticket::new();
        ticket.add(&item("Cookie", 2.5)).unwrap();
        let before = ticket.clone();

        ticket.increment(5);
        ticket.decrement(5);
        ticket.remove(5);

        assert_eq!(ticket, before);
    }

    #[test]
    fn test_named_operations() {
        let mut ticket = Ticket::new();
        ticket.add(&item("Cookie", 2.5)).unwrap();
        ticket.add(&item("Brownie", 3.0)).unwrap();

        ticket.increment_named("Brownie");
        assert_eq!(ticket.lines()[1].quantity, 2);

        ticket.decrement_named("Cookie");
        assert_eq!(ticket.len(), 1);
        assert_eq!(ticket.lines()[0].name, "Brownie");

        // Unknown names are ignored
        ticket.increment_named("Eclair");
        ticket.remove_named("Eclair");
        assert_eq!(ticket.len(), 1);

        ticket.remove_named("Brownie");
        assert!(ticket.is_empty());
    }

    #[test]
    fn test_subtotal_tracks_every_mutation() {
        let mut ticket = Ticket::new();
        let expected = |t: &Ticket| t.lines().iter().map(|l| l.price * l.quantity as f64).sum::<f64>();

        let views = vec![
            ticket.add(&item("Cookie", 2.5)).unwrap(),
            ticket.add(&item("Brownie", 3.75)).unwrap(),
            ticket.increment(1),
            ticket.add(&item("Cookie", 2.5)).unwrap(),
            ticket.decrement(0),
        ];

        assert_eq!(views.last().unwrap().subtotal, expected(&ticket));
        assert_eq!(ticket.subtotal(), 2.5 + 3.75 * 2.0);
        assert_eq!(ticket.formatted_subtotal(), "10.00");
    }

    #[test]
    fn test_clear_empties_ticket() {
        let mut ticket = Ticket::new();
        ticket.add(&item("Cookie", 2.5)).unwrap();
        ticket.add(&item("Brownie", 3.0)).unwrap();

        let view = ticket.clear();

        assert!(ticket.is_empty());
        assert!(view.lines.is_empty());
        assert_eq!(view.formatted_total, "$0.00");
    }

    #[test]
    fn test_empty_ticket_view() {
        let view = Ticket::new().view();

        assert!(view.lines.is_empty());
        assert_eq!(view.subtotal, 0.0);
        assert!(view.subtotal.is_sign_positive());
        assert_eq!(view.formatted_total, "$0.00");
        assert_eq!(Ticket::new().formatted_subtotal(), "0.00");
    }

    #[test]
    fn test_apply_actions() {
        let mut ticket = Ticket::new();

        ticket.apply(TicketAction::Add(item("Cookie", 2.5))).unwrap();
        ticket.apply(TicketAction::Add(item("Brownie", 3.0))).unwrap();
        let view = ticket.apply(TicketAction::Increment("Cookie".to_string())).unwrap();
        assert_eq!(view.formatted_total, "$8.00");

        let view = ticket.apply(TicketAction::Decrement("Brownie".to_string())).unwrap();
        assert_eq!(view.lines.len(), 1);

        let view = ticket.apply(TicketAction::Remove("Cookie".to_string())).unwrap();
        assert!(view.lines.is_empty());
        assert_eq!(view.formatted_total, "$0.00");
    }

    #[test]
    fn test_apply_invalid_price_leaves_ticket_unchanged() {
        let mut ticket = Ticket::new();
        ticket.apply(TicketAction::Add(item("Cookie", 2.5))).unwrap();
        let before = ticket.clone();

        let result = ticket.apply(TicketAction::Add(item("Fudge", f64::INFINITY)));

        assert!(matches!(result, Err(TicketError::InvalidPrice { .. })));
        assert_eq!(ticket, before);
    }

    #[test]
    fn test_apply_clear_after_charge() {
        let mut ticket = Ticket::new();
        ticket.apply(TicketAction::Add(item("Cookie", 2.5))).unwrap();
        ticket.apply(TicketAction::Add(item("Cookie", 2.5))).unwrap();

        let view = ticket.apply(TicketAction::Clear).unwrap();

        assert!(ticket.is_empty());
        assert_eq!(view.formatted_total, "$0.00");
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut ticket = Ticket::new();
        ticket.add(&item("Cookie", 2.5)).unwrap();
        ticket.add(&item("Brownie", 3.0)).unwrap();
        ticket.add(&item("Cookie", 2.5)).unwrap();

        let names: Vec<&str> = ticket.lines().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Cookie", "Brownie"]);
    }
}
