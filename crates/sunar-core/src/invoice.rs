//! # Invoice Model & Aggregation
//!
//! The invoice document and the invoice-level totals pass.
//!
//! ## Aggregation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Invoice Totals Pipeline                              │
//! │                                                                         │
//! │  sub_total   = Σ line_total over rows with a non-empty description      │
//! │       │         (blank placeholder rows stay in the list, add 0)        │
//! │       ▼                                                                 │
//! │  taxable     = sub_total − old_gold_amount     (may go negative)        │
//! │       ▼                                                                 │
//! │  gst_amount  = taxable × gst_percent / 100                              │
//! │       ▼                                                                 │
//! │  grand_total = taxable + gst_amount − discount_amount                   │
//! │       ▼                                                                 │
//! │  balance_due = grand_total − advance_payment                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! GST applies to the post-trade-in taxable amount, and the discount comes
//! off AFTER tax (the discount is never taxed). This ordering is how every
//! invoice in the archive was totalled; reordering it changes money.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing::{LineItem, RateCard};

// =============================================================================
// Adjustments
// =============================================================================

/// Shop-wide adjustments applied below the item list.
///
/// All four accept negative values without clamping; the engine does not
/// validate, it computes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustments {
    /// Trade-in credit for old gold, subtracted from the subtotal before
    /// tax.
    #[serde(default)]
    pub old_gold_amount: f64,
    /// GST percentage applied to the post-trade-in taxable amount.
    #[serde(default)]
    pub gst_percent: f64,
    /// Flat discount, applied after tax (never taxed).
    #[serde(default)]
    pub discount_amount: f64,
    /// Advance already collected; only affects the balance due.
    #[serde(default)]
    pub advance_payment: f64,
}

// =============================================================================
// Totals
// =============================================================================

/// The invoice-level aggregates produced by [`aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    /// Sum of line totals over non-blank rows.
    pub sub_total: f64,
    /// GST on the post-trade-in taxable amount (for display on the
    /// document).
    pub gst_amount: f64,
    /// Final amount to pay.
    pub grand_total: f64,
    /// Grand total minus the advance payment.
    pub balance_due: f64,
}

/// Runs the invoice-level totals pass.
///
/// Total and idempotent: calling it twice with unchanged inputs yields
/// bit-identical outputs. Blank rows (empty description) are skipped in the
/// sum but remain in the sequence for display.
pub fn aggregate(items: &[LineItem], adjustments: &Adjustments) -> InvoiceTotals {
    let sub_total: f64 = items
        .iter()
        .filter(|item| !item.is_blank())
        .map(|item| item.line_total)
        .sum();

    let taxable = sub_total - adjustments.old_gold_amount;
    let gst_amount = taxable * (adjustments.gst_percent / 100.0);
    let grand_total = taxable + gst_amount - adjustments.discount_amount;
    let balance_due = grand_total - adjustments.advance_payment;

    InvoiceTotals {
        sub_total,
        gst_amount,
        grand_total,
        balance_due,
    }
}

// =============================================================================
// Customer Snapshot
// =============================================================================

/// Customer details copied onto the invoice at save time.
///
/// A snapshot, never a reference: if the customer moves house next year,
/// this invoice still shows where the goods were sold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

// =============================================================================
// Invoice
// =============================================================================

/// One invoice document, draft or finalized.
///
/// ## Dual-Key Identity
/// - `id`: UUID assigned by the persistence layer on first save; `None`
///   while drafting.
/// - `invoice_number`: sequential human-facing business number
///   (e.g. "GJ-1001"), stamped at draft creation.
///
/// ## Snapshot Rule
/// `rates` and `customer` are frozen copies taken when the invoice is
/// finalized. Any later recompute (for example regenerating the PDF) runs
/// against these stored values, never against the current defaults -
/// editing the default rates can never change what invoice #100 said.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Persistence identity; assigned by the repository on first save.
    #[serde(default)]
    pub id: Option<String>,

    /// Sequential business number, e.g. "GJ-1001".
    pub invoice_number: String,

    /// Issue date.
    pub date: NaiveDate,

    /// Customer snapshot (copied at save time).
    #[serde(default)]
    pub customer: Customer,

    /// Gold-rate snapshot (copied at save time).
    pub rates: RateCard,

    /// Shop-wide adjustments.
    #[serde(default)]
    pub adjustments: Adjustments,

    /// Derived: sum of line totals over non-blank rows.
    #[serde(default)]
    pub sub_total: f64,

    /// Derived: final amount to pay.
    #[serde(default)]
    pub grand_total: f64,

    /// Derived: grand total minus the advance payment.
    #[serde(default)]
    pub balance_due: f64,

    /// Salesperson shown on the document.
    #[serde(default)]
    pub sold_by: String,

    /// Ordered rows. Order is display-relevant (it is how the document
    /// prints) but carries no meaning for the totals.
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// When the record was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates a new draft: today's date, the given sequential number, one
    /// blank placeholder row, rates copied from the current defaults.
    pub fn draft(invoice_number: impl Into<String>, rates: RateCard) -> Self {
        Invoice {
            id: None,
            invoice_number: invoice_number.into(),
            date: Utc::now().date_naive(),
            customer: Customer::default(),
            rates,
            adjustments: Adjustments::default(),
            sub_total: 0.0,
            grand_total: 0.0,
            balance_due: 0.0,
            sold_by: String::new(),
            items: vec![LineItem::blank()],
            created_at: Utc::now(),
        }
    }

    /// Runs the full, synchronous recompute pass: default-fill and reprice
    /// every row against this invoice's own rate snapshot, then aggregate
    /// into the stored totals.
    ///
    /// This is the only recompute path. There is no incremental variant -
    /// item counts are tens of rows and a total recompute cannot go stale.
    /// Idempotent: recomputing an unchanged invoice never changes its
    /// stored totals.
    pub fn recompute(&mut self) {
        let rates = self.rates;
        for item in &mut self.items {
            item.recalculate(&rates);
        }

        let totals = aggregate(&self.items, &self.adjustments);
        self.sub_total = totals.sub_total;
        self.grand_total = totals.grand_total;
        self.balance_due = totals.balance_due;
    }

    /// The current totals, including the GST amount the document prints.
    pub fn totals(&self) -> InvoiceTotals {
        aggregate(&self.items, &self.adjustments)
    }

    /// Appends a blank placeholder row.
    pub fn add_blank_row(&mut self) {
        self.items.push(LineItem::blank());
    }

    /// Rows that appear on the printed document (non-blank only).
    pub fn printable_items(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|item| !item.is_blank())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{Purity, RateCard};
    use crate::weight::WeightUnit;

    fn priced_item(description: &str, line_total: f64) -> LineItem {
        LineItem {
            description: description.to_string(),
            line_total,
            ..LineItem::blank()
        }
    }

    #[test]
    fn test_scenario_d_adjustment_order() {
        // subtotal 1000, old gold 200, GST 10%, discount 50, advance 300
        let items = vec![priced_item("Ring", 600.0), priced_item("Chain", 400.0)];
        let adjustments = Adjustments {
            old_gold_amount: 200.0,
            gst_percent: 10.0,
            discount_amount: 50.0,
            advance_payment: 300.0,
        };

        let totals = aggregate(&items, &adjustments);
        assert_eq!(totals.sub_total, 1000.0);
        // taxable 800, GST 80
        assert_eq!(totals.gst_amount, 80.0);
        assert_eq!(totals.grand_total, 830.0);
        assert_eq!(totals.balance_due, 530.0);
    }

    #[test]
    fn test_blank_rows_excluded_from_subtotal() {
        let mut blank = LineItem::blank();
        // Even a blank row with a stale total contributes nothing
        blank.line_total = 999.0;

        let items = vec![priced_item("Ring", 100.0), blank, LineItem::blank()];
        let totals = aggregate(&items, &Adjustments::default());
        assert_eq!(totals.sub_total, 100.0);
    }

    #[test]
    fn test_negative_taxable_not_clamped() {
        // Trade-in worth more than the goods: taxable goes negative and the
        // GST follows it down
        let items = vec![priced_item("Stud", 100.0)];
        let adjustments = Adjustments {
            old_gold_amount: 300.0,
            gst_percent: 10.0,
            ..Adjustments::default()
        };

        let totals = aggregate(&items, &adjustments);
        // taxable -200, GST -20
        assert_eq!(totals.gst_amount, -20.0);
        assert_eq!(totals.grand_total, -220.0);
        assert_eq!(totals.balance_due, -220.0);
    }

    #[test]
    fn test_discount_is_never_taxed() {
        // GST on (1000 − 0) = 100; discount subtracted afterwards.
        // If the discount were applied before tax the total would be 990.
        let items = vec![priced_item("Set", 1000.0)];
        let adjustments = Adjustments {
            gst_percent: 10.0,
            discount_amount: 100.0,
            ..Adjustments::default()
        };

        let totals = aggregate(&items, &adjustments);
        assert_eq!(totals.grand_total, 1000.0);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let items = vec![priced_item("Ring", 688.0)];
        let adjustments = Adjustments {
            old_gold_amount: 38.0,
            gst_percent: 10.0,
            discount_amount: 12.5,
            advance_payment: 100.0,
        };

        let first = aggregate(&items, &adjustments);
        let second = aggregate(&items, &adjustments);
        assert_eq!(first, second);
    }

    #[test]
    fn test_draft_starts_with_one_blank_row() {
        let draft = Invoice::draft("GJ-1001", RateCard::default());
        assert!(draft.id.is_none());
        assert_eq!(draft.invoice_number, "GJ-1001");
        assert_eq!(draft.items.len(), 1);
        assert!(draft.items[0].is_blank());
        assert_eq!(draft.sub_total, 0.0);
    }

    #[test]
    fn test_recompute_full_pass() {
        let mut invoice = Invoice::draft("GJ-1001", RateCard::new(1340.0, 1430.0));
        invoice.items = vec![LineItem {
            description: "Gold Ring".to_string(),
            purity: Some(Purity::K22),
            weight_unit: Some(WeightUnit::Lal),
            net_weight: 42.0,
            wastage: 3.0,
            wages: 85.0,
            ..LineItem::blank()
        }];
        invoice.adjustments.gst_percent = 10.0;

        invoice.recompute();

        assert!((invoice.sub_total - 688.0).abs() < 1e-9);
        assert!((invoice.grand_total - 756.8).abs() < 1e-9);
        assert!((invoice.balance_due - 756.8).abs() < 1e-9);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut invoice = Invoice::draft("GJ-1002", RateCard::new(1340.0, 1430.0));
        invoice.items[0].description = "Chain".to_string();
        invoice.items[0].net_weight = 12.5;
        invoice.adjustments.gst_percent = 13.0;

        invoice.recompute();
        let first = (invoice.sub_total, invoice.grand_total, invoice.balance_due);
        invoice.recompute();
        let second = (invoice.sub_total, invoice.grand_total, invoice.balance_due);

        // Bit-identical, not merely close
        assert_eq!(first, second);
    }

    #[test]
    fn test_recompute_uses_own_snapshot_rates() {
        // A saved invoice repriced for display must use ITS rates, so a
        // recompute after the defaults moved changes nothing
        let mut invoice = Invoice::draft("GJ-1003", RateCard::new(1340.0, 1430.0));
        invoice.items[0].description = "Ring".to_string();
        invoice.items[0].net_weight = 42.0;
        invoice.recompute();
        let frozen = invoice.grand_total;

        // Defaults moving has no channel into this invoice
        invoice.recompute();
        assert_eq!(invoice.grand_total, frozen);
    }

    #[test]
    fn test_printable_items_skips_blanks() {
        let mut invoice = Invoice::draft("GJ-1004", RateCard::default());
        invoice.items[0].description = "Ring".to_string();
        invoice.add_blank_row();

        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.printable_items().count(), 1);
    }
}
