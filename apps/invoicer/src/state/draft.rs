//! # Draft State
//!
//! The invoice currently being edited.
//!
//! ## Edit Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Edit Cycle                                     │
//! │                                                                         │
//! │  Operator Action            Edit Operation          Recompute           │
//! │  ───────────────            ──────────────          ─────────          │
//! │                                                                         │
//! │  Type in a cell ──────────► apply_item_edit() ────► full pass           │
//! │                                                                         │
//! │  Change GST / discount ───► apply_adjustment_edit() full pass           │
//! │                                                                         │
//! │  Add Row button ──────────► add_row() ────────────► full pass           │
//! │                                                                         │
//! │  Remove Row button ───────► remove_row() ─────────► full pass           │
//! │                                                                         │
//! │  Every edit commit triggers ONE full synchronous recompute of every     │
//! │  derived field. There is no partial or async recalculation, so the      │
//! │  displayed totals can never be stale or ordered wrongly.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Numeric cells accept free text; anything unparseable is committed as
//! 0.0 without an error. The operator sees the zero in the recomputed
//! totals immediately, which is the correction signal.

use std::sync::{Arc, Mutex};

use sunar_core::{parse_amount, Invoice, Purity, RateCard, WeightUnit};

// =============================================================================
// Edit Operations
// =============================================================================

/// Editable cells of one invoice row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Description,
    Purity,
    WeightUnit,
    NetWeight,
    Wastage,
    Wages,
    StoneCost,
}

/// Editable shop-wide adjustment fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentField {
    OldGold,
    GstPercent,
    Discount,
    Advance,
}

/// Commits one cell edit and recomputes the whole draft.
///
/// Out-of-range rows are ignored (the edit has nowhere to land).
pub fn apply_item_edit(invoice: &mut Invoice, row: usize, field: ItemField, text: &str) {
    if let Some(item) = invoice.items.get_mut(row) {
        match field {
            ItemField::Description => item.description = text.trim().to_string(),
            ItemField::Purity => item.purity = Some(Purity::parse(text)),
            ItemField::WeightUnit => item.weight_unit = Some(WeightUnit::parse(text)),
            ItemField::NetWeight => item.net_weight = parse_amount(text),
            ItemField::Wastage => item.wastage = parse_amount(text),
            ItemField::Wages => item.wages = parse_amount(text),
            ItemField::StoneCost => item.stone_cost = parse_amount(text),
        }
        invoice.recompute();
    }
}

/// Commits one adjustment edit and recomputes the whole draft.
pub fn apply_adjustment_edit(invoice: &mut Invoice, field: AdjustmentField, text: &str) {
    let value = parse_amount(text);
    match field {
        AdjustmentField::OldGold => invoice.adjustments.old_gold_amount = value,
        AdjustmentField::GstPercent => invoice.adjustments.gst_percent = value,
        AdjustmentField::Discount => invoice.adjustments.discount_amount = value,
        AdjustmentField::Advance => invoice.adjustments.advance_payment = value,
    }
    invoice.recompute();
}

// =============================================================================
// Draft State
// =============================================================================

/// The draft currently open in the editor.
///
/// ## Thread Safety
/// Wrapped in `Arc<Mutex<Invoice>>`: edits are quick and exclusive, and the
/// recompute after every edit runs under the same lock, so no observer can
/// see a draft whose totals lag its inputs.
#[derive(Debug, Clone)]
pub struct DraftState {
    draft: Arc<Mutex<Invoice>>,
}

impl DraftState {
    /// Opens a fresh draft with the given business number and the current
    /// default rates.
    pub fn new(invoice_number: impl Into<String>, rates: RateCard) -> Self {
        DraftState {
            draft: Arc::new(Mutex::new(Invoice::draft(invoice_number, rates))),
        }
    }

    /// Wraps an existing invoice (for example one loaded from a draft file).
    pub fn from_invoice(invoice: Invoice) -> Self {
        DraftState {
            draft: Arc::new(Mutex::new(invoice)),
        }
    }

    /// Executes a function with read access to the draft.
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Invoice) -> R,
    {
        let draft = self.draft.lock().expect("Draft mutex poisoned");
        f(&draft)
    }

    /// Executes a function with write access to the draft, then runs the
    /// full recompute pass before releasing the lock.
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Invoice) -> R,
    {
        let mut draft = self.draft.lock().expect("Draft mutex poisoned");
        let result = f(&mut draft);
        draft.recompute();
        result
    }

    /// Appends a blank row to the draft.
    pub fn add_row(&self) {
        self.with_draft_mut(|draft| draft.add_blank_row());
    }

    /// Removes a row by index (ignored if out of range).
    pub fn remove_row(&self, row: usize) {
        self.with_draft_mut(|draft| {
            if row < draft.items.len() {
                draft.items.remove(row);
            }
        });
    }

    /// Returns an owned snapshot of the current draft.
    pub fn snapshot(&self) -> Invoice {
        self.with_draft(|draft| draft.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> RateCard {
        RateCard::new(1340.0, 1430.0)
    }

    #[test]
    fn test_cell_edits_reprice_immediately() {
        let state = DraftState::new("GJ-1001", rates());

        state.with_draft_mut(|draft| {
            apply_item_edit(draft, 0, ItemField::Description, "Gold Ring");
            apply_item_edit(draft, 0, ItemField::NetWeight, "42");
            apply_item_edit(draft, 0, ItemField::Wastage, "3");
            apply_item_edit(draft, 0, ItemField::Wages, "85");
        });

        let sub_total = state.with_draft(|draft| draft.sub_total);
        assert!((sub_total - 688.0).abs() < 1e-9);
    }

    #[test]
    fn test_unparseable_text_commits_zero() {
        let state = DraftState::new("GJ-1001", rates());

        state.with_draft_mut(|draft| {
            apply_item_edit(draft, 0, ItemField::Description, "Ring");
            apply_item_edit(draft, 0, ItemField::NetWeight, "42");
            // A typo commits as zero, no error raised
            apply_item_edit(draft, 0, ItemField::NetWeight, "4x2");
        });

        assert_eq!(state.with_draft(|draft| draft.items[0].net_weight), 0.0);
        assert_eq!(state.with_draft(|draft| draft.sub_total), 0.0);
    }

    #[test]
    fn test_adjustment_edits_follow_totals_order() {
        let state = DraftState::new("GJ-1001", rates());

        state.with_draft_mut(|draft| {
            apply_item_edit(draft, 0, ItemField::Description, "Set");
            apply_item_edit(draft, 0, ItemField::Wages, "1000");
            apply_adjustment_edit(draft, AdjustmentField::OldGold, "200");
            apply_adjustment_edit(draft, AdjustmentField::GstPercent, "10");
            apply_adjustment_edit(draft, AdjustmentField::Discount, "50");
            apply_adjustment_edit(draft, AdjustmentField::Advance, "300");
        });

        let (grand, balance) =
            state.with_draft(|draft| (draft.grand_total, draft.balance_due));
        assert_eq!(grand, 830.0);
        assert_eq!(balance, 530.0);
    }

    #[test]
    fn test_out_of_range_edit_is_ignored() {
        let state = DraftState::new("GJ-1001", rates());

        state.with_draft_mut(|draft| {
            apply_item_edit(draft, 7, ItemField::NetWeight, "42");
        });

        assert_eq!(state.with_draft(|draft| draft.items.len()), 1);
        assert_eq!(state.with_draft(|draft| draft.sub_total), 0.0);
    }

    #[test]
    fn test_add_and_remove_rows() {
        let state = DraftState::new("GJ-1001", rates());

        state.add_row();
        state.add_row();
        assert_eq!(state.with_draft(|draft| draft.items.len()), 3);

        state.remove_row(1);
        assert_eq!(state.with_draft(|draft| draft.items.len()), 2);

        // Out of range removal changes nothing
        state.remove_row(9);
        assert_eq!(state.with_draft(|draft| draft.items.len()), 2);
    }

    #[test]
    fn test_with_draft_mut_recomputes_on_release() {
        let state = DraftState::new("GJ-1001", rates());

        // Raw field writes, no explicit recompute by the caller
        state.with_draft_mut(|draft| {
            draft.items[0].description = "Chain".to_string();
            draft.items[0].wages = 150.0;
        });

        assert_eq!(state.with_draft(|draft| draft.sub_total), 150.0);
    }
}
