//! # Per-Line Pricing
//!
//! Prices a single invoice row from its raw inputs and the two active gold
//! rates.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Line Item Pricing                                   │
//! │                                                                         │
//! │  net_weight (in row unit)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  to_lal(net_weight, unit) ──► + wastage (always raw Lal)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  weight_lal ──► from_lal(weight_lal, unit) = display weight             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  gold_cost = (weight_lal / 100) × rate(purity)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  line_total = gold_cost + wages + stone_cost                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wastage Unit Policy
//! Wastage is added as raw Lal even when the row's unit is Tola. Wastage is
//! a small manufacturing-loss credit the shop always enters in the finer
//! unit, and the archive was priced that way. Preserved as-is; do not make
//! wastage unit-aware.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::weight::{from_lal, to_lal, WeightUnit};

// =============================================================================
// Purity
// =============================================================================

/// Gold fineness grade. Selects which of the two active rates prices a row.
///
/// ## Fallback Rule
/// Only an explicit 24K selection prices at the 24K rate; anything else
/// (including a freshly-added blank row with no purity yet) prices at the
/// 22K rate. No error is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Purity {
    /// 22 karat. The default for blank rows.
    #[default]
    #[serde(rename = "22K")]
    K22,
    /// 24 karat.
    #[serde(rename = "24K")]
    K24,
}

impl Purity {
    /// Parses the display name ("22K"/"24K"). Anything that is not exactly
    /// "24K" is treated as 22K - the fallback rule above.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "24K" => Purity::K24,
            _ => Purity::K22,
        }
    }
}

impl fmt::Display for Purity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Purity::K22 => write!(f, "22K"),
            Purity::K24 => write!(f, "24K"),
        }
    }
}

// =============================================================================
// Rate Card
// =============================================================================

/// The two active gold rates (per Tola), passed explicitly into every
/// calculation.
///
/// ## Why a Value, Not a Store
/// Reading rates from a mutable global store at calculation time would let
/// saved invoices silently re-price when the defaults change. The rates
/// are an explicit parameter instead: the editor passes the current
/// defaults while drafting, and a saved invoice carries its own frozen
/// snapshot forever.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateCard {
    /// Active rate for 22K gold.
    pub rate_22k: f64,
    /// Active rate for 24K gold.
    pub rate_24k: f64,
}

impl RateCard {
    /// Creates a rate card from the two active rates.
    pub const fn new(rate_22k: f64, rate_24k: f64) -> Self {
        RateCard { rate_22k, rate_24k }
    }

    /// Returns the rate that prices the given purity (24K → 24K rate,
    /// everything else → 22K rate).
    #[inline]
    pub fn rate_for(&self, purity: Purity) -> f64 {
        match purity {
            Purity::K24 => self.rate_24k,
            _ => self.rate_22k,
        }
    }
}

impl Default for RateCard {
    fn default() -> Self {
        RateCard::new(crate::DEFAULT_RATE_22K, crate::DEFAULT_RATE_24K)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One priced invoice row.
///
/// ## Lifecycle
/// Created blank (no purity, no unit, zero weights), mutated field-by-field
/// as the user edits, and repriced on every edit commit. The derived fields
/// (`total_weight_lal`, `display_total_weight`, `line_total`) are stored so
/// the persisted invoice carries the exact history, never a recomputation
/// against later rates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Free-text description, e.g. "Gold Ring". Rows with an empty
    /// description are display placeholders and contribute nothing to
    /// invoice totals.
    #[serde(default)]
    pub description: String,

    /// Fineness grade. `None` on a freshly-added row; computes as 22K.
    #[serde(default)]
    pub purity: Option<Purity>,

    /// Unit the weights were entered in. `None` on a freshly-added row;
    /// computes as Lal.
    #[serde(default)]
    pub weight_unit: Option<WeightUnit>,

    /// Net metal weight, in `weight_unit`.
    #[serde(default)]
    pub net_weight: f64,

    /// Manufacturing-loss credit, always in Lal (see module docs).
    #[serde(default)]
    pub wastage: f64,

    /// Making charges (monetary, unit-less).
    #[serde(default)]
    pub wages: f64,

    /// Stone cost, if any (monetary, unit-less).
    #[serde(default)]
    pub stone_cost: f64,

    /// Derived: net + wastage, in canonical Lal. Stored for history.
    #[serde(default)]
    pub total_weight_lal: f64,

    /// Derived: total weight converted back into `weight_unit`. Stored for
    /// history.
    #[serde(default)]
    pub display_total_weight: f64,

    /// Derived: the final monetary amount for this row. Stored for history.
    #[serde(default)]
    pub line_total: f64,
}

impl LineItem {
    /// Creates a blank placeholder row.
    pub fn blank() -> Self {
        LineItem::default()
    }

    /// True if this row is a display placeholder (empty description) and
    /// therefore excluded from invoice totals.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.description.is_empty()
    }

    /// Reprices this row against the given rates, writing the derived
    /// fields.
    ///
    /// Also writes the categorical defaults (22K / Lal) back into the row,
    /// matching the editor behavior where a blank row acquires its defaults
    /// on the first recompute.
    pub fn recalculate(&mut self, rates: &RateCard) {
        let priced = price_line(self, rates);
        self.purity = Some(self.purity.unwrap_or_default());
        self.weight_unit = Some(self.weight_unit.unwrap_or_default());
        self.total_weight_lal = priced.total_weight_lal;
        self.display_total_weight = priced.display_total_weight;
        self.line_total = priced.line_total;
    }
}

// =============================================================================
// Line Pricing
// =============================================================================

/// The derived values for one priced row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLine {
    /// Net + wastage, in canonical Lal.
    pub total_weight_lal: f64,
    /// Total weight converted back into the row's unit.
    pub display_total_weight: f64,
    /// Gold cost + wages + stone cost.
    pub line_total: f64,
}

/// Prices one row against the given rates. Pure; the row is not modified.
///
/// Default-fill runs first: an unset purity computes as 22K and an unset
/// unit as Lal, so a freshly-added blank row always prices cleanly. There
/// are no error conditions - negative or nonsensical inputs propagate
/// arithmetically into the totals.
///
/// ## Example
/// ```rust
/// use sunar_core::pricing::{price_line, LineItem, RateCard};
///
/// let item = LineItem {
///     description: "Gold Ring".into(),
///     net_weight: 42.0,
///     wastage: 3.0,
///     wages: 85.0,
///     ..LineItem::blank()
/// };
/// let priced = price_line(&item, &RateCard::new(1340.0, 1430.0));
/// assert_eq!(priced.total_weight_lal, 45.0);
/// assert!((priced.line_total - 688.0).abs() < 1e-9);
/// ```
pub fn price_line(item: &LineItem, rates: &RateCard) -> PricedLine {
    // Default-fill before any math: blank rows have no explicit unit or
    // purity yet.
    let purity = item.purity.unwrap_or_default();
    let unit = item.weight_unit.unwrap_or_default();

    // Wastage is raw Lal regardless of the row's unit.
    let weight_lal = to_lal(item.net_weight, unit) + item.wastage;

    let gold_cost = (weight_lal / 100.0) * rates.rate_for(purity);

    PricedLine {
        total_weight_lal: weight_lal,
        display_total_weight: from_lal(weight_lal, unit),
        line_total: gold_cost + item.wages + item.stone_cost,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(net_weight: f64, wastage: f64, wages: f64) -> LineItem {
        LineItem {
            description: "Gold Ring".to_string(),
            net_weight,
            wastage,
            wages,
            ..LineItem::blank()
        }
    }

    #[test]
    fn test_scenario_a_22k() {
        // 42 Lal net + 3 wastage at 22K rate 1340, wages 85
        let mut item = ring(42.0, 3.0, 85.0);
        item.purity = Some(Purity::K22);
        item.weight_unit = Some(WeightUnit::Lal);

        let priced = price_line(&item, &RateCard::new(1340.0, 1430.0));
        assert_eq!(priced.total_weight_lal, 45.0);
        assert_eq!(priced.display_total_weight, 45.0);
        // gold cost 603.00 + wages 85 = 688.00
        assert!((priced.line_total - 688.0).abs() < 1e-9);
    }

    #[test]
    fn test_scenario_b_24k() {
        let mut item = ring(42.0, 3.0, 85.0);
        item.purity = Some(Purity::K24);

        let priced = price_line(&item, &RateCard::new(1340.0, 1430.0));
        // gold cost 643.50 + wages 85 = 728.50
        assert!((priced.line_total - 728.5).abs() < 1e-9);
    }

    #[test]
    fn test_scenario_c_tola_display() {
        let mut item = ring(1.0, 0.0, 0.0);
        item.weight_unit = Some(WeightUnit::Tola);

        let priced = price_line(&item, &RateCard::default());
        assert_eq!(priced.total_weight_lal, 100.0);
        assert_eq!(priced.display_total_weight, 1.0);
    }

    #[test]
    fn test_blank_row_defaults_before_math() {
        // No purity, no unit: must compute as 22K / Lal, not panic or error
        let item = ring(10.0, 0.0, 0.0);
        let priced = price_line(&item, &RateCard::new(1000.0, 2000.0));
        // (10 / 100) × 1000 = 100 → priced at the 22K rate
        assert!((priced.line_total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_wastage_is_raw_lal_for_tola_rows() {
        // 1 Tola = 100 Lal, plus 3 wastage read as Lal (NOT 300)
        let mut item = ring(1.0, 3.0, 0.0);
        item.weight_unit = Some(WeightUnit::Tola);

        let priced = price_line(&item, &RateCard::new(1000.0, 0.0));
        assert_eq!(priced.total_weight_lal, 103.0);
        assert_eq!(priced.display_total_weight, 1.03);
    }

    #[test]
    fn test_negative_inputs_propagate() {
        let mut item = ring(-10.0, 0.0, 0.0);
        item.wages = -5.0;

        let priced = price_line(&item, &RateCard::new(1000.0, 0.0));
        assert!((priced.line_total - (-105.0)).abs() < 1e-9);
    }

    #[test]
    fn test_recalculate_writes_derived_fields_and_defaults() {
        let mut item = ring(42.0, 3.0, 85.0);
        assert!(item.purity.is_none());

        item.recalculate(&RateCard::new(1340.0, 1430.0));

        assert_eq!(item.purity, Some(Purity::K22));
        assert_eq!(item.weight_unit, Some(WeightUnit::Lal));
        assert_eq!(item.total_weight_lal, 45.0);
        assert!((item.line_total - 688.0).abs() < 1e-9);
    }

    #[test]
    fn test_rate_fallback_is_22k() {
        let rates = RateCard::new(1340.0, 1430.0);
        assert_eq!(rates.rate_for(Purity::K22), 1340.0);
        assert_eq!(rates.rate_for(Purity::K24), 1430.0);
        // Unknown text parses to 22K, the no-error fallback
        assert_eq!(rates.rate_for(Purity::parse("18K")), 1340.0);
    }

    #[test]
    fn test_purity_parse_display() {
        assert_eq!(Purity::parse("24K"), Purity::K24);
        assert_eq!(Purity::parse("22K"), Purity::K22);
        assert_eq!(Purity::parse(""), Purity::K22);
        assert_eq!(Purity::K24.to_string(), "24K");
    }

    #[test]
    fn test_blank_row_is_blank() {
        assert!(LineItem::blank().is_blank());
        assert!(!ring(1.0, 0.0, 0.0).is_blank());
    }
}
