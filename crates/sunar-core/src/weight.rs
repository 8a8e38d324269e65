//! # Weight Normalization
//!
//! Converts item weights between the two units the shop trades in.
//!
//! ## The Shop Convention
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1 Tola = 100 Lal                                                       │
//! │                                                                         │
//! │  This is the SHOP's convention, NOT the metric gold-trade value of      │
//! │  1 Tola ≈ 11.6638 g. Every stored weight, every rate and every line     │
//! │  total in the archive was priced against this ratio. "Correcting" it    │
//! │  would silently change historical totals, so it is preserved exactly.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All internal arithmetic happens in Lal (the finer subunit). Display
//! converts back to whatever unit the row was entered in. Both directions
//! live here and ONLY here - the pricing and display paths must never be
//! allowed to drift apart again.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lal per Tola under the shop convention.
const LAL_PER_TOLA: f64 = 100.0;

// =============================================================================
// Weight Unit
// =============================================================================

/// The unit a row's weights were entered in.
///
/// ## Canonical Unit
/// Lal is the canonical internal unit: [`to_lal`] maps either unit into it,
/// [`from_lal`] maps back out for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WeightUnit {
    /// Finer local subunit; canonical for internal computation.
    /// A freshly-added blank row with no explicit unit computes as Lal.
    #[default]
    Lal,
    /// Coarser local unit; 1 Tola = 100 Lal by shop convention.
    Tola,
}

impl WeightUnit {
    /// Parses the display name ("Lal"/"Tola"). Unknown strings fall back to
    /// Lal, mirroring the blank-row default.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Tola" => WeightUnit::Tola,
            _ => WeightUnit::Lal,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Lal => write!(f, "Lal"),
            WeightUnit::Tola => write!(f, "Tola"),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Converts a weight entered in `unit` into canonical Lal.
///
/// ## Example
/// ```rust
/// use sunar_core::weight::{to_lal, WeightUnit};
///
/// assert_eq!(to_lal(42.0, WeightUnit::Lal), 42.0);
/// assert_eq!(to_lal(1.0, WeightUnit::Tola), 100.0);
/// ```
#[inline]
pub fn to_lal(weight: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Lal => weight,
        WeightUnit::Tola => weight * LAL_PER_TOLA,
    }
}

/// Converts a canonical Lal weight back into `unit`. Exact inverse of
/// [`to_lal`].
///
/// ## Example
/// ```rust
/// use sunar_core::weight::{from_lal, WeightUnit};
///
/// assert_eq!(from_lal(45.0, WeightUnit::Lal), 45.0);
/// assert_eq!(from_lal(100.0, WeightUnit::Tola), 1.0);
/// ```
#[inline]
pub fn from_lal(weight: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Lal => weight,
        WeightUnit::Tola => weight / LAL_PER_TOLA,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lal_is_identity() {
        assert_eq!(to_lal(42.0, WeightUnit::Lal), 42.0);
        assert_eq!(from_lal(42.0, WeightUnit::Lal), 42.0);
    }

    #[test]
    fn test_tola_uses_shop_ratio() {
        // 1 Tola = 100 Lal, the shop convention - not 11.6638 g
        assert_eq!(to_lal(1.0, WeightUnit::Tola), 100.0);
        assert_eq!(to_lal(0.45, WeightUnit::Tola), 45.0);
        assert_eq!(from_lal(45.0, WeightUnit::Tola), 0.45);
    }

    #[test]
    fn test_round_trip() {
        for unit in [WeightUnit::Lal, WeightUnit::Tola] {
            for w in [0.0, 0.5, 1.0, 42.0, 45.0, 100.0, 12345.678] {
                assert_eq!(from_lal(to_lal(w, unit), unit), w);
            }
        }
    }

    #[test]
    fn test_negative_weights_propagate() {
        // Negative inputs are not validated anywhere in the engine
        assert_eq!(to_lal(-2.0, WeightUnit::Tola), -200.0);
        assert_eq!(from_lal(-200.0, WeightUnit::Tola), -2.0);
    }

    #[test]
    fn test_parse_display() {
        assert_eq!(WeightUnit::parse("Tola"), WeightUnit::Tola);
        assert_eq!(WeightUnit::parse("Lal"), WeightUnit::Lal);
        assert_eq!(WeightUnit::parse(""), WeightUnit::Lal);
        assert_eq!(WeightUnit::Tola.to_string(), "Tola");
        assert_eq!(WeightUnit::Lal.to_string(), "Lal");
    }

    #[test]
    fn test_default_is_lal() {
        assert_eq!(WeightUnit::default(), WeightUnit::Lal);
    }
}
