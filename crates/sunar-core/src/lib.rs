//! # sunar-core: Pure Pricing Engine for Sunar Invoice
//!
//! This crate is the **heart** of the invoice generator. It contains the
//! complete financial calculation engine as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sunar Invoice Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Invoicer App (apps/invoicer)                 │   │
//! │  │    Draft editing ──► Preferences ──► Finalize ──► PDF           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sunar-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │  weight   │  │  pricing  │  │  invoice  │  │  fields   │   │   │
//! │  │   │ Lal/Tola  │  │ LineItem  │  │ aggregate │  │ parse fmt │   │   │
//! │  │   │ normalize │  │ RateCard  │  │ recompute │  │  policy   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO RENDERING • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    sunar-db (Database Layer)                    │   │
//! │  │              SQLite invoice archive, append-only                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`weight`] - Weight-unit normalization (Lal/Tola, shop convention)
//! - [`pricing`] - Per-line pricing (purity, rates, wastage, wages, stones)
//! - [`invoice`] - Invoice data model and invoice-level aggregation
//! - [`fields`] - Numeric text-field parsing and display formatting policy
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every recompute is deterministic - same input = same output
//! 2. **No I/O**: Database, rendering, file system access is FORBIDDEN here
//! 3. **Explicit Rates**: The active gold rates are passed into every
//!    calculation as a [`pricing::RateCard`] value; the engine never reads a
//!    shared mutable rate store
//! 4. **Total Functions**: The engine has no failure modes - missing
//!    categorical fields default, unparseable numbers become zero, negative
//!    inputs propagate arithmetically

// =============================================================================
// Module Declarations
// =============================================================================

pub mod fields;
pub mod invoice;
pub mod pricing;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use sunar_core::LineItem` instead of
// `use sunar_core::pricing::LineItem`

pub use fields::{format_amount, parse_amount};
pub use invoice::{aggregate, Adjustments, Customer, Invoice, InvoiceTotals};
pub use pricing::{price_line, LineItem, PricedLine, Purity, RateCard};
pub use weight::{from_lal, to_lal, WeightUnit};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fallback default rate for 22K gold (per Tola) when the preference store
/// has no saved value.
pub const DEFAULT_RATE_22K: f64 = 1340.0;

/// Fallback default rate for 24K gold (per Tola) when the preference store
/// has no saved value.
pub const DEFAULT_RATE_24K: f64 = 1430.0;

/// Prefix for sequential invoice numbers (e.g. "GJ-1001").
pub const INVOICE_NUMBER_PREFIX: &str = "GJ-";
