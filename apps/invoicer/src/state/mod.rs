//! # Application State
//!
//! Focused state types, one per concern:
//!
//! ```text
//! ┌──────────────────┐ ┌──────────────────────┐
//! │    DraftState    │ │     RatePrefs        │
//! │                  │ │                      │
//! │  • Open draft    │ │  • Default 22K rate  │
//! │  • Edit + reprice│ │  • Default 24K rate  │
//! │  • Row ops       │ │  • JSON persistence  │
//! └──────────────────┘ └──────────────────────┘
//! ```

pub mod draft;
pub mod prefs;

pub use draft::{apply_adjustment_edit, apply_item_edit, AdjustmentField, DraftState, ItemField};
pub use prefs::{default_prefs_path, RatePrefs};
