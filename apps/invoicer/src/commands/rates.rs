//! # Rate Commands
//!
//! Viewing and updating the default gold rates.
//!
//! These touch only the preference file. Archived invoices carry their own
//! rate snapshots and are unaffected by rate changes.

use std::path::Path;

use sunar_core::format_amount;

use crate::error::AppResult;
use crate::state::RatePrefs;

/// Prints the current default rates.
pub fn show(prefs_path: &Path) -> AppResult<()> {
    let prefs = RatePrefs::load(prefs_path);
    println!("22K rate: {} / Tola", format_amount(prefs.rate_22k));
    println!("24K rate: {} / Tola", format_amount(prefs.rate_24k));
    Ok(())
}

/// Updates the default rates for future drafts.
pub fn set(prefs_path: &Path, rate_22k: f64, rate_24k: f64) -> AppResult<()> {
    let prefs = RatePrefs { rate_22k, rate_24k };
    prefs.save(prefs_path)?;

    println!(
        "Default rates updated: 22K {} / 24K {}",
        format_amount(rate_22k),
        format_amount(rate_24k)
    );
    Ok(())
}
