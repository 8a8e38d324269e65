//! # Rate Preferences
//!
//! The shop's default gold rates, persisted between sessions.
//!
//! ## Storage
//! A small JSON file in the platform data directory:
//! - **Linux**: `~/.local/share/sunar-invoice/prefs.json`
//! - **macOS**: `~/Library/Application Support/com.sunar.invoice/prefs.json`
//! - **Windows**: `%APPDATA%\sunar\invoice\prefs.json`
//!
//! ## Role
//! These are only the DEFAULTS handed to a new draft. Once a draft exists
//! it carries its own rate snapshot; changing the preferences afterwards
//! affects future drafts only.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use sunar_core::{RateCard, DEFAULT_RATE_22K, DEFAULT_RATE_24K};

use crate::error::{AppError, AppResult};

/// Persisted default rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatePrefs {
    /// Default 22K rate per Tola.
    #[serde(default = "default_rate_22k")]
    pub rate_22k: f64,
    /// Default 24K rate per Tola.
    #[serde(default = "default_rate_24k")]
    pub rate_24k: f64,
}

fn default_rate_22k() -> f64 {
    DEFAULT_RATE_22K
}

fn default_rate_24k() -> f64 {
    DEFAULT_RATE_24K
}

impl Default for RatePrefs {
    fn default() -> Self {
        RatePrefs {
            rate_22k: DEFAULT_RATE_22K,
            rate_24k: DEFAULT_RATE_24K,
        }
    }
}

impl RatePrefs {
    /// Loads preferences from the given file, falling back to the built-in
    /// defaults when the file is missing or unreadable.
    ///
    /// A corrupt preference file is not fatal: the shop can always invoice
    /// at the defaults and fix the rates afterwards.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Corrupt preference file, using defaults");
                    RatePrefs::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "No preference file, using defaults");
                RatePrefs::default()
            }
        }
    }

    /// Writes preferences to the given file, creating parent directories.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let text = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Preferences(e.to_string()))?;
        fs::write(path, text)?;

        debug!(path = %path.display(), "Preferences saved");
        Ok(())
    }

    /// The rate card a new draft starts from.
    pub fn rate_card(&self) -> RateCard {
        RateCard::new(self.rate_22k, self.rate_24k)
    }
}

/// Default preference file location for this platform.
pub fn default_prefs_path() -> AppResult<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "sunar", "invoice")
        .ok_or_else(|| AppError::Preferences("Could not determine data directory".to_string()))?;
    Ok(dirs.data_dir().join("prefs.json"))
}

// =============================================================================
// Unit Tests
// =============================================================================
