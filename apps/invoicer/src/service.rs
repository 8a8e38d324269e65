//! # Finalization Pipeline
//!
//! Turns an edited draft into an archived invoice with a printable
//! document.
//!
//! ## Pipeline Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Finalize Pipeline                                  │
//! │                                                                         │
//! │  1. Recompute ────► final full pass over the draft's own snapshot       │
//! │       │             rates; the stored totals are what gets archived     │
//! │       ▼                                                                 │
//! │  2. Insert ───────► one transaction, whole invoice or nothing           │
//! │       │                                                                 │
//! │       │  failure? ─► STOP. The error is returned and NO document is     │
//! │       │              rendered. A paper invoice without an archive row   │
//! │       │              is a liability, not a convenience.                 │
//! │       ▼                                                                 │
//! │  3. Render PDF ───► reads the stored values only                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use sunar_core::Invoice;
use sunar_db::Database;

use crate::error::AppResult;
use crate::pdf;
use crate::state::{DraftState, RatePrefs};

/// Result of a successful finalize.
#[derive(Debug, Clone)]
pub struct Finalized {
    /// UUID assigned by the archive.
    pub id: String,
    /// Business number as printed.
    pub invoice_number: String,
    /// Where the document landed.
    pub pdf_path: PathBuf,
}

/// Opens a new draft: fetches the next sequential business number and
/// seeds the rates from the current preferences.
pub async fn open_draft(db: &Database, prefs: &RatePrefs) -> AppResult<DraftState> {
    let number = db.invoices().next_invoice_number().await?;
    info!(invoice_number = %number, "Draft opened");
    Ok(DraftState::new(number, prefs.rate_card()))
}

/// Finalizes a draft: recompute, archive, then render.
///
/// ## Errors
/// Any persistence failure aborts before rendering; no PDF is produced
/// for an invoice that is not in the archive.
pub async fn finalize(
    db: &Database,
    mut invoice: Invoice,
    output_dir: &Path,
) -> AppResult<Finalized> {
    // The archived totals are the result of one last full pass against the
    // draft's own rate snapshot.
    invoice.recompute();

    let id = match db.invoices().insert(&invoice).await {
        Ok(id) => id,
        Err(e) => {
            warn!(
                invoice_number = %invoice.invoice_number,
                error = %e,
                "Save failed; no document will be rendered"
            );
            return Err(e.into());
        }
    };
    invoice.id = Some(id.clone());

    std::fs::create_dir_all(output_dir)?;
    let pdf_path = output_dir.join(format!("{}.pdf", invoice.invoice_number));
    pdf::render_invoice(&invoice, &pdf_path)?;

    info!(
        invoice_number = %invoice.invoice_number,
        grand_total = invoice.grand_total,
        "Invoice finalized"
    );

    Ok(Finalized {
        id,
        invoice_number: invoice.invoice_number,
        pdf_path,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{apply_item_edit, ItemField};
    use sunar_db::{DbConfig, DbError};
    use crate::error::AppError;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn temp_out_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sunar-svc-test-{}-{}", std::process::id(), name))
    }

    #[tokio::test]
    async fn test_finalize_archives_then_renders() {
        let db = test_db().await;
        let prefs = RatePrefs::default();
        let out = temp_out_dir("ok");

        let draft = open_draft(&db, &prefs).await.unwrap();
        draft.with_draft_mut(|d| {
            apply_item_edit(d, 0, ItemField::Description, "Gold Ring");
            apply_item_edit(d, 0, ItemField::NetWeight, "42");
            apply_item_edit(d, 0, ItemField::Wastage, "3");
            apply_item_edit(d, 0, ItemField::Wages, "85");
            d.customer.name = "Ali Khan".to_string();
        });

        let finalized = finalize(&db, draft.snapshot(), &out).await.unwrap();
        assert_eq!(finalized.invoice_number, "GJ-1001");
        assert!(finalized.pdf_path.exists());

        // Archived with the frozen snapshot, rows intact
        let stored = db
            .invoices()
            .get_by_id(&finalized.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.customer.name, "Ali Khan");
        assert!((stored.sub_total - 688.0).abs() < 1e-9);

        std::fs::remove_dir_all(&out).ok();
    }

    #[tokio::test]
    async fn test_failed_save_blocks_rendering() {
        let db = test_db().await;
        let prefs = RatePrefs::default();
        let out = temp_out_dir("blocked");

        let first = open_draft(&db, &prefs).await.unwrap();
        first.with_draft_mut(|d| {
            apply_item_edit(d, 0, ItemField::Description, "Ring");
        });
        finalize(&db, first.snapshot(), &out).await.unwrap();

        // Same business number again: the insert must fail and no second
        // document may appear
        let mut duplicate = first.snapshot();
        duplicate.id = None;
        duplicate.items[0].description = "Different Ring".to_string();

        let before = std::fs::metadata(out.join("GJ-1001.pdf")).unwrap().modified().unwrap();
        let result = finalize(&db, duplicate, &out).await;
        assert!(matches!(
            result,
            Err(AppError::Database(DbError::UniqueViolation { .. }))
        ));

        let after = std::fs::metadata(out.join("GJ-1001.pdf")).unwrap().modified().unwrap();
        assert_eq!(before, after);

        std::fs::remove_dir_all(&out).ok();
    }

    #[tokio::test]
    async fn test_sequential_numbers_across_finalizes() {
        let db = test_db().await;
        let prefs = RatePrefs::default();
        let out = temp_out_dir("seq");

        for expected in ["GJ-1001", "GJ-1002", "GJ-1003"] {
            let draft = open_draft(&db, &prefs).await.unwrap();
            draft.with_draft_mut(|d| {
                apply_item_edit(d, 0, ItemField::Description, "Ring");
            });
            let finalized = finalize(&db, draft.snapshot(), &out).await.unwrap();
            assert_eq!(finalized.invoice_number, expected);
        }

        std::fs::remove_dir_all(&out).ok();
    }
}
