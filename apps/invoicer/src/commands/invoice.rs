//! # Invoice Commands
//!
//! Draft creation, finalization, and archive lookups.
//!
//! ## Draft Exchange Format
//! A draft is the invoice document itself, serialized as JSON. The `new`
//! command stamps a sequential number and the current default rates into a
//! fresh draft file; the operator (or the editing frontend) fills it in and
//! hands it back to `finalize`.

use std::fs;
use std::path::Path;

use tracing::info;

use sunar_core::{format_amount, Invoice};
use sunar_db::Database;

use crate::error::{AppError, AppResult};
use crate::service;
use crate::state::RatePrefs;

/// Creates a fresh draft file with the next business number and the
/// current default rates.
pub async fn new_draft(db: &Database, prefs: &RatePrefs, out_path: &Path) -> AppResult<()> {
    let draft = service::open_draft(db, prefs).await?;
    let invoice = draft.snapshot();

    let text = serde_json::to_string_pretty(&invoice)
        .map_err(|e| AppError::InvalidDraft(e.to_string()))?;
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(out_path, text)?;

    println!(
        "Draft {} written to {}",
        invoice.invoice_number,
        out_path.display()
    );
    Ok(())
}

/// Finalizes a draft file: archive it, then render the PDF.
pub async fn finalize(db: &Database, draft_path: &Path, output_dir: &Path) -> AppResult<()> {
    let text = fs::read_to_string(draft_path)?;
    let invoice: Invoice =
        serde_json::from_str(&text).map_err(|e| AppError::InvalidDraft(e.to_string()))?;

    info!(path = %draft_path.display(), "Finalizing draft");
    let finalized = service::finalize(db, invoice, output_dir).await?;

    println!(
        "Invoice {} saved ({})",
        finalized.invoice_number, finalized.id
    );
    println!("Document: {}", finalized.pdf_path.display());
    Ok(())
}

/// Prints one archived invoice in full, by business number.
pub async fn show(db: &Database, invoice_number: &str) -> AppResult<()> {
    let invoice = db
        .invoices()
        .get_by_number(invoice_number)
        .await?
        .ok_or_else(|| AppError::Usage(format!("No invoice {}", invoice_number)))?;

    println!("Invoice {}  {}", invoice.invoice_number, invoice.date);
    println!(
        "Customer: {}  {}  {}",
        invoice.customer.name, invoice.customer.phone, invoice.customer.address
    );
    println!(
        "Rates: 22K {} / 24K {}",
        format_amount(invoice.rates.rate_22k),
        format_amount(invoice.rates.rate_24k)
    );
    println!();

    for (sn, item) in invoice.printable_items().enumerate() {
        println!(
            "{:>3}. {:<24} {:>10} {:>10} {:>12}",
            sn + 1,
            item.description,
            format_amount(item.display_total_weight),
            format_amount(item.wages),
            format_amount(item.line_total)
        );
    }

    let totals = invoice.totals();
    println!();
    println!("Sub Total:   {:>12}", format_amount(totals.sub_total));
    println!("Grand Total: {:>12}", format_amount(totals.grand_total));
    println!("Balance Due: {:>12}", format_amount(totals.balance_due));
    Ok(())
}

/// Lists the most recent invoices.
pub async fn list(db: &Database, limit: i64) -> AppResult<()> {
    let rows = db.invoices().list_recent(limit).await?;
    print_summaries(&rows);
    Ok(())
}

/// Searches the archive by customer name.
pub async fn search(db: &Database, term: &str) -> AppResult<()> {
    let rows = db.invoices().search_by_customer(term).await?;
    if rows.is_empty() {
        println!("No invoices match '{}'", term);
        return Ok(());
    }
    print_summaries(&rows);
    Ok(())
}

fn print_summaries(rows: &[sunar_db::InvoiceSummary]) {
    for row in rows {
        println!(
            "{:<10} {}  {:<20} {:>12} {:>12}",
            row.invoice_number,
            row.date,
            row.customer_name,
            format_amount(row.grand_total),
            format_amount(row.balance_due)
        );
    }
}
