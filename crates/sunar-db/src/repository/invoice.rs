//! # Invoice Repository
//!
//! Persistence for the append-only invoice archive.
//!
//! ## Write Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Invoice Write Path                                   │
//! │                                                                         │
//! │  insert(invoice)                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN TRANSACTION                                                      │
//! │       │                                                                 │
//! │       ├── INSERT invoices row (snapshots + stored aggregates)           │
//! │       │                                                                 │
//! │       ├── INSERT invoice_items rows (one per row, positional)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT ──► returns the new UUID                                        │
//! │                                                                         │
//! │  No UPDATE, no DELETE. An issued invoice is history.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stored derived fields (line totals, invoice aggregates) are written
//! exactly as computed at save time and read back verbatim. Reads never
//! reprice.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use sunar_core::{
    Adjustments, Customer, Invoice, LineItem, Purity, RateCard, WeightUnit, INVOICE_NUMBER_PREFIX,
};

use crate::error::{DbError, DbResult};

/// The first business number a fresh archive stamps.
const FIRST_INVOICE_NUMBER: i64 = 1001;

// =============================================================================
// Summary Row
// =============================================================================

/// A lightweight invoice listing row (no items).
///
/// Used by history views and customer search, where loading every item of
/// every invoice would be wasteful.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSummary {
    pub id: String,
    pub invoice_number: String,
    pub date: NaiveDate,
    pub customer_name: String,
    pub grand_total: f64,
    pub balance_due: f64,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for invoice persistence.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new invoice repository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Returns the next sequential business number, e.g. "GJ-1001".
    ///
    /// ## Numbering
    /// Numbers are derived from the archive size, so they are sequential and
    /// gap-free as long as inserts succeed. The UNIQUE constraint on
    /// `invoice_number` catches any race.
    pub async fn next_invoice_number(&self) -> DbResult<String> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(format!(
            "{}{}",
            INVOICE_NUMBER_PREFIX,
            FIRST_INVOICE_NUMBER + count
        ))
    }

    /// Inserts a finalized invoice with all its rows, in one transaction.
    ///
    /// ## Returns
    /// The newly assigned UUID.
    ///
    /// ## Errors
    /// - `UniqueViolation` if the business number is already taken
    /// - `TransactionFailed` / `QueryFailed` on SQL errors
    ///
    /// Any failure rolls the whole invoice back; there is no partial save.
    pub async fn insert(&self, invoice: &Invoice) -> DbResult<String> {
        let id = Uuid::new_v4().to_string();

        debug!(
            invoice_number = %invoice.invoice_number,
            items = invoice.items.len(),
            "Inserting invoice"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, invoice_number, date,
                customer_name, customer_phone, customer_address,
                rate_22k, rate_24k,
                old_gold_amount, gst_percent, discount_amount, advance_payment,
                sub_total, grand_total, balance_due,
                sold_by, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&invoice.invoice_number)
        .bind(invoice.date.to_string())
        .bind(&invoice.customer.name)
        .bind(&invoice.customer.phone)
        .bind(&invoice.customer.address)
        .bind(invoice.rates.rate_22k)
        .bind(invoice.rates.rate_24k)
        .bind(invoice.adjustments.old_gold_amount)
        .bind(invoice.adjustments.gst_percent)
        .bind(invoice.adjustments.discount_amount)
        .bind(invoice.adjustments.advance_payment)
        .bind(invoice.sub_total)
        .bind(invoice.grand_total)
        .bind(invoice.balance_due)
        .bind(&invoice.sold_by)
        .bind(invoice.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        for (position, item) in invoice.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO invoice_items (
                    id, invoice_id, position,
                    description, purity, weight_unit,
                    net_weight, wastage, wages, stone_cost,
                    total_weight_lal, display_total_weight, line_total
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&id)
            .bind(position as i64)
            .bind(&item.description)
            .bind(item.purity.unwrap_or_default().to_string())
            .bind(item.weight_unit.unwrap_or_default().to_string())
            .bind(item.net_weight)
            .bind(item.wastage)
            .bind(item.wages)
            .bind(item.stone_cost)
            .bind(item.total_weight_lal)
            .bind(item.display_total_weight)
            .bind(item.line_total)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            invoice_number = %invoice.invoice_number,
            id = %id,
            "Invoice saved"
        );

        Ok(id)
    }

    /// Loads a full invoice (with its rows, in display order) by UUID.
    ///
    /// Returns `Ok(None)` if no such invoice exists.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Invoice>> {
        let row = sqlx::query("SELECT * FROM invoices WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut invoice = row_to_invoice(&row)?;

        let item_rows = sqlx::query(
            "SELECT * FROM invoice_items WHERE invoice_id = ? ORDER BY position ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        invoice.items = item_rows.iter().map(row_to_item).collect::<DbResult<_>>()?;

        Ok(Some(invoice))
    }

    /// Loads a full invoice by its business number (e.g. "GJ-1001").
    pub async fn get_by_number(&self, invoice_number: &str) -> DbResult<Option<Invoice>> {
        let id: Option<String> =
            sqlx::query_scalar("SELECT id FROM invoices WHERE invoice_number = ?")
                .bind(invoice_number)
                .fetch_optional(&self.pool)
                .await?;

        match id {
            Some(id) => self.get_by_id(&id).await,
            None => Ok(None),
        }
    }

    /// Lists the most recently created invoices, newest first.
    pub async fn list_recent(&self, limit: i64) -> DbResult<Vec<InvoiceSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT id, invoice_number, date, customer_name, grand_total, balance_due
            FROM invoices
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_summary).collect()
    }

    /// Searches the archive by customer name, case-insensitive substring
    /// match, newest first.
    pub async fn search_by_customer(&self, term: &str) -> DbResult<Vec<InvoiceSummary>> {
        let pattern = format!("%{}%", term);

        let rows = sqlx::query(
            r#"
            SELECT id, invoice_number, date, customer_name, grand_total, balance_due
            FROM invoices
            WHERE customer_name LIKE ? COLLATE NOCASE
            ORDER BY created_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_summary).collect()
    }

    /// Total number of invoices in the archive.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

fn parse_date(text: &str) -> DbResult<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|e| DbError::Internal(format!("Bad date '{}': {}", text, e)))
}

fn parse_timestamp(text: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::Internal(format!("Bad timestamp '{}': {}", text, e)))
}

fn row_to_summary(row: &SqliteRow) -> DbResult<InvoiceSummary> {
    let date: String = row.try_get("date")?;

    Ok(InvoiceSummary {
        id: row.try_get("id")?,
        invoice_number: row.try_get("invoice_number")?,
        date: parse_date(&date)?,
        customer_name: row.try_get("customer_name")?,
        grand_total: row.try_get("grand_total")?,
        balance_due: row.try_get("balance_due")?,
    })
}

fn row_to_invoice(row: &SqliteRow) -> DbResult<Invoice> {
    let date: String = row.try_get("date")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Invoice {
        id: Some(row.try_get("id")?),
        invoice_number: row.try_get("invoice_number")?,
        date: parse_date(&date)?,
        customer: Customer {
            name: row.try_get("customer_name")?,
            phone: row.try_get("customer_phone")?,
            address: row.try_get("customer_address")?,
        },
        rates: RateCard::new(row.try_get("rate_22k")?, row.try_get("rate_24k")?),
        adjustments: Adjustments {
            old_gold_amount: row.try_get("old_gold_amount")?,
            gst_percent: row.try_get("gst_percent")?,
            discount_amount: row.try_get("discount_amount")?,
            advance_payment: row.try_get("advance_payment")?,
        },
        sub_total: row.try_get("sub_total")?,
        grand_total: row.try_get("grand_total")?,
        balance_due: row.try_get("balance_due")?,
        sold_by: row.try_get("sold_by")?,
        items: Vec::new(),
        created_at: parse_timestamp(&created_at)?,
    })
}

fn row_to_item(row: &SqliteRow) -> DbResult<LineItem> {
    let purity: String = row.try_get("purity")?;
    let weight_unit: String = row.try_get("weight_unit")?;

    Ok(LineItem {
        description: row.try_get("description")?,
        purity: Some(Purity::parse(&purity)),
        weight_unit: Some(WeightUnit::parse(&weight_unit)),
        net_weight: row.try_get("net_weight")?,
        wastage: row.try_get("wastage")?,
        wages: row.try_get("wages")?,
        stone_cost: row.try_get("stone_cost")?,
        total_weight_lal: row.try_get("total_weight_lal")?,
        display_total_weight: row.try_get("display_total_weight")?,
        line_total: row.try_get("line_total")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
