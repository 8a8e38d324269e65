//! # sunar-db: Database Layer
//!
//! SQLite persistence for the invoice archive.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         sunar-db                                        │
//! │                                                                         │
//! │  ┌─────────────┐   ┌──────────────┐   ┌───────────────────────────┐     │
//! │  │   pool.rs   │   │ migrations.rs│   │  repository/              │     │
//! │  │             │   │              │   │                           │     │
//! │  │ DbConfig    │   │ Embedded SQL │   │  invoice.rs               │     │
//! │  │ Database    │   │ migrations   │   │  (append-only archive)    │     │
//! │  └─────────────┘   └──────────────┘   └───────────────────────────┘     │
//! │                                                                         │
//! │  Depends on: sunar-core (pure types), sqlx (SQLite driver)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use sunar_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./sunar.db")).await?;
//! let number = db.invoices().next_invoice_number().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::{InvoiceRepository, InvoiceSummary};
