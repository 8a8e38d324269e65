//! # Repository Pattern
//!
//! Data access is organized using the Repository pattern.
//! Each aggregate gets its own repository with CRUD-style operations.
//!
//! ## Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Repository Layer                                   │
//! │                                                                         │
//! │  Application Code                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InvoiceRepository ← Typed methods (insert, get_by_id, search...)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQL Queries (runtime-checked via sqlx)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Note on Invoices
//! The invoice archive is append-only: repositories expose insert and read
//! operations but no update or delete. An issued invoice is history.

pub mod invoice;

pub use invoice::{InvoiceRepository, InvoiceSummary};
