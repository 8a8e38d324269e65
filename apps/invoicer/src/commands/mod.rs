//! # Commands
//!
//! The operator-facing verbs, one module per concern:
//!
//! ```text
//! invoice.rs  ◄─── draft / finalize / show / list / search
//! rates.rs    ◄─── default-rate preferences
//! ```
//!
//! Commands orchestrate; all arithmetic lives in sunar-core and all SQL in
//! sunar-db.

pub mod invoice;
pub mod rates;
