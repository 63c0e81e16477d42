//! email-verdict core library.
//!
//! Validates email addresses one at a time or in bulk: a permissive syntax
//! check, domain extraction, disposable-provider detection and a DNS-backed
//! deliverability check. Bulk results can be exported as a spreadsheet, CSV
//! or JSON.

pub mod batch;
pub mod core;
pub mod utils;
pub mod validation;

pub use crate::batch::{BatchRunner, EmailTable, ExportFormat, Progress, ProgressSink};
pub use crate::core::config::{Config, ConfigBuilder};
pub use crate::core::error::{AppError, DeliverabilityFailure, Result};
pub use crate::core::models::{BatchResult, BatchSummary, DomainPart, EmailVerdict, VerdictRecord};
pub use crate::validation::{
    DefaultValidator, DeliverabilityCheck, DisposableCheck, DnsDeliverabilityChecker,
    DomainListChecker, Validator,
};
