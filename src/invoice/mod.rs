//! Invoice filename subsystem.
//!
//! # Data Flow
//! ```text
//! filename
//!     → filename.rs (strip .pdf, split into 4 segments, validate each)
//!     → month.rs (abbreviation → full month name)
//!     → Return: ParsedInvoiceFilename or None
//!
//! filenames[]
//!     → batch.rs (partition by validity, order preserved)
//! ```
//!
//! # Design Decisions
//! - Pure functions with no shared state; safe from any number of callers
//! - Rejection is an absent value, never an error or panic

pub mod batch;
pub mod filename;
pub mod month;

pub use batch::{batch_validate, BatchValidation};
pub use filename::{is_valid, parse, ParsedInvoiceFilename};
pub use month::Month;
