//! # landgrid-validate: Field validation and sanitization
//!
//! The one authoritative validation component for the system, consumed
//! uniformly by create and update paths. Two independent concerns:
//!
//! - **Validation** ([`rules`], [`ValidationReport`]): per-field rules that
//!   either normalize a raw value or record a structured violation. A report
//!   collects every violation instead of stopping at the first, and the
//!   caller surfaces the whole list together.
//! - **Sanitization** ([`sanitize`]): a recursive pass over an entire JSON
//!   payload that trims and HTML-escapes string leaves and clamps numeric
//!   leaves, preserving structure.
//!
//! Validation never panics and never aborts a request on its own; an
//! accumulated non-empty report is the caller's signal to reject.

pub mod report;
pub mod rules;
pub mod sanitize;

pub use report::ValidationReport;
pub use sanitize::{NumericPolicy, escape_html, sanitize_number, sanitize_payload};
