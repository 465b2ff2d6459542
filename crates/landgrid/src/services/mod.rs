//! Entity services.
//!
//! One module per entity. Every mutating operation follows the same
//! sequence: validate all fields, run conflict checks, mutate the store,
//! then (plots only) the best-effort counter follow-up.

pub mod booking;
pub mod city;
pub mod colony;
pub mod plot;
pub mod property;
pub mod role;
pub mod user;

use landgrid_types::ObjectId;
use landgrid_validate::{ValidationReport, rules};

use crate::error::{ServiceError, ServiceResult};

/// Parses a caller-supplied identifier, rejecting malformed ones as a
/// validation failure rather than letting them reach the store.
pub(crate) fn parse_id(field: &str, raw: &str) -> ServiceResult<ObjectId> {
    let mut report = ValidationReport::new();
    match report.capture(field, raw.to_string(), rules::object_id(raw)) {
        Some(id) => Ok(id),
        None => Err(ServiceError::Validation(report)),
    }
}
