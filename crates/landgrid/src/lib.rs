//! # landgrid: Real-estate inventory service layer
//!
//! The orchestration layer of the system. Each service module implements the
//! request-handling sequence for one entity:
//!
//! 1. validation fully completes (accepting or rejecting all fields) before
//!    any store mutation is attempted
//! 2. conflict checks run before the mutating store call
//! 3. the mutation itself
//! 4. for plot create/delete only: the colony counter recompute, as a
//!    separate best-effort follow-up whose failure never rolls back the
//!    plot write
//!
//! ## Derived values
//!
//! - [`pricing`]: `total_price = area * price_per_sq_ft`, recomputed before
//!   every plot persist that carries both fields.
//! - [`counters`]: colony plot counters, fully recomputed from the live plot
//!   set after plot create/delete. Not transactional, intentionally: two
//!   interleaved writers against the same colony can each read the plot set
//!   independently and the last recompute wins. The counters are advisory,
//!   not authoritative inventory control.
//!
//! ## Access control
//!
//! The boundary layer resolves a principal and calls [`authorize`] with the
//! permission tokens an operation requires before invoking a service. The
//! services themselves are credential-free.

pub mod counters;
pub mod error;
pub mod pricing;
pub mod services;

#[cfg(test)]
mod tests;

use landgrid_rbac::{Decision, Gate, Principal};

pub use counters::{CounterRecompute, PlotQuery, RecomputeError};
pub use error::{Conflict, ServiceError, ServiceResult};
pub use landgrid_store::Database;

/// Checks a principal against the permission tokens an operation requires.
///
/// Deny becomes [`ServiceError::AccessDenied`], which the boundary turns
/// into an authorization failure envelope.
pub fn authorize(gate: &Gate, principal: &Principal, required: &[&str]) -> ServiceResult<()> {
    match gate.check(principal, required) {
        Decision::Allow => Ok(()),
        Decision::Deny => Err(ServiceError::AccessDenied {
            required: required.iter().map(ToString::to_string).collect(),
        }),
    }
}
