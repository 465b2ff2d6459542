//! Service error taxonomy.
//!
//! Five classes, mapped onto the uniform failure envelope at the boundary:
//! validation (aggregate, per-field), not-found, conflict, store (opaque to
//! callers) and access denial. Counter recompute failures are deliberately
//! absent here; they are logged and never surfaced as the triggering
//! request's failure (see [`crate::counters`]).

use landgrid_store::StoreError;
use landgrid_types::{ApiResponse, ObjectId};
use landgrid_validate::ValidationReport;
use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Business-rule conflicts. Checked before the mutating store call; the
/// mutation is not attempted when one holds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Conflict {
    /// Plot number uniqueness is scoped per colony.
    #[error("plot number '{plot_number}' already exists in colony {colony}")]
    DuplicatePlotNumber {
        plot_number: String,
        colony: ObjectId,
    },

    #[error("email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("role {0} is referenced by existing users")]
    RoleInUse(ObjectId),

    #[error("colony {0} still owns plots")]
    ColonyHasPlots(ObjectId),

    #[error("plot {0} is sold and cannot be deleted")]
    PlotSold(ObjectId),

    #[error("plot {0} is sold and cannot be booked")]
    PlotNotBookable(ObjectId),
}

/// Errors surfaced by the service layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// One or more field rules violated; carries the full aggregate report.
    #[error("validation failed with {} violation(s)", .0.len())]
    Validation(ValidationReport),

    /// A referenced entity is absent.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: ObjectId },

    #[error(transparent)]
    Conflict(#[from] Conflict),

    /// Underlying storage failure. Internal detail is not exposed to
    /// callers; the envelope message is generic.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    /// The principal lacks every acceptable permission token.
    #[error("access denied: requires one of {required:?}")]
    AccessDenied { required: Vec<String> },
}

impl From<ValidationReport> for ServiceError {
    fn from(report: ValidationReport) -> Self {
        Self::Validation(report)
    }
}

impl ServiceError {
    /// Converts the error into the uniform failure envelope.
    pub fn into_envelope<T>(self) -> ApiResponse<T> {
        match self {
            Self::Validation(report) => ApiResponse::validation_failure(
                "validation failed",
                report.into_violations(),
            ),
            Self::NotFound { entity, id } => {
                ApiResponse::failure(format!("{entity} {id} not found"))
            }
            Self::Conflict(conflict) => ApiResponse::failure(conflict.to_string()),
            // Opaque: storage internals stay server-side.
            Self::Store(_) => ApiResponse::failure("internal server error"),
            Self::AccessDenied { .. } => {
                ApiResponse::failure("you do not have permission to perform this action")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_envelope_carries_all_violations() {
        let mut report = ValidationReport::new();
        report.reject("plotNumber", "plot number must be 1-50 characters");
        report.reject("area", "area (sq ft) must be between 50 and 100000");

        let envelope: ApiResponse<()> = ServiceError::from(report).into_envelope();
        assert!(!envelope.success);
        assert_eq!(envelope.errors.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_store_error_envelope_is_opaque() {
        let err = ServiceError::Store(StoreError::Encode {
            collection: "plots",
            detail: "secret internal detail".to_string(),
        });
        let envelope: ApiResponse<()> = err.into_envelope();
        let message = envelope.message.unwrap();
        assert!(!message.contains("secret"));
        assert_eq!(message, "internal server error");
    }

    #[test]
    fn test_conflict_envelope_names_the_rule() {
        let id = ObjectId::generate();
        let envelope: ApiResponse<()> =
            ServiceError::Conflict(Conflict::RoleInUse(id)).into_envelope();
        assert!(envelope.message.unwrap().contains("referenced by existing users"));
    }
}
