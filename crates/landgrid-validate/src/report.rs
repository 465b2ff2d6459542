//! Aggregate validation reports.

use landgrid_types::{FieldViolation, ViolationLocation};
use serde_json::Value;

/// Accumulates field violations across an entire payload.
///
/// Rules are applied one field at a time; a failing rule records a violation
/// here and the caller keeps going, so the final report names every violated
/// rule at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one rule result.
    ///
    /// On success returns the normalized value; on failure records a
    /// violation carrying the rejected raw value and returns `None`.
    pub fn capture<T>(
        &mut self,
        field: &str,
        raw: impl Into<Value>,
        result: Result<T, String>,
    ) -> Option<T> {
        match result {
            Ok(normalized) => Some(normalized),
            Err(message) => {
                self.violations.push(
                    FieldViolation::body(field, message).with_rejected(raw.into()),
                );
                None
            }
        }
    }

    /// Records a violation directly (missing required field and similar).
    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.violations.push(FieldViolation::body(field, message));
    }

    /// Records a violation from a non-body location.
    pub fn reject_at(
        &mut self,
        location: ViolationLocation,
        field: &str,
        message: impl Into<String>,
    ) {
        let mut violation = FieldViolation::body(field, message);
        violation.location = location;
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Consumes the report, yielding the violation list.
    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// `Ok(())` when clean, otherwise the report itself as the error.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;

    #[test]
    fn test_capture_success_passes_value_through() {
        let mut report = ValidationReport::new();
        let normalized = report.capture("plotNumber", "A-12", rules::plot_number("A-12"));
        assert_eq!(normalized.as_deref(), Some("A-12"));
        assert!(report.is_empty());
    }

    #[test]
    fn test_capture_failure_records_and_continues() {
        let mut report = ValidationReport::new();
        let bad_number = report.capture("plotNumber", "", rules::plot_number(""));
        let bad_phone = report.capture("phone", "12345", rules::phone("12345"));
        assert!(bad_number.is_none());
        assert!(bad_phone.is_none());

        // Both violations are present, in order, with the raw values.
        let violations = report.into_violations();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "plotNumber");
        assert_eq!(violations[0].rejected_value, Some(serde_json::json!("")));
        assert_eq!(violations[1].field, "phone");
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationReport::new().into_result().is_ok());

        let mut report = ValidationReport::new();
        report.reject("email", "email is required");
        let err = report.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
    }
}
