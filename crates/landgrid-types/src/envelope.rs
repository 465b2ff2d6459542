//! Uniform request/response envelope.
//!
//! Every operation result crossing the boundary is wrapped in one of two
//! shapes:
//!
//! - success: `{success: true, message?, data}`, list operations additionally
//!   carry `{pagination: {current, pages, total}}`
//! - failure: `{success: false, message, errors?}`
//!
//! The envelope is honored on every path, including aggregate validation
//! failures and store failures.

use serde::{Deserialize, Serialize};

/// Where in the request a rejected value was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationLocation {
    Body,
    Query,
    Params,
}

/// One violated field rule.
///
/// Validation never stops at the first violation; callers receive the full
/// list of these records in the failure envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    /// Field name as it appears on the wire.
    pub field: String,
    /// Human-readable description of the violated rule.
    pub message: String,
    /// The offending raw value, when representable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_value: Option<serde_json::Value>,
    pub location: ViolationLocation,
}

impl FieldViolation {
    /// Creates a body-located violation, the common case.
    pub fn body(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rejected_value: None,
            location: ViolationLocation::Body,
        }
    }

    /// Attaches the rejected raw value.
    #[must_use]
    pub fn with_rejected(mut self, value: serde_json::Value) -> Self {
        self.rejected_value = Some(value);
        self
    }
}

/// Pagination block for list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-indexed page number of this response.
    pub current: u64,
    /// Total page count: `ceil(total / limit)`.
    pub pages: u64,
    /// Total matching records across all pages.
    pub total: u64,
}

impl Page {
    /// Computes the pagination block for a list response.
    ///
    /// A `limit` of zero is treated as one to keep the arithmetic total.
    pub fn compute(total: u64, limit: u64, current: u64) -> Self {
        let limit = limit.max(1);
        Self {
            current,
            pages: total.div_ceil(limit),
            total,
        }
    }

    /// Returns the half-open `[start, end)` slice bounds for `current` into a
    /// result set of `total` records.
    pub fn slice_bounds(total: u64, limit: u64, current: u64) -> (usize, usize) {
        let limit = limit.max(1);
        let start = current.saturating_sub(1).saturating_mul(limit).min(total);
        let end = start.saturating_add(limit).min(total);
        (start as usize, end as usize)
    }
}

/// The uniform success/failure envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldViolation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Page>,
}

impl<T> ApiResponse<T> {
    /// Success envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            errors: None,
            pagination: None,
        }
    }

    /// Success envelope with an operator-facing message.
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    /// Success envelope for a list operation.
    pub fn list(data: T, pagination: Page) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::ok(data)
        }
    }

    /// Failure envelope with a message only.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            errors: None,
            pagination: None,
        }
    }

    /// Failure envelope carrying per-field violations.
    pub fn validation_failure(
        message: impl Into<String>,
        errors: Vec<FieldViolation>,
    ) -> Self {
        Self {
            errors: Some(errors),
            ..Self::failure(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(25, 10, 3 ; "spills into a third page")]
    #[test_case(20, 10, 2 ; "exact multiple")]
    #[test_case(0, 10, 0 ; "empty result set")]
    #[test_case(1, 10, 1 ; "single record")]
    #[test_case(7, 0, 7 ; "zero limit treated as one")]
    fn test_page_count(total: u64, limit: u64, pages: u64) {
        assert_eq!(Page::compute(total, limit, 1).pages, pages);
    }

    #[test]
    fn test_slice_bounds_cover_25_by_10() {
        assert_eq!(Page::slice_bounds(25, 10, 1), (0, 10));
        assert_eq!(Page::slice_bounds(25, 10, 2), (10, 20));
        assert_eq!(Page::slice_bounds(25, 10, 3), (20, 25));
        // Past the last page: empty slice, no panic.
        assert_eq!(Page::slice_bounds(25, 10, 4), (25, 25));
    }

    #[test]
    fn test_success_envelope_shape() {
        let env = ApiResponse::ok_with_message(vec![1, 2, 3], "created");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "created");
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_list_envelope_carries_pagination() {
        let env = ApiResponse::list(vec!["a"], Page::compute(25, 10, 2));
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["pagination"]["current"], 2);
        assert_eq!(json["pagination"]["pages"], 3);
        assert_eq!(json["pagination"]["total"], 25);
    }

    #[test]
    fn test_failure_envelope_shape() {
        let violation = FieldViolation::body("plotNumber", "length must be 1-50")
            .with_rejected(serde_json::json!(""));
        let env: ApiResponse<()> =
            ApiResponse::validation_failure("validation failed", vec![violation]);
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"][0]["field"], "plotNumber");
        assert_eq!(json["errors"][0]["location"], "body");
        assert!(json.get("data").is_none());
    }
}
