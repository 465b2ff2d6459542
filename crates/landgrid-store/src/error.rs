//! Store error types.

use landgrid_types::ObjectId;
use thiserror::Error;

/// Errors from store operations.
///
/// These are reported to callers as opaque server-side failures; the service
/// layer never forwards internal detail in the failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Insert collided with an existing document id.
    #[error("duplicate id {id} in collection '{collection}'")]
    DuplicateId {
        collection: &'static str,
        id: ObjectId,
    },

    /// Update or remove targeted a missing document.
    #[error("no document {id} in collection '{collection}'")]
    Missing {
        collection: &'static str,
        id: ObjectId,
    },

    /// A document could not be serialized for filter evaluation.
    #[error("encode failure in collection '{collection}': {detail}")]
    Encode {
        collection: &'static str,
        detail: String,
    },
}
