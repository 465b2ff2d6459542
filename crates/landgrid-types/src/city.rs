//! City records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::id::ObjectId;

/// Default country applied when a city is provisioned without one.
pub const DEFAULT_COUNTRY: &str = "India";

/// A city that colonies and properties reference.
///
/// Cities are created at provisioning time and rarely mutated. Name+state is
/// unique in practice, enforced at the seeding level rather than as a stored
/// constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: ObjectId,
    pub name: String,
    pub state: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ObjectId>,
    pub created_at: DateTime<Utc>,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

const fn default_active() -> bool {
    true
}
