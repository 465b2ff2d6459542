//! Property (marketing listing) records.
//!
//! A property is a marketing listing distinct from a [`crate::Plot`]; it has
//! no coupling to the colony plot counters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::id::ObjectId;

/// Listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyCategory {
    Residential,
    Commercial,
    Farmhouse,
}

/// Publication state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    #[default]
    Draft,
    Active,
    Inactive,
}

impl PropertyStatus {
    /// Wire name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Media attached to a listing.
///
/// All fields are path references; upload handling and binary content live
/// outside this system.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noc_document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_document: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
}

/// A marketing listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: ObjectId,
    pub name: String,
    pub category: PropertyCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colony: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub media: MediaBundle,
    #[serde(default)]
    pub status: PropertyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ObjectId>,
    pub created_at: DateTime<Utc>,
}
