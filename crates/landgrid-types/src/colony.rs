//! Colony records and the derived plot counters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::id::ObjectId;

/// Sales lifecycle of a colony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColonyStatus {
    #[default]
    Planning,
    ReadyToSell,
    OnHold,
    Active,
    Inactive,
    SoldOut,
    UnderDevelopment,
}

impl ColonyStatus {
    /// Wire name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::ReadyToSell => "ready_to_sell",
            Self::OnHold => "on_hold",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::SoldOut => "sold_out",
            Self::UnderDevelopment => "under_development",
        }
    }
}

/// Amenity offered inside a colony (park, clubhouse, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Regulatory approval held by a colony.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
}

/// Seller/broker attached to a colony. Only the name is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_percent: Option<Decimal>,
}

/// Denormalized plot counters on a colony.
///
/// Exclusively written by the counter recompute rule; values supplied by API
/// callers for these fields are ignored and overwritten on the next
/// recompute. There is intentionally no bucket for the `reserved` plot
/// status, so at a quiescent moment
/// `available + sold + blocked <= total` (equality only when no plot is
/// reserved).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColonyCounters {
    #[serde(default)]
    pub total_plots: u64,
    #[serde(default)]
    pub available_plots: u64,
    #[serde(default)]
    pub sold_plots: u64,
    #[serde(default)]
    pub blocked_plots: u64,
}

/// A housing development that owns plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Colony {
    pub id: ObjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_area: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_sq_ft: Option<Decimal>,
    #[serde(default)]
    pub status: ColonyStatus,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub approvals: Vec<Approval>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub sellers: Vec<Seller>,
    #[serde(default)]
    pub nearby_places: Vec<String>,
    #[serde(flatten)]
    pub counters: ColonyCounters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ObjectId>,
    pub created_at: DateTime<Utc>,
}
