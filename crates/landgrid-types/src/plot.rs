//! Plot records.

use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::geo::PlotCoordinates;
use crate::id::ObjectId;

/// Sales status of a plot.
///
/// Note: the colony counters track `available`, `sold` and `blocked` but not
/// `reserved`; see [`crate::ColonyCounters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotStatus {
    #[default]
    Available,
    Blocked,
    Sold,
    Reserved,
}

impl PlotStatus {
    /// Wire name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Blocked => "blocked",
            Self::Sold => "sold",
            Self::Reserved => "reserved",
        }
    }
}

/// Compass direction the plot faces. Required on every plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Facing {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Facing {
    /// All eight directions, in wire order.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// Wire name of the direction.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::NorthEast => "north-east",
            Self::NorthWest => "north-west",
            Self::SouthEast => "south-east",
            Self::SouthWest => "south-west",
        }
    }
}

impl Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facing {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|facing| facing.as_str() == lowered)
            .ok_or(())
    }
}

/// Physical dimensions of a plot, in feet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontage: Option<Decimal>,
}

/// Point of interest near a plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyAmenity {
    pub name: String,
    /// Distance in kilometres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Decimal>,
}

/// Document attached to a plot (sale deed, layout extract, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotDocument {
    pub name: String,
    pub url: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
}

/// Append-only booking history entry on a plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ObjectId>,
    pub action: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Government registry details recorded once a plot is registered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamp_duty: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_fee: Option<Decimal>,
}

/// A plot of land inside a colony.
///
/// `total_price` is derived: it is recomputed as `area * price_per_sq_ft`
/// before every persist and never trusted as caller input, though the stored
/// value can be read back. `plot_number` is unique within the owning colony.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plot {
    pub id: ObjectId,
    pub plot_number: String,
    pub colony: ObjectId,
    /// Area in square feet.
    pub area: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    pub price_per_sq_ft: Decimal,
    /// Derived: `area * price_per_sq_ft`.
    pub total_price: Decimal,
    #[serde(default)]
    pub status: PlotStatus,
    #[serde(default)]
    pub is_corner: bool,
    pub facing: Facing,
    /// Width of the abutting road, in feet.
    #[serde(default)]
    pub road_width: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<PlotCoordinates>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub nearby_amenities: Vec<NearbyAmenity>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub documents: Vec<PlotDocument>,
    #[serde(default)]
    pub booking_history: Vec<BookingEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_owner: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_details: Option<RegistryDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<ObjectId>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("north", Facing::North)]
    #[test_case("north-east", Facing::NorthEast)]
    #[test_case("  South-West  ", Facing::SouthWest ; "case folded and trimmed")]
    fn test_facing_from_str(raw: &str, expected: Facing) {
        assert_eq!(raw.parse::<Facing>().unwrap(), expected);
    }

    #[test]
    fn test_facing_rejects_unknown() {
        assert!("upward".parse::<Facing>().is_err());
        assert!("northeast".parse::<Facing>().is_err());
    }

    #[test]
    fn test_facing_wire_names_round_trip() {
        for facing in Facing::ALL {
            let json = serde_json::to_value(facing).unwrap();
            assert_eq!(json, facing.as_str());
            let back: Facing = serde_json::from_value(json).unwrap();
            assert_eq!(back, facing);
        }
    }

    #[test]
    fn test_plot_status_default_is_available() {
        assert_eq!(PlotStatus::default(), PlotStatus::Available);
    }
}
