//! Geographic and layout coordinate types.

use serde::{Deserialize, Serialize};

/// WGS84 coordinate pair attached to cities and colonies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Position of a plot on its colony layout drawing.
///
/// Layout-local units, not geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotCoordinates {
    pub x: f64,
    pub y: f64,
}
