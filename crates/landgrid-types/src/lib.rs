//! # landgrid-types: Core types for Landgrid
//!
//! This crate contains the shared types used across the Landgrid system:
//! - Object identifiers ([`ObjectId`])
//! - Geographic types ([`GeoPoint`], [`PlotCoordinates`])
//! - Entity records ([`City`], [`Colony`], [`Plot`], [`Property`], [`User`],
//!   [`Role`], [`Booking`])
//! - The response envelope ([`ApiResponse`], [`Page`], [`FieldViolation`])
//!
//! All entity records serialize with camelCase field names; that shape is the
//! wire contract any HTTP boundary layer exposes.

pub mod booking;
pub mod city;
pub mod colony;
pub mod envelope;
pub mod geo;
pub mod id;
pub mod plot;
pub mod property;
pub mod role;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingStatus};
pub use city::City;
pub use colony::{Amenity, Approval, Colony, ColonyCounters, ColonyStatus, Seller};
pub use envelope::{ApiResponse, FieldViolation, Page, ViolationLocation};
pub use geo::{GeoPoint, PlotCoordinates};
pub use id::{IdError, ObjectId};
pub use plot::{
    BookingEntry, Dimensions, Facing, NearbyAmenity, Plot, PlotDocument, PlotStatus,
    RegistryDetails,
};
pub use property::{MediaBundle, Property, PropertyCategory, PropertyStatus};
pub use role::Role;
pub use user::User;
