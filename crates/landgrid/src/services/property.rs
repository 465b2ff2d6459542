//! Property (marketing listing) service.
//!
//! Properties reference colonies and cities but carry no derived-value
//! coupling: nothing here touches the colony counters. Media fields are
//! path references only; upload handling lives outside the system.

use chrono::Utc;
use landgrid_store::{Database, Filter};
use landgrid_types::{
    MediaBundle, ObjectId, Page, Property, PropertyCategory, PropertyStatus,
};
use landgrid_validate::{ValidationReport, rules};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use crate::services::parse_id;

/// Payload for creating a listing.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub name: String,
    pub category: PropertyCategory,
    /// Raw colony id as received from the caller.
    pub colony: Option<String>,
    /// Raw city id as received from the caller.
    pub city: Option<String>,
    pub area: Option<Decimal>,
    pub address: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub facilities: Vec<String>,
    pub amenities: Vec<String>,
    pub media: MediaBundle,
    pub created_by: Option<String>,
}

/// List query for properties.
#[derive(Debug, Clone, Default)]
pub struct PropertyListQuery {
    /// Case-insensitive substring match on the listing name.
    pub search: Option<String>,
    pub status: Option<PropertyStatus>,
    pub page: u64,
    pub limit: u64,
}

/// Creates a listing in `draft` status.
pub fn create(db: &mut Database, input: NewProperty) -> ServiceResult<Property> {
    let mut report = ValidationReport::new();
    let name = report.capture("name", input.name.clone(), rules::colony_name(&input.name));
    let colony = match &input.colony {
        Some(raw) => report.capture("colony", raw.clone(), rules::object_id(raw)).map(Some),
        None => Some(None),
    };
    let city = match &input.city {
        Some(raw) => report.capture("city", raw.clone(), rules::object_id(raw)).map(Some),
        None => Some(None),
    };
    let created_by = match &input.created_by {
        Some(raw) => report
            .capture("createdBy", raw.clone(), rules::object_id(raw))
            .map(Some),
        None => Some(None),
    };

    let (Some(name), Some(colony), Some(city), Some(created_by)) =
        (name, colony, city, created_by)
    else {
        return Err(ServiceError::Validation(report));
    };

    if let Some(colony_id) = &colony {
        if db.colonies.get(colony_id).is_none() {
            return Err(ServiceError::NotFound {
                entity: "colony",
                id: colony_id.clone(),
            });
        }
    }
    if let Some(city_id) = &city {
        if db.cities.get(city_id).is_none() {
            return Err(ServiceError::NotFound {
                entity: "city",
                id: city_id.clone(),
            });
        }
    }

    let property = Property {
        id: ObjectId::generate(),
        name,
        category: input.category,
        colony,
        city,
        area: input.area,
        address: input.address,
        tagline: input.tagline,
        description: input.description,
        facilities: input.facilities,
        amenities: input.amenities,
        media: input.media,
        status: PropertyStatus::Draft,
        created_by,
        created_at: Utc::now(),
    };

    db.properties.insert(property.clone())?;
    info!(property = %property.id, name = %property.name, "property created");
    Ok(property)
}

/// Moves a listing to a new publication status.
pub fn set_status(
    db: &mut Database,
    id_raw: &str,
    status: PropertyStatus,
) -> ServiceResult<Property> {
    let id = parse_id("id", id_raw)?;
    let mut property = db
        .properties
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "property", id })?;
    property.status = status;
    db.properties.update(property.clone())?;
    info!(property = %property.id, status = ?status, "property status changed");
    Ok(property)
}

/// Looks up one listing.
pub fn get(db: &Database, id_raw: &str) -> ServiceResult<Property> {
    let id = parse_id("id", id_raw)?;
    db.properties
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "property", id })
}

/// Deletes a listing. Listings own nothing, so no conflict checks apply.
pub fn delete(db: &mut Database, id_raw: &str) -> ServiceResult<Property> {
    let id = parse_id("id", id_raw)?;
    let property = db
        .properties
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "property", id })?;
    let removed = db.properties.remove(&property.id)?;
    info!(property = %removed.id, "property deleted");
    Ok(removed)
}

/// Lists listings with optional search/status filters, paginated.
pub fn list(db: &Database, query: &PropertyListQuery) -> ServiceResult<(Vec<Property>, Page)> {
    let mut filter = Filter::all();
    if let Some(search) = &query.search {
        filter = filter.contains("name", search.clone());
    }
    if let Some(status) = query.status {
        filter = filter.eq("status", status.as_str());
    }

    let matched = db.properties.find(&filter)?;
    let total = matched.len() as u64;
    let page = Page::compute(total, query.limit, query.page);
    let (start, end) = Page::slice_bounds(total, query.limit, query.page);
    Ok((matched[start..end].to_vec(), page))
}
