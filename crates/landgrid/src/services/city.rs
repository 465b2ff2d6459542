//! City service.
//!
//! Cities are provisioned rarely and never hard-deleted by flows in scope,
//! so the surface is create/get/list only. Name+state uniqueness is a
//! seeding-level convention, not a stored constraint.

use chrono::Utc;
use landgrid_store::{Database, Filter};
use landgrid_types::{City, GeoPoint, ObjectId, Page, city::DEFAULT_COUNTRY};
use landgrid_validate::{ValidationReport, rules};
use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use crate::services::parse_id;

/// Payload for provisioning a city.
#[derive(Debug, Clone, Default)]
pub struct NewCity {
    pub name: String,
    pub state: String,
    /// Defaults to `"India"` when absent.
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub location: Option<GeoPoint>,
    pub created_by: Option<String>,
}

/// List query for cities.
#[derive(Debug, Clone, Default)]
pub struct CityListQuery {
    /// Case-insensitive substring match on the city name.
    pub search: Option<String>,
    pub state: Option<String>,
    pub page: u64,
    pub limit: u64,
}

/// Provisions a city.
pub fn create(db: &mut Database, input: NewCity) -> ServiceResult<City> {
    let mut report = ValidationReport::new();
    let name = report.capture("name", input.name.clone(), rules::city_name(&input.name));
    let state = report.capture("state", input.state.clone(), rules::city_name(&input.state));
    let created_by = match &input.created_by {
        Some(raw) => report
            .capture("createdBy", raw.clone(), rules::object_id(raw))
            .map(Some),
        None => Some(None),
    };

    let (Some(name), Some(state), Some(created_by)) = (name, state, created_by) else {
        return Err(ServiceError::Validation(report));
    };

    let city = City {
        id: ObjectId::generate(),
        name,
        state,
        country: input
            .country
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
        postal_code: input.postal_code,
        is_active: true,
        location: input.location,
        created_by,
        created_at: Utc::now(),
    };

    db.cities.insert(city.clone())?;
    info!(city = %city.id, name = %city.name, state = %city.state, "city created");
    Ok(city)
}

/// Looks up one city.
pub fn get(db: &Database, id_raw: &str) -> ServiceResult<City> {
    let id = parse_id("id", id_raw)?;
    db.cities
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "city", id })
}

/// Lists cities with optional search/state filters, paginated.
pub fn list(db: &Database, query: &CityListQuery) -> ServiceResult<(Vec<City>, Page)> {
    let mut filter = Filter::all();
    if let Some(search) = &query.search {
        filter = filter.contains("name", search.clone());
    }
    if let Some(state) = &query.state {
        filter = filter.eq("state", state.clone());
    }

    let matched = db.cities.find(&filter)?;
    let total = matched.len() as u64;
    let page = Page::compute(total, query.limit, query.page);
    let (start, end) = Page::slice_bounds(total, query.limit, query.page);
    Ok((matched[start..end].to_vec(), page))
}
