//! Colony service.
//!
//! The four plot counters are never writable through this service: neither
//! payload carries them, and the stored values only change through the
//! counter recompute triggered by plot create/delete.

use chrono::Utc;
use landgrid_store::{Database, Filter};
use landgrid_types::{
    Amenity, Approval, Colony, ColonyCounters, ColonyStatus, GeoPoint, ObjectId, Page, Seller,
};
use landgrid_validate::{ValidationReport, rules};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{Conflict, ServiceError, ServiceResult};
use crate::services::parse_id;

/// Payload for creating a colony.
#[derive(Debug, Clone, Default)]
pub struct NewColony {
    pub name: String,
    pub description: Option<String>,
    /// Raw city id as received from the caller.
    pub city: Option<String>,
    pub address: Option<String>,
    pub total_area: Option<Decimal>,
    pub price_per_sq_ft: Option<Decimal>,
    pub status: ColonyStatus,
    pub amenities: Vec<Amenity>,
    pub images: Vec<String>,
    pub layout: Option<String>,
    pub location: Option<GeoPoint>,
    pub approvals: Vec<Approval>,
    pub features: Vec<String>,
    pub sellers: Vec<Seller>,
    pub nearby_places: Vec<String>,
    pub created_by: Option<String>,
}

/// Partial update payload. Counters are not part of the update surface.
#[derive(Debug, Clone, Default)]
pub struct ColonyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub total_area: Option<Decimal>,
    pub price_per_sq_ft: Option<Decimal>,
    pub status: Option<ColonyStatus>,
    pub amenities: Option<Vec<Amenity>>,
    pub images: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub sellers: Option<Vec<Seller>>,
    pub nearby_places: Option<Vec<String>>,
}

/// List query for colonies.
#[derive(Debug, Clone, Default)]
pub struct ColonyListQuery {
    /// Case-insensitive substring match on the colony name.
    pub search: Option<String>,
    pub status: Option<ColonyStatus>,
    pub page: u64,
    pub limit: u64,
}

fn validate_sellers(report: &mut ValidationReport, sellers: &[Seller]) -> Vec<Seller> {
    let mut out = Vec::with_capacity(sellers.len());
    for (index, seller) in sellers.iter().enumerate() {
        let mut seller = seller.clone();
        seller.name = seller.name.trim().to_string();
        if seller.name.is_empty() {
            report.reject(&format!("sellers[{index}].name"), "seller name is required");
            continue;
        }
        if let Some(email) = &seller.email {
            seller.email =
                report.capture(&format!("sellers[{index}].email"), email.clone(), rules::email(email));
        }
        if let Some(mobile) = &seller.mobile {
            seller.mobile =
                report.capture(&format!("sellers[{index}].mobile"), mobile.clone(), rules::phone(mobile));
        }
        out.push(seller);
    }
    out
}

fn validate_images(report: &mut ValidationReport, images: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(images.len());
    for (index, image) in images.iter().enumerate() {
        if let Some(url) =
            report.capture(&format!("images[{index}]"), image.clone(), rules::image_url(image))
        {
            out.push(url);
        }
    }
    out
}

/// Creates a colony with all counters at zero.
pub fn create(db: &mut Database, input: NewColony) -> ServiceResult<Colony> {
    let mut report = ValidationReport::new();
    let name = report.capture("name", input.name.clone(), rules::colony_name(&input.name));
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
    let sellers = validate_sellers(&mut report, &input.sellers);
    let images = validate_images(&mut report, &input.images);

    let (Some(name), Some(city), Some(created_by)) = (name, city, created_by) else {
        return Err(ServiceError::Validation(report));
    };
    report.into_result().map_err(ServiceError::from)?;

    if let Some(city_id) = &city {
        if db.cities.get(city_id).is_none() {
            return Err(ServiceError::NotFound {
                entity: "city",
                id: city_id.clone(),
            });
        }
    }

    let colony = Colony {
        id: ObjectId::generate(),
        name,
        description: input.description,
        city,
        address: input.address,
        total_area: input.total_area,
        price_per_sq_ft: input.price_per_sq_ft,
        status: input.status,
        amenities: input.amenities,
        images,
        layout: input.layout,
        location: input.location,
        approvals: input.approvals,
        features: input.features,
        sellers,
        nearby_places: input.nearby_places,
        counters: ColonyCounters::default(),
        created_by,
        created_at: Utc::now(),
    };

    db.colonies.insert(colony.clone())?;
    info!(colony = %colony.id, name = %colony.name, "colony created");
    Ok(colony)
}

/// Applies a partial update. The counters on the stored record are carried
/// over untouched.
pub fn update(db: &mut Database, id_raw: &str, patch: ColonyPatch) -> ServiceResult<Colony> {
    let id = parse_id("id", id_raw)?;
    let mut colony = db
        .colonies
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "colony", id })?;

    let mut report = ValidationReport::new();
    let name = patch
        .name
        .as_ref()
        .and_then(|raw| report.capture("name", raw.clone(), rules::colony_name(raw)));
    let sellers = patch
        .sellers
        .as_ref()
        .map(|entries| validate_sellers(&mut report, entries));
    let images = patch
        .images
        .as_ref()
        .map(|entries| validate_images(&mut report, entries));
    report.into_result().map_err(ServiceError::from)?;

    if let Some(name) = name {
        colony.name = name;
    }
    if let Some(description) = patch.description {
        colony.description = Some(description);
    }
    if let Some(address) = patch.address {
        colony.address = Some(address);
    }
    if let Some(total_area) = patch.total_area {
        colony.total_area = Some(total_area);
    }
    if let Some(price) = patch.price_per_sq_ft {
        colony.price_per_sq_ft = Some(price);
    }
    if let Some(status) = patch.status {
        colony.status = status;
    }
    if let Some(amenities) = patch.amenities {
        colony.amenities = amenities;
    }
    if let Some(images) = images {
        colony.images = images;
    }
    if let Some(features) = patch.features {
        colony.features = features;
    }
    if let Some(sellers) = sellers {
        colony.sellers = sellers;
    }
    if let Some(nearby_places) = patch.nearby_places {
        colony.nearby_places = nearby_places;
    }

    db.colonies.update(colony.clone())?;
    info!(colony = %colony.id, "colony updated");
    Ok(colony)
}

/// Deletes a colony. Rejected while the colony still owns plots.
pub fn delete(db: &mut Database, id_raw: &str) -> ServiceResult<Colony> {
    let id = parse_id("id", id_raw)?;
    let colony = db
        .colonies
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "colony", id })?;

    let owned = db
        .plots
        .count(&Filter::all().eq("colony", colony.id.as_str()))?;
    if owned > 0 {
        return Err(Conflict::ColonyHasPlots(colony.id).into());
    }

    let removed = db.colonies.remove(&colony.id)?;
    info!(colony = %removed.id, "colony deleted");
    Ok(removed)
}

/// Looks up one colony.
pub fn get(db: &Database, id_raw: &str) -> ServiceResult<Colony> {
    let id = parse_id("id", id_raw)?;
    db.colonies
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "colony", id })
}

/// Lists colonies with optional search/status filters, paginated.
pub fn list(db: &Database, query: &ColonyListQuery) -> ServiceResult<(Vec<Colony>, Page)> {
    let mut filter = Filter::all();
    if let Some(search) = &query.search {
        filter = filter.contains("name", search.clone());
    }
    if let Some(status) = query.status {
        filter = filter.eq("status", status.as_str());
    }

    let matched = db.colonies.find(&filter)?;
    let total = matched.len() as u64;
    let page = Page::compute(total, query.limit, query.page);
    let (start, end) = Page::slice_bounds(total, query.limit, query.page);
    Ok((matched[start..end].to_vec(), page))
}
