//! Plot service.
//!
//! The only service with derived-value coupling: `total_price` is recomputed
//! before every persist, and create/delete trigger the colony counter
//! recompute as a best-effort follow-up. Field updates, including status
//! transitions, do not retrigger the recompute, so counters can go stale
//! under normal status-change workflows until the next create/delete.

use chrono::{DateTime, Utc};
use landgrid_store::{Database, Filter};
use landgrid_types::{
    Dimensions, Facing, NearbyAmenity, ObjectId, Page, Plot, PlotCoordinates, PlotDocument,
    PlotStatus, RegistryDetails,
};
use landgrid_validate::{ValidationReport, rules};
use rust_decimal::Decimal;
use tracing::info;

use crate::counters;
use crate::error::{Conflict, ServiceError, ServiceResult};
use crate::pricing;
use crate::services::parse_id;

/// Payload for creating a plot.
#[derive(Debug, Clone, Default)]
pub struct NewPlot {
    pub plot_number: String,
    /// Raw colony id as received from the caller.
    pub colony: String,
    pub area: Decimal,
    pub price_per_sq_ft: Decimal,
    /// Accepted for shape compatibility, but never trusted: the stored
    /// value is always re-derived from `area * price_per_sq_ft`.
    pub total_price: Option<Decimal>,
    pub status: PlotStatus,
    pub is_corner: bool,
    pub facing: String,
    pub road_width: Option<Decimal>,
    pub dimensions: Option<Dimensions>,
    pub coordinates: Option<PlotCoordinates>,
    pub features: Vec<String>,
    pub nearby_amenities: Vec<NearbyAmenity>,
    pub images: Vec<String>,
    pub documents: Vec<PlotDocument>,
    pub created_by: Option<String>,
}

/// Partial update payload. Absent fields keep their stored values.
#[derive(Debug, Clone, Default)]
pub struct PlotPatch {
    pub plot_number: Option<String>,
    pub area: Option<Decimal>,
    pub price_per_sq_ft: Option<Decimal>,
    /// Ignored, same as on create.
    pub total_price: Option<Decimal>,
    pub status: Option<PlotStatus>,
    pub facing: Option<String>,
    pub road_width: Option<Decimal>,
    pub is_corner: Option<bool>,
    pub dimensions: Option<Dimensions>,
    pub coordinates: Option<PlotCoordinates>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub current_owner: Option<String>,
    pub sold_date: Option<DateTime<Utc>>,
    pub registry_details: Option<RegistryDetails>,
}

/// List query for plots.
#[derive(Debug, Clone, Default)]
pub struct PlotListQuery {
    pub colony: Option<String>,
    pub status: Option<PlotStatus>,
    /// Case-insensitive substring match on the plot number.
    pub search: Option<String>,
    pub page: u64,
    pub limit: u64,
}

struct ValidatedNewPlot {
    plot_number: String,
    colony: ObjectId,
    area: Decimal,
    price_per_sq_ft: Decimal,
    facing: Facing,
    road_width: Decimal,
    features: Vec<String>,
    images: Vec<String>,
    created_by: Option<ObjectId>,
}

fn validate_new(input: &NewPlot) -> Result<ValidatedNewPlot, ValidationReport> {
    let mut report = ValidationReport::new();

    let plot_number = report.capture(
        "plotNumber",
        input.plot_number.clone(),
        rules::plot_number(&input.plot_number),
    );
    let colony = report.capture("colony", input.colony.clone(), rules::object_id(&input.colony));
    let area = report.capture("area", input.area.to_string(), rules::area(input.area));
    let price_per_sq_ft = report.capture(
        "pricePerSqFt",
        input.price_per_sq_ft.to_string(),
        rules::price_per_sq_ft(input.price_per_sq_ft),
    );
    let facing = report.capture("facing", input.facing.clone(), rules::facing(&input.facing));
    let road_width = match input.road_width {
        Some(width) => report.capture("roadWidth", width.to_string(), rules::road_width(width)),
        None => Some(Decimal::ZERO),
    };
    let features = capture_each(&mut report, "features", &input.features, rules::feature);
    let images = capture_each(&mut report, "images", &input.images, rules::image_url);
    let created_by = match &input.created_by {
        Some(raw) => report
            .capture("createdBy", raw.clone(), rules::object_id(raw))
            .map(Some),
        None => Some(None),
    };

    match (
        plot_number,
        colony,
        area,
        price_per_sq_ft,
        facing,
        road_width,
        created_by,
    ) {
        (
            Some(plot_number),
            Some(colony),
            Some(area),
            Some(price_per_sq_ft),
            Some(facing),
            Some(road_width),
            Some(created_by),
        ) if report.is_empty() => Ok(ValidatedNewPlot {
            plot_number,
            colony,
            area,
            price_per_sq_ft,
            facing,
            road_width,
            features,
            images,
            created_by,
        }),
        _ => Err(report),
    }
}

/// Validates every entry of an array field, indexing violations.
fn capture_each(
    report: &mut ValidationReport,
    field: &str,
    entries: &[String],
    rule: fn(&str) -> Result<String, String>,
) -> Vec<String> {
    let mut out = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if let Some(ok) = report.capture(&format!("{field}[{index}]"), entry.clone(), rule(entry))
        {
            out.push(ok);
        }
    }
    out
}

/// Creates a plot in an existing colony, then refreshes the colony's
/// counters best-effort.
pub fn create(db: &mut Database, input: NewPlot) -> ServiceResult<Plot> {
    let validated = validate_new(&input)?;

    if db.colonies.get(&validated.colony).is_none() {
        return Err(ServiceError::NotFound {
            entity: "colony",
            id: validated.colony,
        });
    }
    ensure_unique_plot_number(db, &validated.colony, &validated.plot_number, None)?;

    let total_price = pricing::total_price(validated.area, validated.price_per_sq_ft);
    let plot = Plot {
        id: ObjectId::generate(),
        plot_number: validated.plot_number,
        colony: validated.colony,
        area: validated.area,
        dimensions: input.dimensions,
        price_per_sq_ft: validated.price_per_sq_ft,
        total_price,
        status: input.status,
        is_corner: input.is_corner,
        facing: validated.facing,
        road_width: validated.road_width,
        coordinates: input.coordinates,
        features: validated.features,
        nearby_amenities: input.nearby_amenities,
        images: validated.images,
        documents: input.documents,
        booking_history: Vec::new(),
        current_owner: None,
        sold_date: None,
        registry_details: None,
        created_by: validated.created_by,
        created_at: Utc::now(),
    };

    db.plots.insert(plot.clone())?;
    info!(plot = %plot.id, colony = %plot.colony, "plot created");

    // Best-effort follow-up; the insert above stands even if this fails.
    counters::refresh_colony_best_effort(db, &plot.colony);
    Ok(plot)
}

/// Applies a partial update, re-running validation on the provided fields
/// and re-deriving `total_price`.
///
/// Status transitions here do NOT retrigger the counter recompute.
pub fn update(db: &mut Database, id_raw: &str, patch: PlotPatch) -> ServiceResult<Plot> {
    let id = parse_id("id", id_raw)?;
    let mut plot = db
        .plots
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "plot", id })?;

    let mut report = ValidationReport::new();
    let plot_number = patch.plot_number.as_ref().and_then(|raw| {
        report.capture("plotNumber", raw.clone(), rules::plot_number(raw))
    });
    let area = patch
        .area
        .and_then(|value| report.capture("area", value.to_string(), rules::area(value)));
    let price_per_sq_ft = patch.price_per_sq_ft.and_then(|value| {
        report.capture("pricePerSqFt", value.to_string(), rules::price_per_sq_ft(value))
    });
    let facing = patch
        .facing
        .as_ref()
        .and_then(|raw| report.capture("facing", raw.clone(), rules::facing(raw)));
    let road_width = patch.road_width.and_then(|value| {
        report.capture("roadWidth", value.to_string(), rules::road_width(value))
    });
    let features = patch
        .features
        .as_ref()
        .map(|entries| capture_each(&mut report, "features", entries, rules::feature));
    let images = patch
        .images
        .as_ref()
        .map(|entries| capture_each(&mut report, "images", entries, rules::image_url));
    let current_owner = match &patch.current_owner {
        Some(raw) => report
            .capture("currentOwner", raw.clone(), rules::object_id(raw)),
        None => None,
    };
    report.into_result().map_err(ServiceError::from)?;

    if let Some(plot_number) = plot_number {
        ensure_unique_plot_number(db, &plot.colony, &plot_number, Some(&plot.id))?;
        plot.plot_number = plot_number;
    }
    if let Some(area) = area {
        plot.area = area;
    }
    if let Some(price) = price_per_sq_ft {
        plot.price_per_sq_ft = price;
    }
    if let Some(facing) = facing {
        plot.facing = facing;
    }
    if let Some(road_width) = road_width {
        plot.road_width = road_width;
    }
    if let Some(status) = patch.status {
        plot.status = status;
    }
    if let Some(is_corner) = patch.is_corner {
        plot.is_corner = is_corner;
    }
    if let Some(dimensions) = patch.dimensions {
        plot.dimensions = Some(dimensions);
    }
    if let Some(coordinates) = patch.coordinates {
        plot.coordinates = Some(coordinates);
    }
    if let Some(features) = features {
        plot.features = features;
    }
    if let Some(images) = images {
        plot.images = images;
    }
    if let Some(owner) = current_owner {
        plot.current_owner = Some(owner);
    }
    if let Some(sold_date) = patch.sold_date {
        plot.sold_date = Some(sold_date);
    }
    if let Some(registry) = patch.registry_details {
        plot.registry_details = Some(registry);
    }

    // The derived value is never trusted from the caller: recompute before
    // the persist, whatever the patch carried for total_price.
    plot.total_price = pricing::total_price(plot.area, plot.price_per_sq_ft);

    db.plots.update(plot.clone())?;
    info!(plot = %plot.id, "plot updated");
    Ok(plot)
}

/// Permanently removes a plot, then refreshes the colony's counters
/// best-effort. Sold plots cannot be deleted.
pub fn delete(db: &mut Database, id_raw: &str) -> ServiceResult<Plot> {
    let id = parse_id("id", id_raw)?;
    let plot = db
        .plots
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "plot", id })?;

    if plot.status == PlotStatus::Sold {
        return Err(Conflict::PlotSold(plot.id).into());
    }

    let removed = db.plots.remove(&plot.id)?;
    info!(plot = %removed.id, colony = %removed.colony, "plot deleted");

    counters::refresh_colony_best_effort(db, &removed.colony);
    Ok(removed)
}

/// Looks up one plot.
pub fn get(db: &Database, id_raw: &str) -> ServiceResult<Plot> {
    let id = parse_id("id", id_raw)?;
    db.plots
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "plot", id })
}

/// Lists plots with optional colony/status/search filters, paginated.
pub fn list(db: &Database, query: &PlotListQuery) -> ServiceResult<(Vec<Plot>, Page)> {
    let mut filter = Filter::all();
    if let Some(colony_raw) = &query.colony {
        let colony = parse_id("colony", colony_raw)?;
        filter = filter.eq("colony", colony.as_str());
    }
    if let Some(status) = query.status {
        filter = filter.eq("status", status.as_str());
    }
    if let Some(search) = &query.search {
        filter = filter.contains("plotNumber", search.clone());
    }

    let matched = db.plots.find(&filter)?;
    let total = matched.len() as u64;
    let page = Page::compute(total, query.limit, query.page);
    let (start, end) = Page::slice_bounds(total, query.limit, query.page);
    Ok((matched[start..end].to_vec(), page))
}

fn ensure_unique_plot_number(
    db: &Database,
    colony: &ObjectId,
    plot_number: &str,
    exclude: Option<&ObjectId>,
) -> ServiceResult<()> {
    let clashing = db.plots.find(
        &Filter::all()
            .eq("colony", colony.as_str())
            .eq("plotNumber", plot_number),
    )?;
    if clashing.iter().any(|existing| Some(&existing.id) != exclude) {
        return Err(Conflict::DuplicatePlotNumber {
            plot_number: plot_number.to_string(),
            colony: colony.clone(),
        }
        .into());
    }
    Ok(())
}
