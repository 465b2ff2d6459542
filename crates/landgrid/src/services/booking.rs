//! Booking service.
//!
//! A booking is its own record, and creating or cancelling one also appends
//! an entry to the plot's append-only booking history. The two writes are
//! sequential, not atomic, matching the rest of the system's best-effort
//! coupling.

use chrono::{DateTime, Utc};
use landgrid_store::Database;
use landgrid_types::{Booking, BookingEntry, BookingStatus, ObjectId, PlotStatus};
use landgrid_validate::{ValidationReport, rules};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{Conflict, ServiceError, ServiceResult};
use crate::services::parse_id;

/// Payload for creating a booking.
#[derive(Debug, Clone, Default)]
pub struct NewBooking {
    /// Raw plot id as received from the caller.
    pub plot: String,
    /// Raw user id as received from the caller.
    pub user: String,
    /// Defaults to now when absent.
    pub booking_date: Option<DateTime<Utc>>,
    pub amount: Option<Decimal>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
}

/// Books a plot for a user and appends to the plot's booking history.
///
/// Sold plots cannot be booked.
pub fn create(db: &mut Database, input: NewBooking) -> ServiceResult<Booking> {
    let mut report = ValidationReport::new();
    let plot_id = report.capture("plot", input.plot.clone(), rules::object_id(&input.plot));
    let user_id = report.capture("user", input.user.clone(), rules::object_id(&input.user));
    let created_by = match &input.created_by {
        Some(raw) => report
            .capture("createdBy", raw.clone(), rules::object_id(raw))
            .map(Some),
        None => Some(None),
    };

    let (Some(plot_id), Some(user_id), Some(created_by)) = (plot_id, user_id, created_by) else {
        return Err(ServiceError::Validation(report));
    };

    let mut plot = db
        .plots
        .get(&plot_id)
        .cloned()
        .ok_or(ServiceError::NotFound {
            entity: "plot",
            id: plot_id,
        })?;
    if db.users.get(&user_id).is_none() {
        return Err(ServiceError::NotFound {
            entity: "user",
            id: user_id,
        });
    }
    if plot.status == PlotStatus::Sold {
        return Err(Conflict::PlotNotBookable(plot.id).into());
    }

    let booking_date = input.booking_date.unwrap_or_else(Utc::now);
    let booking = Booking {
        id: ObjectId::generate(),
        plot: plot.id.clone(),
        user: user_id.clone(),
        booking_date,
        amount: input.amount,
        status: BookingStatus::Active,
        notes: input.notes.clone(),
        created_by,
        created_at: Utc::now(),
    };
    db.bookings.insert(booking.clone())?;

    plot.booking_history.push(BookingEntry {
        user: Some(user_id),
        action: "booked".to_string(),
        date: booking_date,
        notes: input.notes,
    });
    db.plots.update(plot)?;

    info!(booking = %booking.id, plot = %booking.plot, "booking created");
    Ok(booking)
}

/// Cancels a booking and records the cancellation in the plot's history.
pub fn cancel(db: &mut Database, id_raw: &str) -> ServiceResult<Booking> {
    let id = parse_id("id", id_raw)?;
    let mut booking = db
        .bookings
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "booking", id })?;

    booking.status = BookingStatus::Cancelled;
    db.bookings.update(booking.clone())?;

    // The plot may have been deleted since; history is then simply skipped.
    if let Some(plot) = db.plots.get(&booking.plot).cloned() {
        let mut plot = plot;
        plot.booking_history.push(BookingEntry {
            user: Some(booking.user.clone()),
            action: "booking_cancelled".to_string(),
            date: Utc::now(),
            notes: None,
        });
        db.plots.update(plot)?;
    }

    info!(booking = %booking.id, "booking cancelled");
    Ok(booking)
}

/// Looks up one booking.
pub fn get(db: &Database, id_raw: &str) -> ServiceResult<Booking> {
    let id = parse_id("id", id_raw)?;
    db.bookings
        .get(&id)
        .cloned()
        .ok_or(ServiceError::NotFound { entity: "booking", id })
}
