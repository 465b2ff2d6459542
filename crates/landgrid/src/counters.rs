//! Colony plot counter recompute.
//!
//! Runs after a plot is successfully created or permanently removed, not on
//! ordinary field updates, including status transitions. A plot moved from
//! `available` to `sold` by a direct update leaves the counters stale until
//! the next create/delete against the same colony retriggers a recompute;
//! that staleness is intended behavior, not a bug.
//!
//! The recompute is a full read-aggregate-then-persist pass over the
//! colony's live plot set rather than an incremental delta. It is O(plots in
//! colony) per trigger and self-healing against previously missed updates.
//! Two interleaved plot writes against the same colony can race: each reads
//! the plot set independently and writes back a snapshot, so the last
//! recompute wins. The counters are advisory and the race is accepted.

use landgrid_store::{Collection, Database, Filter, StoreError};
use landgrid_types::{ColonyCounters, ObjectId, Plot, PlotStatus};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors during a counter recompute.
///
/// Never propagated to the caller of the triggering plot write: the plot
/// mutation has already committed independently, so a failure here is
/// logged and the counters stay stale until the next successful trigger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecomputeError {
    #[error("store failure during counter recompute: {0}")]
    Store(#[from] StoreError),

    #[error("colony {0} missing during counter recompute")]
    ColonyMissing(ObjectId),
}

/// Read access to the plots of a colony.
///
/// The recompute component receives this interface explicitly instead of
/// resolving the plot collection from any shared registry, so it can be
/// exercised in isolation against a fake.
pub trait PlotQuery {
    fn plots_in_colony(&self, colony: &ObjectId) -> Result<Vec<Plot>, StoreError>;
}

impl PlotQuery for Collection<Plot> {
    fn plots_in_colony(&self, colony: &ObjectId) -> Result<Vec<Plot>, StoreError> {
        self.find(&Filter::all().eq("colony", colony.as_str()))
    }
}

/// The counter recompute component.
pub struct CounterRecompute<'a> {
    plots: &'a dyn PlotQuery,
}

impl<'a> CounterRecompute<'a> {
    pub fn new(plots: &'a dyn PlotQuery) -> Self {
        Self { plots }
    }

    /// Aggregates the live plot set of a colony into counter values.
    ///
    /// `total_plots` counts every plot; the status buckets count
    /// `available`, `sold` and `blocked`. There is no bucket for `reserved`,
    /// so the buckets can sum to less than the total.
    pub fn counters_for(&self, colony: &ObjectId) -> Result<ColonyCounters, RecomputeError> {
        let plots = self.plots.plots_in_colony(colony)?;
        let mut counters = ColonyCounters {
            total_plots: plots.len() as u64,
            ..ColonyCounters::default()
        };
        for plot in &plots {
            match plot.status {
                PlotStatus::Available => counters.available_plots += 1,
                PlotStatus::Sold => counters.sold_plots += 1,
                PlotStatus::Blocked => counters.blocked_plots += 1,
                PlotStatus::Reserved => {}
            }
        }
        Ok(counters)
    }
}

/// Recomputes and persists the counters of one colony.
pub fn refresh_colony(db: &mut Database, colony_id: &ObjectId) -> Result<ColonyCounters, RecomputeError> {
    let counters = CounterRecompute::new(&db.plots).counters_for(colony_id)?;
    let mut colony = db
        .colonies
        .get(colony_id)
        .cloned()
        .ok_or_else(|| RecomputeError::ColonyMissing(colony_id.clone()))?;
    colony.counters = counters;
    db.colonies.update(colony)?;
    debug!(
        colony = %colony_id,
        total = counters.total_plots,
        available = counters.available_plots,
        sold = counters.sold_plots,
        blocked = counters.blocked_plots,
        "colony counters recomputed"
    );
    Ok(counters)
}

/// The best-effort follow-up step after a plot create/delete.
///
/// The triggering plot write has already committed; a failure here is
/// logged and swallowed, leaving the counters transiently stale.
pub fn refresh_colony_best_effort(db: &mut Database, colony_id: &ObjectId) {
    if let Err(err) = refresh_colony(db, colony_id) {
        warn!(
            colony = %colony_id,
            error = %err,
            "colony counter recompute failed; counters stale until next trigger"
        );
    }
}
