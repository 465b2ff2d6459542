//! End-to-end service tests.

use rust_decimal::Decimal;

use crate::error::{Conflict, ServiceError};
use crate::services::booking::{self, NewBooking};
use crate::services::colony::{self, NewColony};
use crate::services::plot::{self, NewPlot, PlotListQuery, PlotPatch};
use crate::services::role::{self, NewRole};
use crate::services::user::{self, NewUser, PasswordHasher};
use landgrid_store::Database;
use landgrid_types::{Colony, PlotStatus};

struct NoopHasher;

impl PasswordHasher for NoopHasher {
    fn hash(&self, raw: &str) -> String {
        format!("hashed:{raw}")
    }
}

fn make_colony(db: &mut Database, name: &str) -> Colony {
    colony::create(
        db,
        NewColony {
            name: name.to_string(),
            ..NewColony::default()
        },
    )
    .unwrap()
}

fn make_plot_input(colony: &Colony, number: &str) -> NewPlot {
    NewPlot {
        plot_number: number.to_string(),
        colony: colony.id.to_string(),
        area: Decimal::from(1200),
        price_per_sq_ft: Decimal::from(1500),
        facing: "north".to_string(),
        ..NewPlot::default()
    }
}

fn make_user(db: &mut Database, email: &str) -> landgrid_types::User {
    user::create(
        db,
        &NoopHasher,
        NewUser {
            name: "Asha Verma".to_string(),
            email: email.to_string(),
            password: "Secret1pass".to_string(),
            ..NewUser::default()
        },
    )
    .unwrap()
}

#[test]
fn test_total_price_is_derived_and_caller_value_ignored() {
    let mut db = Database::new();
    let c = make_colony(&mut db, "Green Meadows");

    let mut input = make_plot_input(&c, "A-1");
    input.total_price = Some(Decimal::from(1)); // must be ignored
    let plot = plot::create(&mut db, input).unwrap();
    assert_eq!(plot.total_price, Decimal::from(1_800_000));

    // Update changes area; the derived value follows, again ignoring the
    // caller-supplied total.
    let updated = plot::update(
        &mut db,
        plot.id.as_str(),
        PlotPatch {
            area: Some(Decimal::from(2000)),
            total_price: Some(Decimal::from(7)),
            ..PlotPatch::default()
        },
    )
    .unwrap();
    assert_eq!(updated.total_price, Decimal::from(3_000_000));
}

#[test]
fn test_counters_follow_plot_create_and_delete() {
    let mut db = Database::new();
    let c = make_colony(&mut db, "Green Meadows");
    assert_eq!(c.counters.total_plots, 0);

    let p1 = plot::create(&mut db, make_plot_input(&c, "A-1")).unwrap();
    let after_create = db.colonies.get(&c.id).unwrap();
    assert_eq!(after_create.counters.total_plots, 1);
    assert_eq!(after_create.counters.available_plots, 1);
    assert_eq!(after_create.counters.sold_plots, 0);
    assert_eq!(after_create.counters.blocked_plots, 0);

    plot::delete(&mut db, p1.id.as_str()).unwrap();
    let after_delete = db.colonies.get(&c.id).unwrap();
    assert_eq!(after_delete.counters.total_plots, 0);
    assert_eq!(after_delete.counters.available_plots, 0);
}

#[test]
fn test_status_update_leaves_counters_stale_until_next_trigger() {
    let mut db = Database::new();
    let c = make_colony(&mut db, "Green Meadows");
    let p1 = plot::create(&mut db, make_plot_input(&c, "A-1")).unwrap();

    // Direct status update: no recompute trigger fires.
    plot::update(
        &mut db,
        p1.id.as_str(),
        PlotPatch {
            status: Some(PlotStatus::Sold),
            ..PlotPatch::default()
        },
    )
    .unwrap();
    let stale = db.colonies.get(&c.id).unwrap();
    assert_eq!(stale.counters.available_plots, 1); // stale by design
    assert_eq!(stale.counters.sold_plots, 0);

    // The next create against the colony retriggers a full recompute that
    // heals the drift.
    plot::create(&mut db, make_plot_input(&c, "A-2")).unwrap();
    let healed = db.colonies.get(&c.id).unwrap();
    assert_eq!(healed.counters.total_plots, 2);
    assert_eq!(healed.counters.available_plots, 1);
    assert_eq!(healed.counters.sold_plots, 1);
}

#[test]
fn test_reserved_plots_count_in_total_but_no_bucket() {
    let mut db = Database::new();
    let c = make_colony(&mut db, "Green Meadows");
    let mut input = make_plot_input(&c, "R-1");
    input.status = PlotStatus::Reserved;
    plot::create(&mut db, input).unwrap();
    plot::create(&mut db, make_plot_input(&c, "A-1")).unwrap();

    let counters = db.colonies.get(&c.id).unwrap().counters;
    assert_eq!(counters.total_plots, 2);
    assert!(
        counters.available_plots + counters.sold_plots + counters.blocked_plots
            < counters.total_plots
    );
}

#[test]
fn test_plot_number_unique_per_colony_only() {
    let mut db = Database::new();
    let c1 = make_colony(&mut db, "Green Meadows");
    let c2 = make_colony(&mut db, "Sunrise Enclave");

    plot::create(&mut db, make_plot_input(&c1, "A-1")).unwrap();

    // Same number in the same colony: conflict, nothing stored.
    let err = plot::create(&mut db, make_plot_input(&c1, "A-1")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict(Conflict::DuplicatePlotNumber { .. })
    ));
    assert_eq!(db.plots.len(), 1);

    // Same number in a different colony: fine.
    plot::create(&mut db, make_plot_input(&c2, "A-1")).unwrap();
    assert_eq!(db.plots.len(), 2);
}

#[test]
fn test_sold_plot_cannot_be_deleted() {
    let mut db = Database::new();
    let c = make_colony(&mut db, "Green Meadows");
    let mut input = make_plot_input(&c, "S-1");
    input.status = PlotStatus::Sold;
    let p = plot::create(&mut db, input).unwrap();

    let err = plot::delete(&mut db, p.id.as_str()).unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(Conflict::PlotSold(_))));
    assert!(db.plots.get(&p.id).is_some());
}

#[test]
fn test_colony_with_plots_cannot_be_deleted() {
    let mut db = Database::new();
    let c = make_colony(&mut db, "Green Meadows");
    plot::create(&mut db, make_plot_input(&c, "A-1")).unwrap();

    let err = colony::delete(&mut db, c.id.as_str()).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict(Conflict::ColonyHasPlots(_))
    ));
    assert!(db.colonies.get(&c.id).is_some());
}

#[test]
fn test_role_in_use_cannot_be_deleted() {
    let mut db = Database::new();
    let r = role::create(
        &mut db,
        NewRole {
            name: "sales".to_string(),
            permissions: vec!["plots.read".to_string()],
            ..NewRole::default()
        },
    )
    .unwrap();
    user::create(
        &mut db,
        &NoopHasher,
        NewUser {
            name: "Asha Verma".to_string(),
            email: "asha@example.com".to_string(),
            password: "Secret1pass".to_string(),
            role: Some(r.id.to_string()),
            ..NewUser::default()
        },
    )
    .unwrap();

    let err = role::delete(&mut db, r.id.as_str()).unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(Conflict::RoleInUse(_))));
    // Both records unchanged.
    assert!(db.roles.get(&r.id).is_some());
    assert_eq!(db.users.len(), 1);
}

#[test]
fn test_duplicate_email_is_a_conflict_after_normalization() {
    let mut db = Database::new();
    make_user(&mut db, "asha@example.com");

    let err = user::create(
        &mut db,
        &NoopHasher,
        NewUser {
            name: "Imposter".to_string(),
            email: "  ASHA@Example.COM ".to_string(),
            password: "Secret1pass".to_string(),
            ..NewUser::default()
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict(Conflict::DuplicateEmail(_))
    ));
}

#[test]
fn test_validation_reports_every_violation_at_once() {
    let mut db = Database::new();
    let c = make_colony(&mut db, "Green Meadows");

    let input = NewPlot {
        plot_number: String::new(),         // empty
        colony: c.id.to_string(),
        area: Decimal::from(10),            // below range
        price_per_sq_ft: Decimal::from(5),  // below range
        facing: "skyward".to_string(),      // not a direction
        ..NewPlot::default()
    };
    let err = plot::create(&mut db, input).unwrap_err();
    let ServiceError::Validation(report) = err else {
        panic!("expected validation error");
    };
    assert_eq!(report.len(), 4);
    assert!(db.plots.is_empty());
}

#[test]
fn test_malformed_id_is_validation_not_store_failure() {
    let db = Database::new();
    let err = plot::get(&db, "definitely-not-hex").unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn test_booking_appends_plot_history_and_rejects_sold_plots() {
    let mut db = Database::new();
    let c = make_colony(&mut db, "Green Meadows");
    let p = plot::create(&mut db, make_plot_input(&c, "A-1")).unwrap();
    let u = make_user(&mut db, "asha@example.com");

    let b = booking::create(
        &mut db,
        NewBooking {
            plot: p.id.to_string(),
            user: u.id.to_string(),
            notes: Some("token advance paid".to_string()),
            ..NewBooking::default()
        },
    )
    .unwrap();

    let plot_after = db.plots.get(&p.id).unwrap();
    assert_eq!(plot_after.booking_history.len(), 1);
    assert_eq!(plot_after.booking_history[0].action, "booked");
    assert_eq!(plot_after.booking_history[0].user.as_ref(), Some(&u.id));

    booking::cancel(&mut db, b.id.as_str()).unwrap();
    let plot_after = db.plots.get(&p.id).unwrap();
    assert_eq!(plot_after.booking_history.len(), 2);
    assert_eq!(plot_after.booking_history[1].action, "booking_cancelled");

    // A sold plot cannot be booked.
    plot::update(
        &mut db,
        p.id.as_str(),
        PlotPatch {
            status: Some(PlotStatus::Sold),
            ..PlotPatch::default()
        },
    )
    .unwrap();
    let err = booking::create(
        &mut db,
        NewBooking {
            plot: p.id.to_string(),
            user: u.id.to_string(),
            ..NewBooking::default()
        },
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Conflict(Conflict::PlotNotBookable(_))
    ));
}

#[test]
fn test_plot_list_pagination_slices() {
    let mut db = Database::new();
    let c = make_colony(&mut db, "Green Meadows");
    for i in 0..25 {
        plot::create(&mut db, make_plot_input(&c, &format!("P-{i}"))).unwrap();
    }

    let query = |page| PlotListQuery {
        colony: Some(c.id.to_string()),
        page,
        limit: 10,
        ..PlotListQuery::default()
    };

    let (first, page) = plot::list(&db, &query(1)).unwrap();
    assert_eq!((first.len(), page.pages, page.total), (10, 3, 25));
    let (second, _) = plot::list(&db, &query(2)).unwrap();
    assert_eq!(second.len(), 10);
    let (third, _) = plot::list(&db, &query(3)).unwrap();
    assert_eq!(third.len(), 5);
    let (past_end, _) = plot::list(&db, &query(4)).unwrap();
    assert!(past_end.is_empty());

    // No overlap between pages.
    assert!(first.iter().all(|p| !second.contains(p)));
}

#[test]
fn test_plot_search_is_case_insensitive_substring() {
    let mut db = Database::new();
    let c = make_colony(&mut db, "Green Meadows");
    plot::create(&mut db, make_plot_input(&c, "NORTH-7")).unwrap();
    plot::create(&mut db, make_plot_input(&c, "B-2")).unwrap();

    let (found, _) = plot::list(
        &db,
        &PlotListQuery {
            search: Some("north".to_string()),
            page: 1,
            limit: 10,
            ..PlotListQuery::default()
        },
    )
    .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].plot_number, "NORTH-7");
}

#[test]
fn test_phone_normalization_on_user_create() {
    let mut db = Database::new();
    let u = user::create(
        &mut db,
        &NoopHasher,
        NewUser {
            name: "Asha Verma".to_string(),
            email: "asha@example.com".to_string(),
            password: "Secret1pass".to_string(),
            phone: Some("9876543210".to_string()),
            ..NewUser::default()
        },
    )
    .unwrap();
    assert_eq!(u.phone.as_deref(), Some("+919876543210"));

    let err = user::create(
        &mut db,
        &NoopHasher,
        NewUser {
            name: "Bad Phone".to_string(),
            email: "bad@example.com".to_string(),
            password: "Secret1pass".to_string(),
            phone: Some("12345".to_string()),
            ..NewUser::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn test_recompute_failure_does_not_fail_the_plot_write() {
    let mut db = Database::new();
    let c = make_colony(&mut db, "Green Meadows");
    let p = plot::create(&mut db, make_plot_input(&c, "A-1")).unwrap();

    // Remove the colony out from under the follow-up: the recompute will
    // fail (colony missing) but the delete below still succeeds. Plots are
    // removed first so the colony delete is not blocked by the conflict
    // check in the service path.
    db.colonies.remove(&c.id).unwrap();
    let removed = plot::delete(&mut db, p.id.as_str()).unwrap();
    assert_eq!(removed.id, p.id);
    assert!(db.plots.is_empty());
}
