//! Integration tests for the Diesel timesheet adapters against embedded
//! PostgreSQL.
//!
//! Each test provisions its own database from the migrated template, seeds
//! the demo data through `DieselDemoDataRepository` and drives the
//! repository on a dedicated Tokio runtime.

use backend::domain::ports::{
    DemoDataRepository, SeedingResult, TimesheetRepository, UserRepository,
};
use backend::domain::{
    DEMO_PASSWORD, DemoDataset, EmailAddress, EntryDraft, EntryId, EntryPatch, Hours,
    ProjectName, TimesheetEntry, TimesheetStatus, TimesheetWeek, WeekId,
};
use backend::outbound::persistence::{
    DbPool, DieselDemoDataRepository, DieselTimesheetRepository, DieselUserRepository, PoolConfig,
};
use futures_util::future::join_all;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::{handle_cluster_setup_failure, provision_database};

struct TestContext {
    runtime: Runtime,
    pool: DbPool,
    timesheets: DieselTimesheetRepository,
    dataset: DemoDataset,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn week(&self, raw: &str) -> TimesheetWeek {
        let id = WeekId::new(raw).expect("week id");
        self.runtime
            .block_on(self.timesheets.find_week(&id))
            .expect("find week")
            .expect("week exists")
    }
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database = provision_database()?;
    let config = PoolConfig::new(database.url()).with_max_size(4);
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;
    let dataset = DemoDataset::build().map_err(|err| err.to_string())?;
    let seeded = runtime
        .block_on(DieselDemoDataRepository::new(pool.clone()).seed_demo_data(&dataset))
        .map_err(|err| err.to_string())?;
    if seeded != SeedingResult::Applied {
        return Err(format!("fresh database reported {seeded:?}"));
    }
    Ok(TestContext {
        runtime,
        timesheets: DieselTimesheetRepository::new(pool.clone()),
        pool,
        dataset,
        _database: database,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn entry_for(week: &TimesheetWeek, hours: &str) -> TimesheetEntry {
    TimesheetEntry::from_draft(
        EntryId::random(),
        week.id().clone(),
        EntryDraft {
            date: week.start_date(),
            project_name: ProjectName::new("Upkeep").expect("project"),
            work_type: None,
            description: None,
            hours: hours.parse().expect("hours"),
        },
    )
}

#[rstest]
fn seeded_weeks_keep_store_order(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else { return };
    let weeks = ctx
        .runtime
        .block_on(ctx.timesheets.list_weeks())
        .expect("list weeks");
    assert_eq!(weeks, ctx.dataset.weeks);

    let week_three = WeekId::new("week-3").expect("week id");
    let entries = ctx
        .runtime
        .block_on(ctx.timesheets.list_entries(&week_three))
        .expect("list entries");
    let expected: Vec<_> = ctx
        .dataset
        .entries
        .iter()
        .filter(|entry| entry.week_id() == &week_three)
        .cloned()
        .collect();
    assert_eq!(entries, expected);
}

#[rstest]
fn entry_writes_restate_their_week(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else { return };
    let week = ctx.week("week-5");
    assert_eq!(week.status(), TimesheetStatus::Missing);

    let partial = entry_for(&week, "39.5");
    let after_partial = ctx
        .runtime
        .block_on(ctx.timesheets.insert_entry(&partial))
        .expect("insert");
    assert_eq!(after_partial, Some(TimesheetStatus::Incomplete));
    let stored = ctx
        .runtime
        .block_on(ctx.timesheets.find_entry(&partial.id()))
        .expect("find entry")
        .expect("entry stored");
    assert_eq!(stored.hours().centis(), 3950);

    let topped_up = entry_for(&week, "0.5");
    let after_top_up = ctx
        .runtime
        .block_on(ctx.timesheets.insert_entry(&topped_up))
        .expect("insert");
    assert_eq!(after_top_up, Some(TimesheetStatus::Completed));
    assert_eq!(ctx.week("week-5").status(), TimesheetStatus::Completed);

    let trimmed = topped_up.patched(EntryPatch {
        hours: Some(Hours::new(0).expect("hours")),
        ..EntryPatch::default()
    });
    let after_trim = ctx
        .runtime
        .block_on(ctx.timesheets.update_entry(&trimmed))
        .expect("update");
    assert_eq!(after_trim, Some(TimesheetStatus::Incomplete));

    let removed = ctx
        .runtime
        .block_on(ctx.timesheets.delete_entry(&partial.id()))
        .expect("delete")
        .expect("entry existed");
    assert_eq!(removed.entry, partial);
    assert_eq!(removed.status, TimesheetStatus::Missing);
    assert_eq!(ctx.week("week-5").status(), TimesheetStatus::Missing);
}

#[rstest]
fn unknown_rows_are_reported_as_absent(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else { return };
    let week = ctx.week("week-5");
    let orphan = TimesheetEntry::from_draft(
        EntryId::random(),
        WeekId::new("week-99").expect("week id"),
        EntryDraft {
            date: week.start_date(),
            project_name: ProjectName::new("Upkeep").expect("project"),
            work_type: None,
            description: None,
            hours: Hours::new(4).expect("hours"),
        },
    );
    let inserted = ctx
        .runtime
        .block_on(ctx.timesheets.insert_entry(&orphan))
        .expect("insert");
    assert_eq!(inserted, None);

    let stranger = entry_for(&week, "4");
    let updated = ctx
        .runtime
        .block_on(ctx.timesheets.update_entry(&stranger))
        .expect("update");
    assert_eq!(updated, None);
    let deleted = ctx
        .runtime
        .block_on(ctx.timesheets.delete_entry(&stranger.id()))
        .expect("delete");
    assert!(deleted.is_none());
    let refreshed = ctx
        .runtime
        .block_on(
            ctx.timesheets
                .refresh_week_status(&WeekId::new("week-99").expect("week id")),
        )
        .expect("refresh");
    assert_eq!(refreshed, None);
}

#[rstest]
fn concurrent_inserts_settle_on_the_final_status(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else { return };
    let week = ctx.week("week-5");
    let entries: Vec<TimesheetEntry> = (0..5).map(|_| entry_for(&week, "8")).collect();

    let results = ctx.runtime.block_on(join_all(entries.iter().map(|entry| {
        let repo = DieselTimesheetRepository::new(ctx.pool.clone());
        async move { repo.insert_entry(entry).await }
    })));
    for result in results {
        assert!(result.expect("insert").is_some());
    }

    let stored = ctx
        .runtime
        .block_on(ctx.timesheets.list_entries(week.id()))
        .expect("list entries");
    assert_eq!(stored.len(), 5);
    assert_eq!(ctx.week("week-5").status(), TimesheetStatus::Completed);
}

#[rstest]
fn demo_users_are_found_by_email(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else { return };
    let users = DieselUserRepository::new(ctx.pool.clone());
    let email = EmailAddress::new("test@gmail.com").expect("email");
    let credentials = ctx
        .runtime
        .block_on(users.find_credentials_by_email(&email))
        .expect("lookup")
        .expect("demo user exists");
    assert!(credentials.password.verify(DEMO_PASSWORD));

    let by_id = ctx
        .runtime
        .block_on(users.find_by_id(credentials.user.id()))
        .expect("lookup");
    assert_eq!(by_id, Some(credentials.user));
}
