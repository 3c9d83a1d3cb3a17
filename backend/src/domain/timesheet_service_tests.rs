//! Tests for the timesheet service against mocked storage.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use mockable::MockClock;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockTimesheetRepository;
use crate::domain::{
    DateBucket, Description, ErrorCode, Hours, ProjectName, StatusFilter, TimesheetStatus,
    TotalHours, WorkType,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

fn week_id(raw: &str) -> WeekId {
    WeekId::new(raw).expect("fixture slug")
}

fn week(id: &str, start: NaiveDate, end: NaiveDate, status: TimesheetStatus) -> TimesheetWeek {
    TimesheetWeek::new(week_id(id), 1, start, end)
        .expect("valid week")
        .with_status(status)
}

fn draft(day: NaiveDate, hours: u8) -> EntryDraft {
    EntryDraft {
        date: day,
        project_name: ProjectName::new("Website Redesign").expect("name"),
        work_type: WorkType::optional("Development").expect("work type"),
        description: Description::optional("Frontend implementation").expect("description"),
        hours: Hours::new(hours).expect("hours"),
    }
}

fn entry(week: &str, day: NaiveDate, hours: u8) -> TimesheetEntry {
    TimesheetEntry::from_draft(EntryId::random(), week_id(week), draft(day, hours))
}

#[fixture]
fn clock() -> Arc<dyn Clock> {
    let mut clock = MockClock::new();
    let now = Utc
        .with_ymd_and_hms(2026, 1, 20, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp");
    clock.expect_utc().return_const(now);
    Arc::new(clock)
}

fn make_service(
    repo: MockTimesheetRepository,
    clock: Arc<dyn Clock>,
) -> TimesheetService<MockTimesheetRepository> {
    TimesheetService::new(Arc::new(repo), clock)
}

#[rstest]
#[tokio::test]
async fn list_weeks_applies_bucket_against_clock(clock: Arc<dyn Clock>) {
    let mut repo = MockTimesheetRepository::new();
    repo.expect_list_weeks().times(1).return_once(|| {
        Ok(vec![
            week("week-0", date(2025, 12, 22), date(2025, 12, 26), TimesheetStatus::Incomplete),
            week("week-1", date(2026, 1, 1), date(2026, 1, 5), TimesheetStatus::Completed),
        ])
    });
    let service = make_service(repo, clock);

    let weeks = service
        .list_weeks(&WeekFilter::new(StatusFilter::All, DateBucket::ThisMonth))
        .await
        .expect("list succeeds");

    let ids: Vec<&str> = weeks.iter().map(|w| w.id().as_ref()).collect();
    assert_eq!(ids, vec!["week-1"]);
}

#[rstest]
#[tokio::test]
async fn get_week_reports_not_found(clock: Arc<dyn Clock>) {
    let mut repo = MockTimesheetRepository::new();
    repo.expect_find_week()
        .with(eq(week_id("week-9")))
        .times(1)
        .return_once(|_| Ok(None));
    repo.expect_list_entries().never();
    let service = make_service(repo, clock);

    let err = service
        .get_week(&week_id("week-9"))
        .await
        .expect_err("unknown week");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(
        err.details(),
        Some(&serde_json::json!({ "weekId": "week-9" }))
    );
}

#[rstest]
#[tokio::test]
async fn get_week_assembles_detail(clock: Arc<dyn Clock>) {
    let mut repo = MockTimesheetRepository::new();
    repo.expect_find_week().return_once(|_| {
        Ok(Some(week(
            "week-3",
            date(2026, 1, 15),
            date(2026, 1, 19),
            TimesheetStatus::Incomplete,
        )))
    });
    repo.expect_list_entries().return_once(|_| {
        Ok(vec![
            entry("week-3", date(2026, 1, 15), 4),
            entry("week-3", date(2026, 1, 16), 4),
        ])
    });
    let service = make_service(repo, clock);

    let detail = service
        .get_week(&week_id("week-3"))
        .await
        .expect("week exists");
    assert_eq!(detail.total_hours(), TotalHours::new(8));
    assert_eq!(detail.entries().len(), 2);
    assert_eq!(detail.days().len(), 5);
}

#[rstest]
#[tokio::test]
async fn create_entry_recomputes_status(clock: Arc<dyn Clock>) {
    let mut repo = MockTimesheetRepository::new();
    repo.expect_find_week().return_once(|_| {
        Ok(Some(week(
            "week-5",
            date(2026, 1, 29),
            date(2026, 2, 2),
            TimesheetStatus::Missing,
        )))
    });
    repo.expect_insert_entry()
        .withf(|stored| {
            stored.week_id().as_ref() == "week-5" && stored.hours().centis() == 800
        })
        .times(1)
        .return_once(|_| Ok(Some(TimesheetStatus::Incomplete)));
    repo.expect_refresh_week_status().never();
    let service = make_service(repo, clock);

    let created = service
        .create_entry(&week_id("week-5"), draft(date(2026, 1, 29), 8))
        .await
        .expect("entry created");
    assert_eq!(created.week_id().as_ref(), "week-5");
    assert_eq!(created.hours(), Hours::new(8).expect("hours"));
}

#[rstest]
#[tokio::test]
async fn create_entry_keeps_fractional_hours(clock: Arc<dyn Clock>) {
    let mut repo = MockTimesheetRepository::new();
    repo.expect_find_week().return_once(|_| {
        Ok(Some(week(
            "week-5",
            date(2026, 1, 29),
            date(2026, 2, 2),
            TimesheetStatus::Missing,
        )))
    });
    repo.expect_insert_entry()
        .withf(|stored| stored.hours().centis() == 750)
        .times(1)
        .return_once(|_| Ok(Some(TimesheetStatus::Incomplete)));
    let service = make_service(repo, clock);

    let mut half_day = draft(date(2026, 1, 30), 0);
    half_day.hours = "7.5".parse().expect("hours");
    let created = service
        .create_entry(&week_id("week-5"), half_day)
        .await
        .expect("entry created");
    assert_eq!(created.hours().to_string(), "7.5h");
}

#[rstest]
#[tokio::test]
async fn create_entry_reports_week_removed_mid_write(clock: Arc<dyn Clock>) {
    let mut repo = MockTimesheetRepository::new();
    repo.expect_find_week().return_once(|_| {
        Ok(Some(week(
            "week-5",
            date(2026, 1, 29),
            date(2026, 2, 2),
            TimesheetStatus::Missing,
        )))
    });
    repo.expect_insert_entry().times(1).return_once(|_| Ok(None));
    let service = make_service(repo, clock);

    let err = service
        .create_entry(&week_id("week-5"), draft(date(2026, 1, 29), 8))
        .await
        .expect_err("week vanished");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_entry_rejects_dates_outside_week(clock: Arc<dyn Clock>) {
    let mut repo = MockTimesheetRepository::new();
    repo.expect_find_week().return_once(|_| {
        Ok(Some(week(
            "week-1",
            date(2026, 1, 1),
            date(2026, 1, 5),
            TimesheetStatus::Completed,
        )))
    });
    repo.expect_insert_entry().never();
    let service = make_service(repo, clock);

    let err = service
        .create_entry(&week_id("week-1"), draft(date(2026, 1, 6), 8))
        .await
        .expect_err("date outside week");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        err.details().and_then(|d| d.get("field")),
        Some(&serde_json::json!("date"))
    );
}

#[rstest]
#[tokio::test]
async fn create_entry_on_unknown_week_is_not_found(clock: Arc<dyn Clock>) {
    let mut repo = MockTimesheetRepository::new();
    repo.expect_find_week().return_once(|_| Ok(None));
    repo.expect_insert_entry().never();
    let service = make_service(repo, clock);

    let err = service
        .create_entry(&week_id("week-42"), draft(date(2026, 1, 1), 8))
        .await
        .expect_err("unknown week");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_entry_on_unknown_id_is_not_found(clock: Arc<dyn Clock>) {
    let mut repo = MockTimesheetRepository::new();
    repo.expect_find_entry().return_once(|_| Ok(None));
    repo.expect_update_entry().never();
    let service = make_service(repo, clock);

    let err = service
        .update_entry(&EntryId::random(), EntryPatch::default())
        .await
        .expect_err("unknown entry");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_entry_merges_patch_and_refreshes(clock: Arc<dyn Clock>) {
    let original = entry("week-3", date(2026, 1, 15), 4);
    let id = original.id();
    let mut repo = MockTimesheetRepository::new();
    repo.expect_find_entry()
        .with(eq(id))
        .return_once(move |_| Ok(Some(original)));
    repo.expect_find_week().return_once(|_| {
        Ok(Some(week(
            "week-3",
            date(2026, 1, 15),
            date(2026, 1, 19),
            TimesheetStatus::Incomplete,
        )))
    });
    repo.expect_update_entry()
        .withf(|updated| updated.hours().centis() == 2400)
        .times(1)
        .return_once(|_| Ok(Some(TimesheetStatus::Completed)));
    let service = make_service(repo, clock);

    let patch = EntryPatch {
        hours: Some(Hours::new(24).expect("hours")),
        ..EntryPatch::default()
    };
    let updated = service.update_entry(&id, patch).await.expect("updated");
    assert_eq!(updated.id(), id);
    assert_eq!(updated.project_name().as_ref(), "Website Redesign");
}

#[rstest]
#[tokio::test]
async fn delete_last_entry_marks_week_missing(clock: Arc<dyn Clock>) {
    let removed = entry("week-2", date(2026, 1, 8), 8);
    let id = removed.id();
    let mut repo = MockTimesheetRepository::new();
    repo.expect_delete_entry()
        .with(eq(id))
        .times(1)
        .return_once(move |_| {
            Ok(Some(RemovedEntry {
                entry: removed,
                status: TimesheetStatus::Missing,
            }))
        });
    repo.expect_refresh_week_status().never();
    let service = make_service(repo, clock);

    service.delete_entry(&id).await.expect("entry deleted");
}

#[rstest]
#[tokio::test]
async fn delete_unknown_entry_is_not_found(clock: Arc<dyn Clock>) {
    let mut repo = MockTimesheetRepository::new();
    repo.expect_delete_entry().return_once(|_| Ok(None));
    let service = make_service(repo, clock);

    let err = service
        .delete_entry(&EntryId::random())
        .await
        .expect_err("unknown entry");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(TimesheetRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(TimesheetRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_errors_map_to_domain_codes(
    clock: Arc<dyn Clock>,
    #[case] failure: TimesheetRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockTimesheetRepository::new();
    repo.expect_list_weeks().return_once(move || Err(failure));
    let service = make_service(repo, clock);

    let err = service
        .list_weeks(&WeekFilter::default())
        .await
        .expect_err("repository failure");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn reconcile_counts_corrected_weeks(clock: Arc<dyn Clock>) {
    let mut repo = MockTimesheetRepository::new();
    repo.expect_list_weeks().return_once(|| {
        Ok(vec![
            week("week-0", date(2025, 12, 22), date(2025, 12, 26), TimesheetStatus::Completed),
            week("week-5", date(2026, 1, 29), date(2026, 2, 2), TimesheetStatus::Missing),
        ])
    });
    repo.expect_refresh_week_status()
        .with(eq(week_id("week-0")))
        .times(1)
        .return_once(|_| Ok(Some(TimesheetStatus::Incomplete)));
    repo.expect_refresh_week_status()
        .with(eq(week_id("week-5")))
        .times(1)
        .return_once(|_| Ok(Some(TimesheetStatus::Missing)));
    let service = make_service(repo, clock);

    let changed = service.reconcile_statuses().await.expect("reconciled");
    assert_eq!(changed, 1);
}

#[rstest]
#[tokio::test]
async fn empty_patch_returns_the_stored_entry(clock: Arc<dyn Clock>) {
    let stored = entry("week-3", date(2026, 1, 15), 4);
    let id = stored.id();
    let expected = stored.clone();
    let mut repo = MockTimesheetRepository::new();
    repo.expect_find_entry()
        .with(eq(id))
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    repo.expect_find_week().never();
    repo.expect_update_entry().never();
    let service = make_service(repo, clock);

    let unchanged = service
        .update_entry(&id, EntryPatch::default())
        .await
        .expect("empty patch succeeds");
    assert_eq!(unchanged, expected);
}
