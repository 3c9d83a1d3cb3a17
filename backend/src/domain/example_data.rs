//! Demo dataset and seeding orchestration.
//!
//! The dataset mirrors the sample timesheets the product ships with: two
//! users sharing the password `password123`, six weeks spanning December 2025
//! and January 2026, and the entries logged against them. Week statuses are
//! derived from the entries rather than taken on trust.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    DemoDataRepository, DemoDataRepositoryError, SeedingResult, UserCredentials,
};
use crate::domain::{
    Description, EntryDraft, EntryId, Hours, PasswordDigest, PasswordDigestError, ProjectName,
    TimesheetEntry, TimesheetValidationError, TimesheetWeek, TotalHours, User,
    UserValidationError, WeekId, WorkType, derive_status,
};

/// Password shared by every demo user.
pub const DEMO_PASSWORD: &str = "password123";

const USERS: [(&str, &str, &str, &str); 2] = [
    (
        "00000000-0000-4000-8000-000000000001",
        "Shubham Pawar",
        "shubham@gmail.com",
        "https://ui-avatars.com/api/?name=Shubham+Pawar&background=2563EB&color=fff",
    ),
    (
        "00000000-0000-4000-8000-000000000002",
        "Test User",
        "test@gmail.com",
        "https://ui-avatars.com/api/?name=Test+User&background=random",
    ),
];

type Ymd = (i32, u32, u32);

const WEEKS: [(&str, u8, Ymd, Ymd); 6] = [
    ("week-1", 1, (2026, 1, 1), (2026, 1, 5)),
    ("week-2", 2, (2026, 1, 8), (2026, 1, 12)),
    ("week-3", 3, (2026, 1, 15), (2026, 1, 19)),
    ("week-4", 4, (2026, 1, 22), (2026, 1, 26)),
    ("week-5", 5, (2026, 1, 29), (2026, 2, 2)),
    ("week-0", 52, (2025, 12, 22), (2025, 12, 26)),
];

struct EntrySeed {
    week: &'static str,
    date: Ymd,
    project: &'static str,
    work_type: &'static str,
    description: &'static str,
    hours: u8,
}

const fn seed(
    week: &'static str,
    date: Ymd,
    project: &'static str,
    work_type: &'static str,
    description: &'static str,
    hours: u8,
) -> EntrySeed {
    EntrySeed {
        week,
        date,
        project,
        work_type,
        description,
        hours,
    }
}

const LEGACY: &str = "Legacy Project";
const WEBSITE: &str = "Website Redesign";
const MOBILE: &str = "Mobile App";
const HOMEPAGE: &str = "Homepage Development";
const DEV: &str = "Development";

const ENTRIES: [EntrySeed; 25] = [
    seed("week-0", (2025, 12, 22), LEGACY, "Maintenance", "Bug fixing", 8),
    seed("week-0", (2025, 12, 23), LEGACY, "Maintenance", "Bug fixing", 8),
    seed("week-0", (2025, 12, 24), LEGACY, "Maintenance", "Bug fixing", 8),
    seed("week-0", (2025, 12, 25), LEGACY, "Maintenance", "Off", 0),
    seed("week-0", (2025, 12, 26), LEGACY, "Maintenance", "Bug fixing", 8),
    seed("week-1", (2026, 1, 1), WEBSITE, DEV, "Frontend implementation", 8),
    seed("week-1", (2026, 1, 2), WEBSITE, DEV, "Frontend implementation", 8),
    seed("week-1", (2026, 1, 3), WEBSITE, DEV, "Frontend implementation", 8),
    seed("week-1", (2026, 1, 4), WEBSITE, DEV, "Frontend implementation", 8),
    seed("week-1", (2026, 1, 5), WEBSITE, DEV, "Frontend implementation", 8),
    seed("week-2", (2026, 1, 8), MOBILE, "Design", "UI Design for Profile", 8),
    seed("week-2", (2026, 1, 9), MOBILE, "Design", "UI Design for Profile", 8),
    seed("week-2", (2026, 1, 10), MOBILE, "Design", "UI Design for Settings", 8),
    seed("week-2", (2026, 1, 11), MOBILE, "Design", "UI Design for Settings", 8),
    seed("week-2", (2026, 1, 12), MOBILE, "Design", "UI Design for Settings", 8),
    seed("week-3", (2026, 1, 15), HOMEPAGE, DEV, "Hero section", 4),
    seed("week-3", (2026, 1, 15), HOMEPAGE, DEV, "Hero section", 4),
    seed("week-3", (2026, 1, 16), HOMEPAGE, DEV, "Header navigation", 4),
    seed("week-3", (2026, 1, 16), HOMEPAGE, DEV, "Header navigation", 4),
    seed("week-3", (2026, 1, 18), HOMEPAGE, DEV, "Footer", 4),
    seed("week-4", (2026, 1, 22), HOMEPAGE, DEV, "Feature implementation", 8),
    seed("week-4", (2026, 1, 23), HOMEPAGE, DEV, "Feature implementation", 8),
    seed("week-4", (2026, 1, 24), HOMEPAGE, DEV, "Feature implementation", 8),
    seed("week-4", (2026, 1, 25), HOMEPAGE, DEV, "Feature implementation", 8),
    seed("week-4", (2026, 1, 26), HOMEPAGE, DEV, "Feature implementation", 8),
];

/// Base of the deterministic demo entry identifiers.
const ENTRY_ID_BASE: u128 = 0x0000_0000_0000_4000_8000_0001_0000_0000;

/// Errors raised while building or applying the demo dataset.
#[derive(Debug, Error)]
pub enum DemoDataError {
    /// A seeded user failed validation.
    #[error("demo user failed validation: {0}")]
    User(#[from] UserValidationError),
    /// A seeded week or entry failed validation.
    #[error("demo timesheet failed validation: {0}")]
    Timesheet(#[from] TimesheetValidationError),
    /// A seeded date does not exist in the calendar.
    #[error("demo date {year:04}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate {
        /// Year component.
        year: i32,
        /// Month component.
        month: u32,
        /// Day component.
        day: u32,
    },
    /// A demo password could not be hashed.
    #[error("demo password hashing failed: {0}")]
    Password(#[from] PasswordDigestError),
    /// The store rejected the dataset.
    #[error("demo data persistence error: {0}")]
    Persistence(#[from] DemoDataRepositoryError),
}

/// Users, weeks and entries loaded into a fresh store.
#[derive(Debug, Clone)]
pub struct DemoDataset {
    /// Users with their password digests.
    pub users: Vec<UserCredentials>,
    /// Weeks in store order, statuses derived from `entries`.
    pub weeks: Vec<TimesheetWeek>,
    /// Entries in insertion order.
    pub entries: Vec<TimesheetEntry>,
}

fn to_date((year, month, day): Ymd) -> Result<NaiveDate, DemoDataError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DemoDataError::InvalidDate { year, month, day })
}

impl DemoDataset {
    /// Build the demo dataset.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{DemoDataset, TimesheetStatus};
    ///
    /// let dataset = DemoDataset::build().expect("demo data is valid");
    /// let week_zero = dataset.weeks.iter().find(|w| w.id().as_ref() == "week-0").expect("week-0");
    /// assert_eq!(week_zero.status(), TimesheetStatus::Incomplete);
    /// ```
    pub fn build() -> Result<Self, DemoDataError> {
        let users = USERS
            .iter()
            .map(|(id, name, email, avatar)| {
                let user = User::try_from_strings(id, *name, email, Some(*avatar))?;
                let password = PasswordDigest::hash(DEMO_PASSWORD)?;
                Ok(UserCredentials { user, password })
            })
            .collect::<Result<Vec<_>, DemoDataError>>()?;

        let entries = ENTRIES
            .iter()
            .zip(0_u128..)
            .map(|(entry, index)| {
                let draft = EntryDraft {
                    date: to_date(entry.date)?,
                    project_name: ProjectName::new(entry.project)?,
                    work_type: WorkType::optional(entry.work_type)?,
                    description: Description::optional(entry.description)?,
                    hours: Hours::new(entry.hours)?,
                };
                Ok(TimesheetEntry::from_draft(
                    EntryId::from_uuid(Uuid::from_u128(ENTRY_ID_BASE + index + 1)),
                    WeekId::new(entry.week)?,
                    draft,
                ))
            })
            .collect::<Result<Vec<_>, DemoDataError>>()?;

        let weeks = WEEKS
            .iter()
            .map(|(id, number, start, end)| {
                let id = WeekId::new(*id)?;
                let total: TotalHours = entries
                    .iter()
                    .filter(|entry| entry.week_id() == &id)
                    .map(TimesheetEntry::hours)
                    .sum();
                let week = TimesheetWeek::new(id, *number, to_date(*start)?, to_date(*end)?)?;
                Ok(week.with_status(derive_status(total)))
            })
            .collect::<Result<Vec<_>, DemoDataError>>()?;

        Ok(Self {
            users,
            weeks,
            entries,
        })
    }
}

/// Applies the demo dataset through a [`DemoDataRepository`].
pub struct DemoDataSeeder<R> {
    repository: Arc<R>,
}

impl<R> DemoDataSeeder<R> {
    /// Create a seeder over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> DemoDataSeeder<R>
where
    R: DemoDataRepository,
{
    /// Build the dataset and apply it.
    ///
    /// # Errors
    ///
    /// Returns [`DemoDataError`] when the dataset fails validation or the
    /// store rejects it.
    pub async fn seed(&self) -> Result<SeedingResult, DemoDataError> {
        let dataset = DemoDataset::build()?;
        let result = self.repository.seed_demo_data(&dataset).await?;
        info!(
            ?result,
            users = dataset.users.len(),
            weeks = dataset.weeks.len(),
            entries = dataset.entries.len(),
            "demo data seeding finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimesheetStatus;
    use crate::domain::ports::MockDemoDataRepository;
    use rstest::{fixture, rstest};

    #[fixture]
    fn dataset() -> DemoDataset {
        DemoDataset::build().expect("demo data is valid")
    }

    #[rstest]
    #[case("week-0", TimesheetStatus::Incomplete, 32)]
    #[case("week-1", TimesheetStatus::Completed, 40)]
    #[case("week-2", TimesheetStatus::Completed, 40)]
    #[case("week-3", TimesheetStatus::Incomplete, 20)]
    #[case("week-4", TimesheetStatus::Completed, 40)]
    #[case("week-5", TimesheetStatus::Missing, 0)]
    fn seeded_statuses_follow_entries(
        dataset: DemoDataset,
        #[case] id: &str,
        #[case] status: TimesheetStatus,
        #[case] hours: u32,
    ) {
        let week = dataset
            .weeks
            .iter()
            .find(|week| week.id().as_ref() == id)
            .expect("week seeded");
        let total: TotalHours = dataset
            .entries
            .iter()
            .filter(|entry| entry.week_id() == week.id())
            .map(TimesheetEntry::hours)
            .sum();
        assert_eq!(week.status(), status);
        assert_eq!(total, TotalHours::new(hours));
    }

    #[rstest]
    fn every_entry_falls_inside_its_week(dataset: DemoDataset) {
        for entry in &dataset.entries {
            let week = dataset
                .weeks
                .iter()
                .find(|week| week.id() == entry.week_id())
                .expect("entry week exists");
            assert!(week.contains(entry.date()), "{} outside {}", entry.date(), week.id());
        }
    }

    #[rstest]
    fn demo_users_share_the_demo_password(dataset: DemoDataset) {
        assert_eq!(dataset.users.len(), 2);
        assert!(dataset.users.iter().all(|c| c.password.verify(DEMO_PASSWORD)));
    }

    #[rstest]
    fn entry_ids_are_unique(dataset: DemoDataset) {
        let mut ids: Vec<EntryId> = dataset.entries.iter().map(TimesheetEntry::id).collect();
        ids.sort_by_key(|id| *id.as_uuid());
        ids.dedup();
        assert_eq!(ids.len(), dataset.entries.len());
    }

    #[rstest]
    #[tokio::test]
    async fn seeder_reports_repository_outcome() {
        let mut repo = MockDemoDataRepository::new();
        repo.expect_seed_demo_data()
            .withf(|dataset| dataset.weeks.len() == 6 && dataset.entries.len() == 25)
            .times(1)
            .return_once(|_| Ok(SeedingResult::AlreadySeeded));

        let result = DemoDataSeeder::new(Arc::new(repo))
            .seed()
            .await
            .expect("seeding succeeds");
        assert_eq!(result, SeedingResult::AlreadySeeded);
    }

    #[rstest]
    #[tokio::test]
    async fn seeder_surfaces_persistence_failures() {
        let mut repo = MockDemoDataRepository::new();
        repo.expect_seed_demo_data()
            .return_once(|_| Err(DemoDataRepositoryError::query("constraint violated")));

        let err = DemoDataSeeder::new(Arc::new(repo))
            .seed()
            .await
            .expect_err("persistence failure");
        assert!(matches!(err, DemoDataError::Persistence(_)));
    }
}
