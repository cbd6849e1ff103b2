//! In-memory backend for development and tests: fixture data, no server.
//!
//! Implements the same ports as [`crate::RapportClient`], so the TUI's `dev`
//! subcommand and the test suites can run the full fetch/edit/persist loop
//! offline. Persisted values survive re-fetches within the process.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::{
    Account, ActivationStatus, Day, ReportGranularity, SpecialDay, SpecialDayKind, Task, TaskRef,
    TimeEntry, TimeReportTask, User, UserReport,
};
use crate::ports::{
    EntryStore, FetchError, PersistError, ReportSource, SavedEntry,
};

pub struct DevStore {
    today: NaiveDate,
    /// Periods before this date are closed.
    closed_before: NaiveDate,
    /// (contributor, date) → (assigned id, hours).
    saved: Mutex<HashMap<(String, NaiveDate), (String, Option<f64>)>>,
    next_id: Mutex<u32>,
}

impl DevStore {
    pub fn new(today: NaiveDate) -> Self {
        let closed_before = ReportGranularity::Month
            .period(today)
            .0;
        Self {
            today,
            closed_before,
            saved: Mutex::new(HashMap::new()),
            next_id: Mutex::new(0),
        }
    }

    fn accounts() -> Vec<Account> {
        let account = |id: &str, name: &str, status| Account {
            id: id.to_string(),
            name: name.to_string(),
            status,
        };
        vec![
            account("acc-1", "Acme Industries", ActivationStatus::Active),
            account("acc-2", "Globex", ActivationStatus::Active),
            account("acc-3", "Initech", ActivationStatus::Inactive),
        ]
    }

    fn tasks() -> Vec<Task> {
        let accounts = Self::accounts();
        let task = |id: &str, name: &str, account: &Account, status| Task {
            id: id.to_string(),
            name: name.to_string(),
            account: account.clone(),
            status,
        };
        vec![
            task("task-1", "Backend Development", &accounts[0], ActivationStatus::Active),
            task("task-2", "Code Review", &accounts[0], ActivationStatus::Active),
            task("task-3", "Support", &accounts[1], ActivationStatus::Active),
            task("task-4", "Data Migration", &accounts[2], ActivationStatus::Inactive),
        ]
    }

    fn users() -> Vec<User> {
        let user = |id: &str, name: &str, email: Option<&str>, status| User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.map(str::to_string),
            status,
        };
        vec![
            user("user-1", "Dev User", Some("dev@localhost"), ActivationStatus::Active),
            user("user-2", "Maja Lind", Some("maja@example.com"), ActivationStatus::Active),
            user("user-3", "Nils Borg", None, ActivationStatus::Inactive),
        ]
    }

    fn special_days(&self) -> Vec<SpecialDay> {
        let year = self.today.year();
        let day = |m: u32, d: u32, name: &str, kind| SpecialDay {
            date: NaiveDate::from_ymd_opt(year, m, d).expect("fixture date"),
            name: name.to_string(),
            kind,
        };
        vec![
            day(1, 1, "New Year's Day", SpecialDayKind::MajorHoliday),
            day(1, 5, "Twelfth Night", SpecialDayKind::HalfDay),
            day(6, 19, "Midsummer Eve", SpecialDayKind::MajorHoliday),
            day(12, 24, "Christmas Eve", SpecialDayKind::MajorHoliday),
            day(12, 31, "New Year's Eve", SpecialDayKind::HalfDay),
        ]
    }

    fn day_for(&self, date: NaiveDate) -> Day {
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let special = self
            .special_days()
            .into_iter()
            .find(|s| s.date == date)
            .map(|s| s.kind);
        Day {
            date,
            weekend,
            major_holiday: special == Some(SpecialDayKind::MajorHoliday),
            half_day: special == Some(SpecialDayKind::HalfDay),
        }
    }

    /// Fixture rows: the active tasks, contributor ids derived from the
    /// task ids.
    fn rows(&self, days: &[Day]) -> Vec<TimeReportTask> {
        let saved = self.saved.lock().unwrap();
        Self::tasks()
            .into_iter()
            .filter(|t| t.status == ActivationStatus::Active)
            .map(|task| {
                let contributor = format!("tc-{}", task.id);
                let entries = days
                    .iter()
                    .map(|day| {
                        let key = (contributor.clone(), day.date);
                        let (id, hours) = match saved.get(&key) {
                            Some((id, hours)) => (Some(id.clone()), *hours),
                            None => (None, None),
                        };
                        TimeEntry {
                            id,
                            task_contributor_id: contributor.clone(),
                            day: day.clone(),
                            hours,
                            closed: day.date < self.closed_before,
                        }
                    })
                    .collect();
                TimeReportTask {
                    task: TaskRef {
                        id: task.id,
                        name: task.name,
                        account: task.account,
                    },
                    task_contributor_id: contributor,
                    entries,
                }
            })
            .collect()
    }

    fn filtered<T>(rows: Vec<T>, status: Option<ActivationStatus>, get: fn(&T) -> ActivationStatus) -> Vec<T> {
        match status {
            Some(status) => rows.into_iter().filter(|r| get(r) == status).collect(),
            None => rows,
        }
    }
}

#[async_trait]
impl ReportSource for DevStore {
    async fn fetch_report(
        &self,
        granularity: ReportGranularity,
        anchor: Option<NaiveDate>,
    ) -> Result<UserReport, FetchError> {
        let (start, end) = granularity.period(anchor.unwrap_or(self.today));
        let days: Vec<Day> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| self.day_for(d))
            .collect();
        let tasks = self.rows(&days);
        Ok(UserReport { days, tasks })
    }

    async fn fetch_accounts(
        &self,
        status: Option<ActivationStatus>,
    ) -> Result<Vec<Account>, FetchError> {
        Ok(Self::filtered(Self::accounts(), status, |a| a.status))
    }

    async fn fetch_tasks(&self, status: Option<ActivationStatus>) -> Result<Vec<Task>, FetchError> {
        Ok(Self::filtered(Self::tasks(), status, |t| t.status))
    }

    async fn fetch_users(&self, status: Option<ActivationStatus>) -> Result<Vec<User>, FetchError> {
        Ok(Self::filtered(Self::users(), status, |u| u.status))
    }

    async fn fetch_special_days(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SpecialDay>, FetchError> {
        Ok(self
            .special_days()
            .into_iter()
            .filter(|s| s.date >= from && s.date <= to)
            .collect())
    }
}

#[async_trait]
impl EntryStore for DevStore {
    async fn save_entry(&self, entry: &TimeEntry) -> Result<SavedEntry, PersistError> {
        let id = match &entry.id {
            Some(id) => id.clone(),
            None => {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                format!("dev-{next}")
            }
        };
        self.saved.lock().unwrap().insert(
            (entry.task_contributor_id.clone(), entry.day.date),
            (id.clone(), entry.hours),
        );
        Ok(SavedEntry { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> DevStore {
        DevStore::new(NaiveDate::from_ymd_opt(2026, 8, 5).unwrap())
    }

    #[tokio::test]
    async fn week_report_has_one_entry_per_day_per_row() {
        let report = store()
            .fetch_report(ReportGranularity::Week, None)
            .await
            .unwrap();
        assert_eq!(report.days.len(), 7);
        assert!(report.days.iter().filter(|d| d.weekend).count() == 2);
        for row in &report.tasks {
            assert_eq!(row.entries.len(), 7);
        }
    }

    #[tokio::test]
    async fn saved_hours_survive_a_refetch() {
        let store = store();
        let mut report = store
            .fetch_report(ReportGranularity::Week, None)
            .await
            .unwrap();

        let mut entry = report.tasks[0].entries[0].clone();
        entry.hours = Some(6.0);
        let saved = store.save_entry(&entry).await.unwrap();
        entry.id = Some(saved.id.clone());
        report.apply_saved_entry(&entry);

        let refetched = store
            .fetch_report(ReportGranularity::Week, None)
            .await
            .unwrap();
        assert_eq!(refetched.tasks[0].entries[0].hours, Some(6.0));
        assert_eq!(refetched.tasks[0].entries[0].id, Some(saved.id));
    }

    #[tokio::test]
    async fn previous_month_is_closed() {
        let store = store();
        let july = NaiveDate::from_ymd_opt(2026, 7, 15).unwrap();
        let report = store
            .fetch_report(ReportGranularity::Week, Some(july))
            .await
            .unwrap();
        assert!(report.tasks[0].entries.iter().all(|e| e.closed));
    }

    #[tokio::test]
    async fn inactive_rows_are_filtered_by_default_status() {
        let store = store();
        let active = store
            .fetch_tasks(Some(ActivationStatus::Active))
            .await
            .unwrap();
        let all = store.fetch_tasks(None).await.unwrap();
        assert!(active.len() < all.len());
        assert!(active.iter().all(|t| t.status == ActivationStatus::Active));
    }
}
