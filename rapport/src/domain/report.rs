use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Account, Day};

/// View granularity of a fetched report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportGranularity {
    Week,
    Month,
    Year,
}

impl ReportGranularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportGranularity::Week => "WEEK",
            ReportGranularity::Month => "MONTH",
            ReportGranularity::Year => "YEAR",
        }
    }

    /// Inclusive date range of the period containing `anchor`. Weeks start
    /// on Monday.
    pub fn period(&self, anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
        use chrono::{Datelike, Duration, Months};
        match self {
            ReportGranularity::Week => {
                let start = anchor
                    - Duration::days(anchor.weekday().num_days_from_monday() as i64);
                (start, start + Duration::days(6))
            }
            ReportGranularity::Month => {
                let start = anchor.with_day(1).expect("day 1 is always valid");
                let end = start
                    .checked_add_months(Months::new(1))
                    .map(|next| next - Duration::days(1))
                    .unwrap_or(start);
                (start, end)
            }
            ReportGranularity::Year => {
                let start = NaiveDate::from_ymd_opt(anchor.year(), 1, 1).expect("jan 1");
                let end = NaiveDate::from_ymd_opt(anchor.year(), 12, 31).expect("dec 31");
                (start, end)
            }
        }
    }

    /// Start date of the period `delta` steps away from `anchor`'s period.
    pub fn step(&self, anchor: NaiveDate, delta: i32) -> NaiveDate {
        use chrono::{Duration, Months};
        let (start, _) = self.period(anchor);
        match self {
            ReportGranularity::Week => start + Duration::days(7 * delta as i64),
            ReportGranularity::Month => {
                if delta >= 0 {
                    start
                        .checked_add_months(Months::new(delta as u32))
                        .unwrap_or(start)
                } else {
                    start
                        .checked_sub_months(Months::new(delta.unsigned_abs()))
                        .unwrap_or(start)
                }
            }
            ReportGranularity::Year => {
                use chrono::Datelike;
                NaiveDate::from_ymd_opt(start.year() + delta, 1, 1).unwrap_or(start)
            }
        }
    }
}

/// One (contributor, task, calendar day) cell of the report matrix.
///
/// Entries exist for every day of the fetched period, empty placeholders
/// included. They are never deleted client-side; clearing a value is itself
/// an update to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    /// Absent until the first successful persist; assigned server-side.
    pub id: Option<String>,
    pub task_contributor_id: String,
    pub day: Day,
    /// Hours in [0, 24]; `None` means "empty".
    #[serde(default, rename = "time", with = "hours_serde")]
    pub hours: Option<f64>,
    /// The owning period has been administratively closed; closed entries
    /// are read-only regardless of any other state.
    pub closed: bool,
}

/// Row-level grouping of the entries for one task within one user's report.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeReportTask {
    pub task: TaskRef,
    pub task_contributor_id: String,
    pub entries: Vec<TimeEntry>,
}

impl TimeReportTask {
    pub fn total_hours(&self) -> f64 {
        self.entries.iter().filter_map(|e| e.hours).sum()
    }
}

/// Task descriptor as embedded in report rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRef {
    pub id: String,
    pub name: String,
    pub account: Account,
}

/// A user's report over one period: the day axis plus one row per task
/// assignment, each row's entries aligned with the day axis.
///
/// The report tree is owned exclusively by the fetching view; it is only
/// ever mutated through [`UserReport::apply_saved_entry`].
#[derive(Debug, Clone, PartialEq)]
pub struct UserReport {
    pub days: Vec<Day>,
    pub tasks: Vec<TimeReportTask>,
}

impl UserReport {
    /// Merge a successfully persisted entry back into the matrix.
    ///
    /// Matches on `(task_contributor_id, day date)`, never on position: the
    /// matrix may have been refreshed independently since the commit
    /// started. An unmatched update is dropped.
    pub fn apply_saved_entry(&mut self, saved: &TimeEntry) -> bool {
        let Some(row) = self
            .tasks
            .iter_mut()
            .find(|r| r.task_contributor_id == saved.task_contributor_id)
        else {
            tracing::debug!(
                contributor = %saved.task_contributor_id,
                "merge target row not found, dropping update"
            );
            return false;
        };
        let Some(entry) = row
            .entries
            .iter_mut()
            .find(|e| e.day.date == saved.day.date)
        else {
            tracing::debug!(
                contributor = %saved.task_contributor_id,
                date = %saved.day.date,
                "merge target day not found, dropping update"
            );
            return false;
        };
        entry.id = saved.id.clone();
        entry.hours = saved.hours;
        true
    }

    /// Sum of all rows at one day column.
    pub fn day_total(&self, day_idx: usize) -> f64 {
        self.tasks
            .iter()
            .filter_map(|r| r.entries.get(day_idx).and_then(|e| e.hours))
            .sum()
    }

    pub fn total_hours(&self) -> f64 {
        self.tasks.iter().map(|r| r.total_hours()).sum()
    }
}

// Raw types, as returned by the rapport backend API.

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReport {
    pub days: Vec<RawDay>,
    pub time_report_tasks: Vec<RawTimeReportTask>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDay {
    pub date: String,
    #[serde(default)]
    pub weekend: bool,
    #[serde(default)]
    pub major_holiday: bool,
    #[serde(default)]
    pub half_day: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTimeReportTask {
    pub task: TaskRef,
    pub task_contributor_id: String,
    pub time_entries: Vec<RawTimeEntry>,
}

/// Wire entries carry no day of their own; they are aligned positionally
/// with the report's `days` array.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTimeEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "time", with = "hours_serde")]
    pub hours: Option<f64>,
    #[serde(default)]
    pub closed: bool,
}

impl From<RawDay> for Day {
    fn from(raw: RawDay) -> Self {
        Day {
            date: NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d").unwrap_or_default(),
            weekend: raw.weekend,
            major_holiday: raw.major_holiday,
            half_day: raw.half_day,
        }
    }
}

impl From<RawReport> for UserReport {
    /// Resolves the positional day/entry alignment into self-describing
    /// entries. Short rows are padded with empty placeholders so every row
    /// covers the full day axis; surplus entries are dropped.
    fn from(raw: RawReport) -> Self {
        let days: Vec<Day> = raw.days.into_iter().map(Day::from).collect();

        let tasks = raw
            .time_report_tasks
            .into_iter()
            .map(|row| {
                let mut raw_entries = row.time_entries.into_iter();
                let entries = days
                    .iter()
                    .map(|day| match raw_entries.next() {
                        Some(raw_entry) => TimeEntry {
                            id: raw_entry.id,
                            task_contributor_id: row.task_contributor_id.clone(),
                            day: day.clone(),
                            hours: raw_entry.hours,
                            closed: raw_entry.closed,
                        },
                        None => TimeEntry {
                            id: None,
                            task_contributor_id: row.task_contributor_id.clone(),
                            day: day.clone(),
                            hours: None,
                            closed: false,
                        },
                    })
                    .collect();
                TimeReportTask {
                    task: row.task,
                    task_contributor_id: row.task_contributor_id,
                    entries,
                }
            })
            .collect();

        UserReport { days, tasks }
    }
}

/// The backend serializes hours either as a JSON number or as a string;
/// both map to `Option<f64>`, with blank strings meaning "empty".
mod hours_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawHours {
        Num(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawHours>::deserialize(deserializer)?;
        Ok(match raw {
            None => None,
            Some(RawHours::Num(n)) => Some(n),
            Some(RawHours::Text(s)) if s.trim().is_empty() => None,
            Some(RawHours::Text(s)) => s.trim().parse().ok(),
        })
    }

    pub fn serialize<S>(hours: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match hours {
            Some(n) => serializer.serialize_f64(*n),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ActivationStatus;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn entry(contributor: &str, d: u32, hours: Option<f64>) -> TimeEntry {
        TimeEntry {
            id: None,
            task_contributor_id: contributor.to_string(),
            day: Day::plain(date(d)),
            hours,
            closed: false,
        }
    }

    fn task_ref(id: &str, name: &str) -> TaskRef {
        TaskRef {
            id: id.to_string(),
            name: name.to_string(),
            account: Account {
                id: "a1".into(),
                name: "Acme Industries".into(),
                status: ActivationStatus::Active,
            },
        }
    }

    fn two_row_report() -> UserReport {
        let days = vec![Day::plain(date(3)), Day::plain(date(4))];
        let row = |contributor: &str| TimeReportTask {
            task: task_ref("t1", "Development"),
            task_contributor_id: contributor.to_string(),
            entries: vec![entry(contributor, 3, Some(4.0)), entry(contributor, 4, None)],
        };
        UserReport {
            days,
            tasks: vec![row("tc-1"), row("tc-2")],
        }
    }

    #[test]
    fn merge_matches_on_contributor_and_date() {
        let mut report = two_row_report();
        let mut saved = entry("tc-2", 4, Some(6.5));
        saved.id = Some("srv-9".into());

        assert!(report.apply_saved_entry(&saved));

        // Same date on the other contributor row is untouched.
        assert_eq!(report.tasks[0].entries[1].hours, None);
        assert_eq!(report.tasks[0].entries[1].id, None);
        assert_eq!(report.tasks[1].entries[1].hours, Some(6.5));
        assert_eq!(report.tasks[1].entries[1].id.as_deref(), Some("srv-9"));
    }

    #[test]
    fn merge_without_target_is_dropped() {
        let mut report = two_row_report();
        let before = report.clone();

        assert!(!report.apply_saved_entry(&entry("tc-404", 3, Some(1.0))));
        assert!(!report.apply_saved_entry(&entry("tc-1", 28, Some(1.0))));
        assert_eq!(report, before);
    }

    #[test]
    fn totals_ignore_empty_cells() {
        let report = two_row_report();
        assert_eq!(report.day_total(0), 8.0);
        assert_eq!(report.day_total(1), 0.0);
        assert_eq!(report.tasks[0].total_hours(), 4.0);
        assert_eq!(report.total_hours(), 8.0);
    }

    #[test]
    fn raw_report_resolves_positional_alignment() {
        let raw: RawReport = serde_json::from_value(serde_json::json!({
            "days": [
                {"date": "2026-08-03"},
                {"date": "2026-08-04", "majorHoliday": true},
                {"date": "2026-08-08", "weekend": true}
            ],
            "timeReportTasks": [{
                "task": {
                    "id": "t1",
                    "name": "Development",
                    "account": {"id": "a1", "name": "Acme Industries", "status": "ACTIVE"}
                },
                "taskContributorId": "tc-1",
                "timeEntries": [
                    {"id": "e1", "time": "7.5", "closed": true},
                    {"time": 8}
                ]
            }]
        }))
        .unwrap();

        let report = UserReport::from(raw);
        assert_eq!(report.days.len(), 3);
        assert!(report.days[1].major_holiday);

        let row = &report.tasks[0];
        assert_eq!(row.entries.len(), 3, "short rows are padded to the day axis");
        assert_eq!(row.entries[0].hours, Some(7.5));
        assert!(row.entries[0].closed);
        assert_eq!(row.entries[0].day.date, date(3));
        assert_eq!(row.entries[1].hours, Some(8.0));
        assert_eq!(row.entries[2].hours, None);
        assert_eq!(row.entries[2].task_contributor_id, "tc-1");
    }

    #[test]
    fn periods_and_steps_line_up() {
        // 2026-08-05 is a Wednesday.
        let anchor = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();

        let (start, end) = ReportGranularity::Week.period(anchor);
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 8, 3).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 8, 9).unwrap());
        assert_eq!(
            ReportGranularity::Week.step(anchor, -1),
            NaiveDate::from_ymd_opt(2026, 7, 27).unwrap()
        );

        let (start, end) = ReportGranularity::Month.period(anchor);
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 8, 31).unwrap());
        assert_eq!(
            ReportGranularity::Month.step(anchor, 1),
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
        );

        let (start, end) = ReportGranularity::Year.period(anchor);
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn hours_accept_number_or_string_on_the_wire() {
        let entry: TimeEntry = serde_json::from_value(serde_json::json!({
            "taskContributorId": "tc-1",
            "day": {"date": "2026-08-03", "weekend": false, "majorHoliday": false, "halfDay": false},
            "time": "8.25",
            "closed": false
        }))
        .unwrap();
        assert_eq!(entry.hours, Some(8.25));

        let cleared: TimeEntry = serde_json::from_value(serde_json::json!({
            "taskContributorId": "tc-1",
            "day": {"date": "2026-08-03", "weekend": false, "majorHoliday": false, "halfDay": false},
            "time": null,
            "closed": false
        }))
        .unwrap();
        assert_eq!(cleared.hours, None);
    }
}
