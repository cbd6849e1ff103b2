//! Shared fixtures for unit tests.

use chrono::NaiveDate;
use rapport::domain::{
    Account, ActivationStatus, Day, TaskRef, TimeEntry, TimeReportTask, UserReport,
};

use crate::app::App;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
}

fn account(id: &str, name: &str) -> Account {
    Account {
        id: id.to_string(),
        name: name.to_string(),
        status: ActivationStatus::Active,
    }
}

fn row(contributor: &str, task_name: &str, closed: bool, days: &[Day]) -> TimeReportTask {
    TimeReportTask {
        task: TaskRef {
            id: format!("task-{contributor}"),
            name: task_name.to_string(),
            account: account("acc-1", "Acme Industries"),
        },
        task_contributor_id: contributor.to_string(),
        entries: days
            .iter()
            .map(|day| TimeEntry {
                id: None,
                task_contributor_id: contributor.to_string(),
                day: day.clone(),
                hours: None,
                closed,
            })
            .collect(),
    }
}

/// Week of 2026-08-03 with two task rows; the second row's period is
/// closed.
pub fn sample_report() -> UserReport {
    let days: Vec<Day> = (3..=9)
        .map(|d| {
            let date = date(d);
            Day {
                date,
                weekend: d >= 8,
                major_holiday: false,
                half_day: false,
            }
        })
        .collect();

    let tasks = vec![
        row("tc-1", "Backend Development", false, &days),
        row("tc-2", "Code Review", true, &days),
    ];

    UserReport { days, tasks }
}

pub fn app_with_report() -> App {
    let mut app = App::new(date(5));
    app.apply_report(sample_report());
    app
}

pub fn app_with_accounts() -> App {
    let mut app = App::new(date(5));
    app.navigate_to(crate::app::View::Accounts);
    app.accounts.set_rows(vec![
        account("acc-1", "Acme Industries"),
        account("acc-2", "Globex"),
        Account {
            id: "acc-3".into(),
            name: "Initech".into(),
            status: ActivationStatus::Inactive,
        },
    ]);
    app
}
