use anyhow::Result;
use rapport::domain::ReportGranularity;
use rapport::ports::Backend;

use crate::app::App;

use super::action_queue::Action;

pub(super) async fn run_action<B: Backend>(action: Action, app: &mut App, client: &B) -> Result<()> {
    match action {
        Action::LoadReport => {
            load_report(app, client).await;
        }
        Action::RefreshReportBackground => {
            refresh_report_background(app, client).await;
        }
        Action::CommitCell { key } => {
            commit_cell(key, app, client).await;
        }
        Action::LoadAccounts => {
            let status = active_only(app.accounts.show_inactive);
            match client.fetch_accounts(status).await {
                Ok(rows) => app.accounts.set_rows(rows),
                Err(e) => app.set_status(format!("Error loading accounts: {}", e)),
            }
        }
        Action::LoadTasks => {
            let status = active_only(app.tasks.show_inactive);
            match client.fetch_tasks(status).await {
                Ok(rows) => app.tasks.set_rows(rows),
                Err(e) => app.set_status(format!("Error loading tasks: {}", e)),
            }
        }
        Action::LoadUsers => {
            let status = active_only(app.users.show_inactive);
            match client.fetch_users(status).await {
                Ok(rows) => app.users.set_rows(rows),
                Err(e) => app.set_status(format!("Error loading users: {}", e)),
            }
        }
        Action::LoadSpecialDays => {
            let (from, to) = ReportGranularity::Year.period(app.anchor);
            match client.fetch_special_days(from, to).await {
                Ok(rows) => app.special_days.set_rows(rows),
                Err(e) => app.set_status(format!("Error loading special days: {}", e)),
            }
        }
    }
    Ok(())
}

fn active_only(show_inactive: bool) -> Option<rapport::domain::ActivationStatus> {
    if show_inactive {
        None
    } else {
        Some(rapport::domain::ActivationStatus::Active)
    }
}

pub(super) async fn load_report<B: Backend>(app: &mut App, client: &B) {
    app.is_loading = true;
    match client
        .fetch_report(app.granularity, Some(app.anchor))
        .await
    {
        Ok(report) => {
            app.apply_report(report);
            app.clear_status();
        }
        Err(e) => {
            app.set_status(format!("Error loading report: {}", e));
        }
    }
    app.is_loading = false;
}

/// Periodic re-fetch. Skipped while a cell is being typed in; failures are
/// silent so a flaky connection does not spam the status line.
async fn refresh_report_background<B: Backend>(app: &mut App, client: &B) {
    if app.grid.editing {
        return;
    }
    if let Ok(report) = client
        .fetch_report(app.granularity, Some(app.anchor))
        .await
    {
        app.apply_report(report);
    }
}

/// Blur commit for one cell: run the editor's validated persist, then merge
/// the acknowledged entry into the report tree. A failed commit keeps the
/// editor (and its unsaved value) in place.
async fn commit_cell<B: Backend>(key: crate::app::CellKey, app: &mut App, client: &B) {
    let Some(editor) = app.grid.editors.get_mut(&key) else {
        return;
    };
    let saved = editor.commit(client, &mut app.status).await;

    if let Some(saved) = saved {
        if let Some(report) = app.report.as_mut() {
            report.apply_saved_entry(&saved);
        }
        app.grid.editors.remove(&key);
        app.set_status("Saved");
    }
}
