use crossterm::event::KeyEvent;

use crate::app::{App, View};

use super::action_queue::{Action, ActionTx};

mod grid;
mod lists;

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match app.current_view {
        View::Grid => grid::handle_grid_key(key, app, action_tx),
        _ => lists::handle_list_key(key, app, action_tx),
    }
}

pub(super) fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

/// Switch views, lazily loading a register list on first visit. Leaving the
/// grid mid-edit blurs the cell first.
pub(super) fn switch_view(app: &mut App, action_tx: &ActionTx, view: View) {
    if app.current_view == View::Grid {
        if let Some(key) = app.end_cell_edit() {
            enqueue_action(action_tx, Action::CommitCell { key });
        }
    }
    app.navigate_to(view);
    let load = match view {
        View::Grid => None,
        View::Accounts => (!app.accounts.loaded).then_some(Action::LoadAccounts),
        View::Tasks => (!app.tasks.loaded).then_some(Action::LoadTasks),
        View::Users => (!app.users.loaded).then_some(Action::LoadUsers),
        View::SpecialDays => (!app.special_days.loaded).then_some(Action::LoadSpecialDays),
    };
    if let Some(action) = load {
        enqueue_action(action_tx, action);
    }
}
