use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, DisplayName, EntityList, View};
use rapport::sort::SortKey;

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, switch_view};

/// What a list-local key did: handled in place, needs a refetch (status
/// toggle), or was not a list key at all.
enum ListOutcome {
    Handled,
    Reload,
    Unhandled,
}

pub(super) fn handle_list_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let (outcome, reload) = match app.current_view {
        View::Accounts => (
            entity_keys(key, &mut app.accounts, &crate::app::ACCOUNT_COLUMNS),
            Action::LoadAccounts,
        ),
        View::Tasks => (
            entity_keys(key, &mut app.tasks, &crate::app::TASK_COLUMNS),
            Action::LoadTasks,
        ),
        View::Users => (
            entity_keys(key, &mut app.users, &crate::app::USER_COLUMNS),
            Action::LoadUsers,
        ),
        View::SpecialDays => (
            entity_keys(key, &mut app.special_days, &crate::app::SPECIAL_DAY_COLUMNS),
            Action::LoadSpecialDays,
        ),
        View::Grid => return,
    };

    match outcome {
        ListOutcome::Handled => {}
        ListOutcome::Reload => enqueue_action(action_tx, reload),
        ListOutcome::Unhandled => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
            KeyCode::Char('r') => enqueue_action(action_tx, reload),
            KeyCode::Tab => {
                let next = app.current_view.next();
                switch_view(app, action_tx, next);
            }
            KeyCode::BackTab => {
                let previous = app.current_view.previous();
                switch_view(app, action_tx, previous);
            }
            _ => {}
        },
    }
}

fn entity_keys<R, F>(
    key: KeyEvent,
    list: &mut EntityList<R, F>,
    columns: &[(&str, F)],
) -> ListOutcome
where
    R: SortKey<Field = F> + Clone + DisplayName,
    F: Copy + Eq,
{
    if list.filter_focused {
        match key.code {
            KeyCode::Esc => {
                list.filter.clear();
                list.filter_focused = false;
            }
            KeyCode::Enter => list.filter_focused = false,
            KeyCode::Char(c) => list.filter.insert(c),
            KeyCode::Backspace => list.filter.backspace(),
            _ => return ListOutcome::Unhandled,
        }
        return ListOutcome::Handled;
    }

    match key.code {
        KeyCode::Char('/') => {
            list.filter_focused = true;
            ListOutcome::Handled
        }
        KeyCode::Char('i') => {
            list.show_inactive = !list.show_inactive;
            ListOutcome::Reload
        }
        KeyCode::Down | KeyCode::Char('j') => {
            list.select_next();
            ListOutcome::Handled
        }
        KeyCode::Up | KeyCode::Char('k') => {
            list.select_previous();
            ListOutcome::Handled
        }
        // Number keys request a sort on the matching column.
        KeyCode::Char(c @ '1'..='9') => {
            let idx = (c as u8 - b'1') as usize;
            if let Some((_, field)) = columns.get(idx) {
                list.request_sort(*field);
            }
            ListOutcome::Handled
        }
        _ => ListOutcome::Unhandled,
    }
}
