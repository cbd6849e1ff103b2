use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, switch_view};

pub(super) fn handle_grid_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    // Typing mode captures input before anything else.
    if app.grid.editing {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == ',' => {
                app.cell_input_char(c);
            }
            KeyCode::Backspace => app.cell_backspace(),
            // Enter/Esc blur the cell; the commit decides whether anything
            // is actually sent.
            KeyCode::Enter | KeyCode::Esc => blur(app, action_tx),
            KeyCode::Up => blur_and_move(app, action_tx, -1, 0),
            KeyCode::Down => blur_and_move(app, action_tx, 1, 0),
            KeyCode::Left => blur_and_move(app, action_tx, 0, -1),
            KeyCode::Right | KeyCode::Tab => blur_and_move(app, action_tx, 0, 1),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        KeyCode::Up | KeyCode::Char('k') => app.grid_move(-1, 0),
        KeyCode::Down | KeyCode::Char('j') => app.grid_move(1, 0),
        KeyCode::Left | KeyCode::Char('h') => app.grid_move(0, -1),
        KeyCode::Right | KeyCode::Char('l') => app.grid_move(0, 1),

        KeyCode::Enter => app.begin_cell_edit(),
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == ',' => {
            app.cell_input_char(c);
        }

        KeyCode::Char('g') => {
            app.cycle_granularity();
            enqueue_action(action_tx, Action::LoadReport);
        }
        KeyCode::Char('[') => {
            app.step_period(-1);
            enqueue_action(action_tx, Action::LoadReport);
        }
        KeyCode::Char(']') => {
            app.step_period(1);
            enqueue_action(action_tx, Action::LoadReport);
        }
        KeyCode::Char('t') => {
            app.anchor = app.today;
            enqueue_action(action_tx, Action::LoadReport);
        }
        KeyCode::Char('r') => enqueue_action(action_tx, Action::LoadReport),

        KeyCode::Tab => {
            let next = app.current_view.next();
            switch_view(app, action_tx, next);
        }
        KeyCode::BackTab => {
            let previous = app.current_view.previous();
            switch_view(app, action_tx, previous);
        }
        _ => {}
    }
}

fn blur(app: &mut App, action_tx: &ActionTx) {
    if let Some(key) = app.end_cell_edit() {
        enqueue_action(action_tx, Action::CommitCell { key });
    }
}

fn blur_and_move(app: &mut App, action_tx: &ActionTx, d_row: i32, d_col: i32) {
    blur(app, action_tx);
    app.grid_move(d_row, d_col);
}
