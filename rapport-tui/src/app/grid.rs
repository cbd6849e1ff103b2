use std::collections::HashMap;

use chrono::NaiveDate;
use rapport::domain::{TimeEntry, TimeReportTask};
use rapport::grid::CellEditor;

use super::App;

/// Stable identity of one grid cell across report refreshes.
pub type CellKey = (String, NaiveDate);

#[derive(Debug, Default)]
pub struct GridState {
    pub cursor_row: usize,
    pub cursor_col: usize,
    /// Typing mode on the focused cell.
    pub editing: bool,
    /// Per-cell editors, created on first edit and removed on successful
    /// commit. An editor holding an unsaved or invalid value outlives
    /// focus changes, so the typed value stays visible.
    pub editors: HashMap<CellKey, CellEditor>,
    /// First visible day column (horizontal scroll); maintained by the
    /// renderer to keep the cursor in view.
    pub col_offset: usize,
}

impl GridState {
    pub fn clamp_cursor(&mut self, rows: usize, cols: usize) {
        if rows == 0 || cols == 0 {
            self.cursor_row = 0;
            self.cursor_col = 0;
            return;
        }
        self.cursor_row = self.cursor_row.min(rows - 1);
        self.cursor_col = self.cursor_col.min(cols - 1);
    }
}

impl App {
    pub fn grid_dims(&self) -> (usize, usize) {
        match &self.report {
            Some(report) => (report.tasks.len(), report.days.len()),
            None => (0, 0),
        }
    }

    pub fn focused_row(&self) -> Option<&TimeReportTask> {
        self.report.as_ref()?.tasks.get(self.grid.cursor_row)
    }

    pub fn focused_entry(&self) -> Option<&TimeEntry> {
        self.focused_row()?.entries.get(self.grid.cursor_col)
    }

    pub fn focused_key(&self) -> Option<CellKey> {
        let entry = self.focused_entry()?;
        Some((entry.task_contributor_id.clone(), entry.day.date))
    }

    /// Move the cursor. Leaving an edited cell is the blur: the caller must
    /// first take [`App::end_cell_edit`] and enqueue the commit.
    pub fn grid_move(&mut self, d_row: i32, d_col: i32) {
        let (rows, cols) = self.grid_dims();
        if rows == 0 || cols == 0 {
            return;
        }
        let row = self.grid.cursor_row as i32 + d_row;
        let col = self.grid.cursor_col as i32 + d_col;
        self.grid.cursor_row = row.clamp(0, rows as i32 - 1) as usize;
        self.grid.cursor_col = col.clamp(0, cols as i32 - 1) as usize;
    }

    /// Enter typing mode on the focused cell. Closed cells stay read-only.
    pub fn begin_cell_edit(&mut self) {
        let Some(entry) = self.focused_entry().cloned() else {
            return;
        };
        if entry.closed {
            self.set_status("Period is closed - entry is read-only");
            return;
        }
        let key = (entry.task_contributor_id.clone(), entry.day.date);
        self.grid
            .editors
            .entry(key)
            .or_insert_with(|| CellEditor::new(entry));
        self.grid.editing = true;
    }

    /// Leave typing mode; returns the cell to commit, if any.
    pub fn end_cell_edit(&mut self) -> Option<CellKey> {
        if !self.grid.editing {
            return None;
        }
        self.grid.editing = false;
        let key = self.focused_key()?;
        self.grid.editors.contains_key(&key).then_some(key)
    }

    /// Typed character while on the grid. Starting to type replaces the
    /// cell's content; further keystrokes append.
    pub fn cell_input_char(&mut self, c: char) {
        let starting = !self.grid.editing;
        if starting {
            self.begin_cell_edit();
            if !self.grid.editing {
                return;
            }
        }
        let Some(key) = self.focused_key() else {
            return;
        };
        if let Some(editor) = self.grid.editors.get_mut(&key) {
            let input = if starting {
                c.to_string()
            } else {
                format!("{}{}", editor.input(), c)
            };
            editor.handle_change(&input);
        }
    }

    pub fn cell_backspace(&mut self) {
        if !self.grid.editing {
            return;
        }
        let Some(key) = self.focused_key() else {
            return;
        };
        if let Some(editor) = self.grid.editors.get_mut(&key) {
            let mut input = editor.input().to_string();
            input.pop();
            editor.handle_change(&input);
        }
    }
}
