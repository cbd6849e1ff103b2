//! Per-cell edit model for the time grid.
//!
//! A [`CellEditor`] owns a local copy of one entry. User input flows
//! change → validation → commit-on-blur → merge back into the parent report
//! via [`crate::domain::UserReport::apply_saved_entry`]. A failed commit
//! leaves the unsaved value visible; nothing here is fatal.

use std::collections::HashMap;

use crate::domain::TimeEntry;
use crate::ports::{EntryStore, ErrorSink, PersistError};

/// Validate raw cell input (already comma-normalized).
///
/// Empty input is valid and means "clear". Otherwise the text must parse as
/// a finite number in [0, 24] with at most two digits after the decimal
/// point.
pub fn validate_hours(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return true;
    }
    let Ok(value) = trimmed.parse::<f64>() else {
        return false;
    };
    if !value.is_finite() {
        return false;
    }
    if !(0.0..=24.0).contains(&value) {
        return false;
    }
    if let Some((_, frac)) = trimmed.split_once('.') {
        if frac.len() > 2 {
            return false;
        }
    }
    true
}

/// Render a persist failure as the user-facing message.
///
/// 400-class rejections surface the backend's validation message (field
/// errors joined as `field: message`); 500-class ones are prefixed so the
/// user can tell a server fault from a validation issue.
pub fn persist_error_message(err: &PersistError) -> String {
    match err {
        PersistError::Rejected { status, payload } if (400..500).contains(status) => {
            if payload.field_errors.is_empty() {
                payload
                    .error
                    .clone()
                    .unwrap_or_else(|| format!("Error: status {status}"))
            } else {
                payload
                    .field_errors
                    .iter()
                    .map(|f| format!("{}: {}", f.field, f.message))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
        PersistError::Rejected { status, payload } if (500..600).contains(status) => {
            format!(
                "Internal server error: {}",
                payload
                    .error
                    .clone()
                    .unwrap_or_else(|| format!("status {status}"))
            )
        }
        PersistError::Rejected { status, payload } => {
            format!(
                "Error: {}",
                payload
                    .error
                    .clone()
                    .unwrap_or_else(|| format!("status {status}"))
            )
        }
        other => format!("Error: {other}"),
    }
}

/// Editable state for one (task × day) cell.
#[derive(Debug, Clone)]
pub struct CellEditor {
    entry: TimeEntry,
    input: String,
    field_error: bool,
    dirty: bool,
    /// Field-level messages from the last 400-class rejection, keyed by
    /// field name. Rendered declaratively by the UI.
    field_errors: HashMap<String, String>,
}

impl CellEditor {
    pub fn new(entry: TimeEntry) -> Self {
        let input = entry.hours.map(format_hours).unwrap_or_default();
        Self {
            entry,
            input,
            field_error: false,
            dirty: false,
            field_errors: HashMap::new(),
        }
    }

    pub fn entry(&self) -> &TimeEntry {
        &self.entry
    }

    /// The text currently shown in the cell, kept even when invalid.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn has_field_error(&self) -> bool {
        self.field_error
    }

    pub fn field_errors(&self) -> &HashMap<String, String> {
        &self.field_errors
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Apply raw user input. No-op on closed cells. The normalized value is
    /// displayed unconditionally; an invalid value is flagged but never
    /// submitted.
    pub fn handle_change(&mut self, raw: &str) {
        if self.entry.closed {
            return;
        }
        let normalized = raw.replace(',', ".");
        let valid = validate_hours(&normalized);
        self.input = normalized;
        self.field_error = !valid;
        self.dirty = true;
        if valid {
            self.entry.hours = parse_hours(&self.input);
        }
    }

    /// Focus-loss commit. Returns the persisted entry for the parent merge,
    /// or `None` when nothing was sent: the cell is closed, was never
    /// edited, or holds an invalid value.
    ///
    /// On failure the message goes to `errors` and the local value stays
    /// visible with no rollback; the dirty flag survives so the next blur
    /// retries.
    pub async fn commit<S, E>(&mut self, store: &S, errors: &mut E) -> Option<TimeEntry>
    where
        S: EntryStore + ?Sized,
        E: ErrorSink + ?Sized,
    {
        if self.entry.closed || !self.dirty {
            return None;
        }
        if self.field_error || !validate_hours(&self.input) {
            return None;
        }
        self.entry.hours = parse_hours(&self.input);

        match store.save_entry(&self.entry).await {
            Ok(saved) => {
                self.entry.id = Some(saved.id);
                self.dirty = false;
                self.field_error = false;
                self.field_errors.clear();
                Some(self.entry.clone())
            }
            Err(err) => {
                if let PersistError::Rejected { status, payload } = &err {
                    if (400..500).contains(status) {
                        self.field_errors = payload
                            .field_errors
                            .iter()
                            .map(|f| (f.field.clone(), f.message.clone()))
                            .collect();
                    }
                }
                errors.report(&persist_error_message(&err));
                None
            }
        }
    }
}

fn parse_hours(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        trimmed.parse().ok()
    }
}

/// Format stored hours without trailing-zero noise ("8", "7.5", "0.25").
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        format!("{hours}")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::Day;
    use crate::ports::{ErrorPayload, FieldError, SavedEntry};

    #[derive(Default)]
    struct MockStore {
        saved: Mutex<Vec<TimeEntry>>,
        // Single-shot failure; subsequent calls succeed.
        fail_next: Mutex<Option<PersistError>>,
    }

    impl MockStore {
        fn failing(err: PersistError) -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_next: Mutex::new(Some(err)),
            }
        }

        fn call_count(&self) -> usize {
            self.saved.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl EntryStore for MockStore {
        async fn save_entry(&self, entry: &TimeEntry) -> Result<SavedEntry, PersistError> {
            self.saved.lock().unwrap().push(entry.clone());
            if let Some(err) = self.fail_next.lock().unwrap().take() {
                return Err(err);
            }
            Ok(SavedEntry { id: "srv-1".into() })
        }
    }

    #[derive(Default)]
    struct SinkSpy(Vec<String>);

    impl ErrorSink for SinkSpy {
        fn report(&mut self, message: &str) {
            self.0.push(message.to_string());
        }
    }

    fn entry(hours: Option<f64>, closed: bool) -> TimeEntry {
        TimeEntry {
            id: None,
            task_contributor_id: "tc-1".into(),
            day: Day::plain(chrono::NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()),
            hours,
            closed,
        }
    }

    #[test]
    fn validation_boundaries() {
        assert!(validate_hours("0"));
        assert!(validate_hours("24"));
        assert!(validate_hours("8.5"));
        assert!(validate_hours("8.55"));
        assert!(validate_hours(""));
        assert!(!validate_hours("-0.01"));
        assert!(!validate_hours("24.01"));
        assert!(!validate_hours("8.555"));
        assert!(!validate_hours("eight"));
    }

    #[test]
    fn comma_input_is_normalized_before_validation() {
        let mut editor = CellEditor::new(entry(None, false));
        editor.handle_change("8,5");
        assert_eq!(editor.input(), "8.5");
        assert!(!editor.has_field_error());
        assert_eq!(editor.entry().hours, Some(8.5));
    }

    #[test]
    fn invalid_input_stays_visible_but_is_not_applied() {
        let mut editor = CellEditor::new(entry(Some(4.0), false));
        editor.handle_change("25");
        assert_eq!(editor.input(), "25");
        assert!(editor.has_field_error());
        assert_eq!(editor.entry().hours, Some(4.0));
    }

    #[tokio::test]
    async fn closed_cells_ignore_change_and_commit() {
        let store = MockStore::default();
        let mut sink = SinkSpy::default();
        let mut editor = CellEditor::new(entry(Some(8.0), true));

        editor.handle_change("4");
        assert_eq!(editor.input(), "8");
        assert_eq!(editor.entry().hours, Some(8.0));

        assert!(editor.commit(&store, &mut sink).await.is_none());
        assert_eq!(store.call_count(), 0);
        assert!(sink.0.is_empty());
    }

    #[tokio::test]
    async fn unedited_cell_commits_nothing() {
        let store = MockStore::default();
        let mut sink = SinkSpy::default();
        let mut editor = CellEditor::new(entry(None, false));

        assert!(editor.commit(&store, &mut sink).await.is_none());
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn invalid_value_never_reaches_the_store() {
        let store = MockStore::default();
        let mut sink = SinkSpy::default();
        let mut editor = CellEditor::new(entry(None, false));

        editor.handle_change("8.555");
        assert!(editor.commit(&store, &mut sink).await.is_none());
        assert_eq!(store.call_count(), 0);
        assert!(sink.0.is_empty(), "local validation is a marker, not an error");
    }

    #[tokio::test]
    async fn successful_commit_merges_server_id() {
        let store = MockStore::default();
        let mut sink = SinkSpy::default();
        let mut editor = CellEditor::new(entry(None, false));

        editor.handle_change("7.5");
        let saved = editor.commit(&store, &mut sink).await.expect("commit");
        assert_eq!(saved.id.as_deref(), Some("srv-1"));
        assert_eq!(saved.hours, Some(7.5));
        assert!(!editor.is_dirty());

        // A second blur with no further edits is a no-op.
        assert!(editor.commit(&store, &mut sink).await.is_none());
        assert_eq!(store.call_count(), 1);
    }

    #[tokio::test]
    async fn clearing_a_value_is_an_update() {
        let store = MockStore::default();
        let mut sink = SinkSpy::default();
        let mut editor = CellEditor::new(entry(Some(8.0), false));

        editor.handle_change("");
        let saved = editor.commit(&store, &mut sink).await.expect("commit");
        assert_eq!(saved.hours, None);
        assert_eq!(store.call_count(), 1);
    }

    #[tokio::test]
    async fn server_fault_message_is_prefixed() {
        let store = MockStore::failing(PersistError::Rejected {
            status: 500,
            payload: ErrorPayload {
                error: Some("disk full".into()),
                field_errors: vec![],
            },
        });
        let mut sink = SinkSpy::default();
        let mut editor = CellEditor::new(entry(None, false));

        editor.handle_change("8");
        assert!(editor.commit(&store, &mut sink).await.is_none());
        assert_eq!(sink.0, vec!["Internal server error: disk full".to_string()]);
        // No rollback: the unsaved value stays visible and dirty.
        assert_eq!(editor.input(), "8");
        assert!(editor.is_dirty());
    }

    #[tokio::test]
    async fn rejection_populates_the_field_error_map() {
        let store = MockStore::failing(PersistError::Rejected {
            status: 400,
            payload: ErrorPayload {
                error: None,
                field_errors: vec![FieldError {
                    field: "time".into(),
                    message: "period is closed".into(),
                }],
            },
        });
        let mut sink = SinkSpy::default();
        let mut editor = CellEditor::new(entry(None, false));

        editor.handle_change("8");
        assert!(editor.commit(&store, &mut sink).await.is_none());
        assert_eq!(sink.0, vec!["time: period is closed".to_string()]);
        assert_eq!(
            editor.field_errors().get("time").map(String::as_str),
            Some("period is closed")
        );

        // The next successful commit clears the map.
        let saved = editor.commit(&store, &mut sink).await;
        assert!(saved.is_some());
        assert!(editor.field_errors().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_uses_the_generic_prefix() {
        let store = MockStore::failing(PersistError::Transport("connection refused".into()));
        let mut sink = SinkSpy::default();
        let mut editor = CellEditor::new(entry(None, false));

        editor.handle_change("8");
        assert!(editor.commit(&store, &mut sink).await.is_none());
        assert_eq!(sink.0.len(), 1);
        assert!(sink.0[0].starts_with("Error: "));
    }
}
