//! Boundary contracts between the front end and its collaborators.
//!
//! The traits keep the controllers testable without a server; the TUI wires
//! them to [`crate::RapportClient`] or [`crate::dev::DevStore`].

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{
    Account, ActivationStatus, ReportGranularity, SpecialDay, Task, TimeEntry, User, UserReport,
};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
}

/// Error payload returned by the backend on a rejected persist.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub field_errors: Vec<FieldError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum PersistError {
    /// The backend answered with a non-success status.
    #[error("status {status}")]
    Rejected { status: u16, payload: ErrorPayload },
    #[error("TransportError: {0}")]
    Transport(String),
    #[error("ParsingError: {0}")]
    Parsing(String),
}

/// Server acknowledgement of a persisted entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedEntry {
    pub id: String,
}

/// Fetches reports and register data from the backend.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch_report(
        &self,
        granularity: ReportGranularity,
        anchor: Option<NaiveDate>,
    ) -> Result<UserReport, FetchError>;

    /// `None` lists every account regardless of activation status.
    async fn fetch_accounts(
        &self,
        status: Option<ActivationStatus>,
    ) -> Result<Vec<Account>, FetchError>;

    async fn fetch_tasks(&self, status: Option<ActivationStatus>) -> Result<Vec<Task>, FetchError>;

    async fn fetch_users(&self, status: Option<ActivationStatus>) -> Result<Vec<User>, FetchError>;

    async fn fetch_special_days(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SpecialDay>, FetchError>;
}

/// Persists a single time entry. POST-or-PUT is the implementation's
/// concern; the caller only sees the acknowledged id.
#[async_trait]
pub trait EntryStore: Send + Sync {
    async fn save_entry(&self, entry: &TimeEntry) -> Result<SavedEntry, PersistError>;
}

/// Where human-readable failure messages go. The TUI implements this as its
/// status line; tests collect into a vec.
pub trait ErrorSink {
    fn report(&mut self, message: &str);
}

/// The full backend surface the front end needs.
pub trait Backend: ReportSource + EntryStore {}

impl<T: ReportSource + EntryStore> Backend for T {}
