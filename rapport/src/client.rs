use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::domain::{
    Account, ActivationStatus, DateFilter, RawReport, ReportGranularity, SpecialDay, StatusFilter,
    Task, TimeEntry, User, UserReport,
};
use crate::ports::{
    EntryStore, ErrorPayload, FetchError, PersistError, ReportSource, SavedEntry,
};
use crate::RapportUrl;

/// Session cookie name used by the backend.
const SESSION_COOKIE: &str = "id";

/// HTTP client against the rapport backend. Authentication itself happens
/// elsewhere; this client only replays a saved session cookie.
pub struct RapportClient {
    client: reqwest::Client,
    base_url: RapportUrl,
    session_id: String,
}

impl RapportClient {
    pub fn new(base_url: &str, session_id: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| FetchError::ResponseError(e.to_string()))?;
        Ok(Self {
            client,
            base_url: RapportUrl::new(base_url),
            session_id: session_id.to_string(),
        })
    }

    fn cookie_header(&self) -> String {
        format!("{}={}", SESSION_COOKIE, self.session_id)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: impl AsRef<str>) -> Result<T, FetchError> {
        let resp = self
            .client
            .get(url.as_ref())
            .header("Cookie", self.cookie_header())
            .send()
            .await
            .map_err(|e| FetchError::ResponseError(e.to_string()))?;

        if resp.status() == StatusCode::UNAUTHORIZED || resp.status() == StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized);
        }
        if !resp.status().is_success() {
            return Err(FetchError::ResponseError(format!(
                "status {}",
                resp.status()
            )));
        }

        resp.json::<T>().await.map_err(|e| {
            FetchError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }

    fn register_url(&self, path: &str, status: Option<ActivationStatus>) -> RapportUrl {
        let url = self.base_url.append_path(path);
        match status {
            Some(status) => url.with_filter(&StatusFilter::new(status)),
            None => url,
        }
    }
}

#[async_trait]
impl ReportSource for RapportClient {
    async fn fetch_report(
        &self,
        granularity: ReportGranularity,
        anchor: Option<NaiveDate>,
    ) -> Result<UserReport, FetchError> {
        let mut url = self
            .base_url
            .append_path("/reports/me")
            .with_param("granularity", granularity.as_str());
        if let Some(anchor) = anchor {
            url = url.with_param("date", anchor);
        }

        let raw: RawReport = self.fetch(url).await?;
        Ok(raw.into())
    }

    async fn fetch_accounts(
        &self,
        status: Option<ActivationStatus>,
    ) -> Result<Vec<Account>, FetchError> {
        self.fetch(self.register_url("/accounts", status)).await
    }

    async fn fetch_tasks(&self, status: Option<ActivationStatus>) -> Result<Vec<Task>, FetchError> {
        self.fetch(self.register_url("/tasks", status)).await
    }

    async fn fetch_users(&self, status: Option<ActivationStatus>) -> Result<Vec<User>, FetchError> {
        self.fetch(self.register_url("/users", status)).await
    }

    async fn fetch_special_days(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SpecialDay>, FetchError> {
        let url = self
            .base_url
            .append_path("/special-days")
            .with_filter(&DateFilter::new(from, to));
        self.fetch(url).await
    }
}

#[async_trait]
impl EntryStore for RapportClient {
    /// POST for a first-time persist, PUT once the entry has a server id.
    async fn save_entry(&self, entry: &TimeEntry) -> Result<SavedEntry, PersistError> {
        let req = match &entry.id {
            Some(id) => self
                .client
                .put(self.base_url.append_path(&format!("/time-entries/{id}")).as_ref()),
            None => self
                .client
                .post(self.base_url.append_path("/time-entries").as_ref()),
        };

        let resp = req
            .header("Cookie", self.cookie_header())
            .json(entry)
            .send()
            .await
            .map_err(|e| PersistError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            resp.json::<SavedEntry>()
                .await
                .map_err(|e| PersistError::Parsing(e.to_string()))
        } else {
            let payload = resp.json::<ErrorPayload>().await.unwrap_or_default();
            Err(PersistError::Rejected {
                status: status.as_u16(),
                payload,
            })
        }
    }
}
