use std::env;
use std::fmt::Display;

use crate::domain::QueryFilter;

#[derive(Debug, Clone)]
pub struct RapportUrl(String);

impl AsRef<str> for RapportUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl RapportUrl {
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self(base.trim_end_matches('/').to_string())
    }

    /// Creates a new RapportUrl from the environment variable `RAPPORT_URL`.
    pub fn from_env() -> Self {
        Self::new(env::var("RAPPORT_URL").expect("RAPPORT_URL must be set in env"))
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    pub fn with_param(&self, key: &str, value: impl Display) -> Self {
        if self.0.contains('?') {
            Self(format!("{}&{}={}", self.0, key, value))
        } else {
            Self(format!("{}?{}={}", self.0, key, value))
        }
    }

    pub fn with_filter(&self, filter: &impl QueryFilter) -> Self {
        self.with_param("filter", filter.as_query_filter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_path_normalizes_slashes() {
        let url = RapportUrl::new("http://localhost:8080/");
        assert_eq!(url.append_path("/reports/me").as_ref(), "http://localhost:8080/reports/me");
    }

    #[test]
    fn params_chain_with_ampersand() {
        let url = RapportUrl::new("http://localhost:8080")
            .append_path("reports/me")
            .with_param("granularity", "WEEK")
            .with_param("date", "2026-08-03");
        assert_eq!(
            url.as_ref(),
            "http://localhost:8080/reports/me?granularity=WEEK&date=2026-08-03"
        );
    }
}
