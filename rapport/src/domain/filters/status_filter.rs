use super::QueryFilter;
use crate::domain::ActivationStatus;

pub struct StatusFilter {
    pub status: ActivationStatus,
}

impl StatusFilter {
    pub fn new(status: ActivationStatus) -> Self {
        Self { status }
    }
}

impl QueryFilter for StatusFilter {
    fn as_query_filter(&self) -> String {
        format!(r#"[["status","=","{}"]]"#, self.status.as_str())
    }
}
