use chrono::NaiveDate;

use super::QueryFilter;

/// Inclusive date-range filter for register and report queries.
pub struct DateFilter {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateFilter {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }
}

impl QueryFilter for DateFilter {
    fn as_query_filter(&self) -> String {
        format!(
            r#"[["date",">=","{}"],["date","<=","{}"]]"#,
            self.from, self.to
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_an_inclusive_range() {
        let filter = DateFilter::new(
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        );
        assert_eq!(
            filter.as_query_filter(),
            r#"[["date",">=","2026-01-01"],["date","<=","2026-12-31"]]"#
        );
    }
}
