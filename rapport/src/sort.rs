//! Presentation-order controller shared by every list and table view.
//!
//! The controller owns the requested sort only; source rows are never
//! mutated. `sorted` returns a new, stably ordered projection each time the
//! rows or the sort state change.

use std::cmp::Ordering;

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Three-valued header marker, derived purely from controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMarker {
    Unsorted,
    Ascending,
    Descending,
}

/// A comparison value resolved from one record field.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    /// The record has no value at this field. Missing values sort after
    /// every present value in either direction; two missing values compare
    /// equal (no particular order is promised among them).
    Missing,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Flag(bool),
}

impl SortValue {
    pub fn text(s: impl Into<String>) -> Self {
        SortValue::Text(s.into())
    }

    pub fn from_opt_text(s: Option<&str>) -> Self {
        match s {
            Some(s) => SortValue::text(s),
            None => SortValue::Missing,
        }
    }

    pub fn from_opt_number(n: Option<f64>) -> Self {
        match n {
            Some(n) => SortValue::Number(n),
            None => SortValue::Missing,
        }
    }

    fn rendering(&self) -> String {
        match self {
            SortValue::Missing => String::new(),
            SortValue::Text(s) => s.clone(),
            SortValue::Number(n) => n.to_string(),
            SortValue::Date(d) => d.to_string(),
            SortValue::Flag(b) => b.to_string(),
        }
    }

    /// Same-type pairs compare by their natural order (text
    /// case-insensitively); mixed-type pairs fall back to a
    /// case-insensitive comparison of their textual renderings.
    fn compare(&self, other: &SortValue) -> Ordering {
        use SortValue::*;
        match (self, other) {
            (Text(a), Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Number(a), Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Date(a), Date(b)) => a.cmp(b),
            (Flag(a), Flag(b)) => a.cmp(b),
            _ => self
                .rendering()
                .to_lowercase()
                .cmp(&other.rendering().to_lowercase()),
        }
    }
}

/// Field resolution for a sortable record type. Each entity declares a field
/// enum, so nested lookups like an owning account's name are spelled as
/// variants and checked at compile time.
pub trait SortKey {
    type Field: Copy + Eq;

    fn sort_value(&self, field: Self::Field) -> SortValue;
}

#[derive(Debug, Clone, Copy)]
pub struct TableSort<F> {
    field: Option<F>,
    direction: SortDirection,
}

impl<F: Copy + Eq> TableSort<F> {
    pub fn new() -> Self {
        Self {
            field: None,
            direction: SortDirection::Ascending,
        }
    }

    pub fn with_default(field: F) -> Self {
        Self {
            field: Some(field),
            direction: SortDirection::Ascending,
        }
    }

    pub fn field(&self) -> Option<F> {
        self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// First request on a new field sorts ascending; requesting the active
    /// field again toggles direction. Touches controller state only.
    pub fn request_sort(&mut self, field: F) {
        if self.field == Some(field) {
            self.direction = match self.direction {
                SortDirection::Ascending => SortDirection::Descending,
                SortDirection::Descending => SortDirection::Ascending,
            };
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn marker(&self, field: F) -> SortMarker {
        if self.field != Some(field) {
            SortMarker::Unsorted
        } else {
            match self.direction {
                SortDirection::Ascending => SortMarker::Ascending,
                SortDirection::Descending => SortMarker::Descending,
            }
        }
    }

    /// Stable ordered projection of `rows`. With no active field the input
    /// order passes through unchanged.
    pub fn sorted<R>(&self, rows: &[R]) -> Vec<R>
    where
        R: SortKey<Field = F> + Clone,
    {
        let mut out: Vec<R> = rows.to_vec();
        let Some(field) = self.field else {
            return out;
        };
        let direction = self.direction;
        out.sort_by(|a, b| {
            let (va, vb) = (a.sort_value(field), b.sort_value(field));
            // Missing values are pushed toward the end before the direction
            // flip; the flip reorders present/present pairs only.
            match (&va, &vb) {
                (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
                (SortValue::Missing, _) => Ordering::Greater,
                (_, SortValue::Missing) => Ordering::Less,
                _ => {
                    let ord = va.compare(&vb);
                    match direction {
                        SortDirection::Ascending => ord,
                        SortDirection::Descending => ord.reverse(),
                    }
                }
            }
        });
        out
    }
}

impl<F: Copy + Eq> Default for TableSort<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: Option<String>,
        hours: f64,
        seq: u32,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum RowField {
        Name,
        Hours,
    }

    impl SortKey for Row {
        type Field = RowField;

        fn sort_value(&self, field: RowField) -> SortValue {
            match field {
                RowField::Name => SortValue::from_opt_text(self.name.as_deref()),
                RowField::Hours => SortValue::Number(self.hours),
            }
        }
    }

    fn row(name: Option<&str>, hours: f64, seq: u32) -> Row {
        Row {
            name: name.map(str::to_string),
            hours,
            seq,
        }
    }

    fn names(rows: &[Row]) -> Vec<Option<&str>> {
        rows.iter().map(|r| r.name.as_deref()).collect()
    }

    #[test]
    fn first_request_sorts_ascending() {
        let mut sort = TableSort::new();
        sort.request_sort(RowField::Name);
        let rows = vec![row(Some("beta"), 1.0, 0), row(Some("Alpha"), 2.0, 1)];
        assert_eq!(names(&sort.sorted(&rows)), vec![Some("Alpha"), Some("beta")]);
        assert_eq!(sort.marker(RowField::Name), SortMarker::Ascending);
        assert_eq!(sort.marker(RowField::Hours), SortMarker::Unsorted);
    }

    #[test]
    fn toggle_is_strictly_two_state() {
        let mut sort = TableSort::new();
        sort.request_sort(RowField::Name);
        assert_eq!(sort.direction(), SortDirection::Ascending);
        sort.request_sort(RowField::Name);
        assert_eq!(sort.direction(), SortDirection::Descending);
        sort.request_sort(RowField::Name);
        assert_eq!(sort.direction(), SortDirection::Ascending);
        // Switching to another field resets to ascending.
        sort.request_sort(RowField::Name);
        sort.request_sort(RowField::Hours);
        assert_eq!(sort.direction(), SortDirection::Ascending);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let mut sort = TableSort::new();
        sort.request_sort(RowField::Hours);
        let rows = vec![
            row(Some("c"), 8.0, 0),
            row(Some("a"), 8.0, 1),
            row(Some("b"), 4.0, 2),
            row(Some("d"), 8.0, 3),
        ];
        let sorted = sort.sorted(&rows);
        let equal_seq: Vec<u32> = sorted
            .iter()
            .filter(|r| r.hours == 8.0)
            .map(|r| r.seq)
            .collect();
        assert_eq!(equal_seq, vec![0, 1, 3]);
    }

    #[test]
    fn missing_values_sort_last_in_either_direction() {
        let mut sort = TableSort::new();
        sort.request_sort(RowField::Name);
        let rows = vec![row(None, 1.0, 0), row(Some("zzz"), 2.0, 1), row(None, 3.0, 2)];

        let asc = sort.sorted(&rows);
        assert_eq!(asc[0].name.as_deref(), Some("zzz"));
        assert!(asc[1].name.is_none() && asc[2].name.is_none());

        sort.request_sort(RowField::Name);
        let desc = sort.sorted(&rows);
        assert_eq!(desc[0].name.as_deref(), Some("zzz"));
        assert!(desc[1].name.is_none() && desc[2].name.is_none());
    }

    #[test]
    fn no_active_field_passes_input_through() {
        let sort: TableSort<RowField> = TableSort::new();
        let rows = vec![row(Some("b"), 1.0, 0), row(Some("a"), 2.0, 1)];
        assert_eq!(sort.sorted(&rows), rows);
        assert_eq!(sort.sorted::<Row>(&[]), Vec::<Row>::new());
    }

    #[test]
    fn mixed_types_fall_back_to_text_comparison() {
        assert_eq!(
            SortValue::Number(10.0).compare(&SortValue::text("9 hours")),
            Ordering::Less
        );
        assert_eq!(
            SortValue::text("TRUE").compare(&SortValue::Flag(true)),
            Ordering::Equal
        );
    }
}
