use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use rapport::domain::{
    Account, AccountField, SpecialDay, SpecialDayField, Task, TaskField, User, UserField,
};
use rapport::sort::{SortKey, TableSort};

use super::FilterInput;

/// Name used by the fuzzy filter input of a list view.
pub trait DisplayName {
    fn display_name(&self) -> &str;
}

impl DisplayName for Account {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl DisplayName for Task {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl DisplayName for User {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl DisplayName for SpecialDay {
    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Column layout of each register view: header label + sort field, in
/// display order. The 1-based position doubles as the sort hotkey.
pub const ACCOUNT_COLUMNS: [(&str, AccountField); 2] = [
    ("Name", AccountField::Name),
    ("Status", AccountField::Status),
];

pub const TASK_COLUMNS: [(&str, TaskField); 3] = [
    ("Name", TaskField::Name),
    ("Account", TaskField::AccountName),
    ("Status", TaskField::Status),
];

pub const USER_COLUMNS: [(&str, UserField); 3] = [
    ("Name", UserField::Name),
    ("Email", UserField::Email),
    ("Status", UserField::Status),
];

pub const SPECIAL_DAY_COLUMNS: [(&str, SpecialDayField); 3] = [
    ("Date", SpecialDayField::Date),
    ("Name", SpecialDayField::Name),
    ("Type", SpecialDayField::Kind),
];

/// State of one register list view: fetched rows, the sort controller, a
/// fuzzy name filter and the activation-status toggle.
pub struct EntityList<R, F> {
    pub rows: Vec<R>,
    pub sort: TableSort<F>,
    pub filter: FilterInput,
    pub filter_focused: bool,
    /// Lists show only ACTIVE rows by default.
    pub show_inactive: bool,
    pub selected: usize,
    pub loaded: bool,
}

impl<R, F> EntityList<R, F>
where
    R: SortKey<Field = F> + Clone + DisplayName,
    F: Copy + Eq,
{
    pub fn new(default_field: F) -> Self {
        Self {
            rows: Vec::new(),
            sort: TableSort::with_default(default_field),
            filter: FilterInput::new(),
            filter_focused: false,
            show_inactive: false,
            selected: 0,
            loaded: false,
        }
    }

    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.selected = 0;
        self.loaded = true;
    }

    /// The displayed projection: fuzzy-filtered by name, then ordered by the
    /// sort controller. With no active sort field, filter matches keep their
    /// match-score order.
    pub fn visible(&self) -> Vec<R> {
        let query = self.filter.value.trim();
        if query.is_empty() {
            return self.sort.sorted(&self.rows);
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(R, i64)> = self
            .rows
            .iter()
            .filter_map(|row| {
                matcher
                    .fuzzy_match(row.display_name(), query)
                    .map(|score| (row.clone(), score))
            })
            .collect();

        if self.sort.field().is_some() {
            let rows: Vec<R> = scored.into_iter().map(|(row, _)| row).collect();
            self.sort.sorted(&rows)
        } else {
            scored.sort_by(|a, b| b.1.cmp(&a.1));
            scored.into_iter().map(|(row, _)| row).collect()
        }
    }

    pub fn request_sort(&mut self, field: F) {
        self.sort.request_sort(field);
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.visible().len();
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
        }
    }
}
