use chrono::NaiveDate;
use rapport::domain::{
    Account, AccountField, ReportGranularity, SpecialDay, SpecialDayField, Task, TaskField, User,
    UserField, UserReport,
};

mod grid;
mod lists;
mod state;

pub use grid::{CellKey, GridState};
pub use lists::{
    DisplayName, EntityList, ACCOUNT_COLUMNS, SPECIAL_DAY_COLUMNS, TASK_COLUMNS, USER_COLUMNS,
};
pub use state::{FilterInput, StatusLine, View, VIEW_ORDER};

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub status: StatusLine,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,

    // Report + grid
    pub today: NaiveDate,
    pub granularity: ReportGranularity,
    pub anchor: NaiveDate,
    pub report: Option<UserReport>,
    pub grid: GridState,

    // Register list views
    pub accounts: EntityList<Account, AccountField>,
    pub tasks: EntityList<Task, TaskField>,
    pub users: EntityList<User, UserField>,
    pub special_days: EntityList<SpecialDay, SpecialDayField>,
}

impl App {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            running: true,
            current_view: View::Grid,
            status: StatusLine::default(),
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            today,
            granularity: ReportGranularity::Week,
            anchor: today,
            report: None,
            grid: GridState::default(),
            accounts: EntityList::new(AccountField::Name),
            tasks: EntityList::new(TaskField::Name),
            users: EntityList::new(UserField::Name),
            special_days: EntityList::new(SpecialDayField::Date),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status.set(message);
    }

    pub fn clear_status(&mut self) {
        self.status.clear();
    }

    /// Navigate to a different view.
    pub fn navigate_to(&mut self, view: View) {
        self.current_view = view;
        self.clear_status();
    }

    /// Swap in a freshly fetched report. Cell editors are keyed by
    /// (contributor, date) and survive the refresh; the cursor is clamped
    /// to the new matrix.
    pub fn apply_report(&mut self, report: UserReport) {
        let rows = report.tasks.len();
        let cols = report.days.len();
        self.report = Some(report);
        self.grid.clamp_cursor(rows, cols);
    }

    /// Cycle WEEK → MONTH → YEAR.
    pub fn cycle_granularity(&mut self) {
        self.granularity = match self.granularity {
            ReportGranularity::Week => ReportGranularity::Month,
            ReportGranularity::Month => ReportGranularity::Year,
            ReportGranularity::Year => ReportGranularity::Week,
        };
    }

    /// Move the anchor one period forward or back.
    pub fn step_period(&mut self, delta: i32) {
        self.anchor = self.granularity.step(self.anchor, delta);
    }

    /// Key hint shown in the status bar when no message is set.
    pub fn get_contextual_status(&self) -> String {
        match self.current_view {
            View::Grid if self.grid.editing => {
                "Type hours 0-24 · Enter/Esc or arrows save on leave".to_string()
            }
            View::Grid => {
                "Arrows move · Enter/digits edit · g granularity · [ ] period · t today · r refresh · Tab views · q quit"
                    .to_string()
            }
            _ => {
                "j/k select · / filter · 1-9 sort column · i include inactive · r reload · Tab views · q quit"
                    .to_string()
            }
        }
    }
}
