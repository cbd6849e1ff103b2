use rapport::ports::ErrorSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Grid,
    Accounts,
    Tasks,
    Users,
    SpecialDays,
}

pub const VIEW_ORDER: [View; 5] = [
    View::Grid,
    View::Accounts,
    View::Tasks,
    View::Users,
    View::SpecialDays,
];

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Grid => "Time Report",
            View::Accounts => "Accounts",
            View::Tasks => "Tasks",
            View::Users => "Users",
            View::SpecialDays => "Special Days",
        }
    }

    pub fn next(&self) -> View {
        let idx = VIEW_ORDER.iter().position(|v| v == self).unwrap_or(0);
        VIEW_ORDER[(idx + 1) % VIEW_ORDER.len()]
    }

    pub fn previous(&self) -> View {
        let idx = VIEW_ORDER.iter().position(|v| v == self).unwrap_or(0);
        VIEW_ORDER[(idx + VIEW_ORDER.len() - 1) % VIEW_ORDER.len()]
    }
}

/// The status line doubles as the error-reporting collaborator: remote
/// failures land here, as do informational messages.
#[derive(Debug, Default)]
pub struct StatusLine(Option<String>);

impl StatusLine {
    pub fn set(&mut self, message: impl Into<String>) {
        self.0 = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl ErrorSink for StatusLine {
    fn report(&mut self, message: &str) {
        self.set(message);
    }
}

/// Single-line filter input. The cursor stays at the end; these inputs are
/// short and append-only in practice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterInput {
    pub value: String,
}

impl FilterInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
