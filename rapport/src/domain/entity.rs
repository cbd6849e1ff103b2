use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::sort::{SortKey, SortValue};

/// Two-valued lifecycle flag on accounts, tasks and users. `Active` is the
/// default list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivationStatus {
    #[default]
    Active,
    Inactive,
}

impl ActivationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationStatus::Active => "ACTIVE",
            ActivationStatus::Inactive => "INACTIVE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub status: ActivationStatus,
}

/// A task always belongs to exactly one account; the nested account is what
/// list views sort on for the "account" column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub account: Account,
    pub status: ActivationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub status: ActivationStatus,
}

/// An administrator-defined calendar exception. The backend folds these into
/// the day flags of fetched reports; the register itself is listed in the
/// admin views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDay {
    pub date: NaiveDate,
    pub name: String,
    pub kind: SpecialDayKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialDayKind {
    MajorHoliday,
    HalfDay,
}

impl SpecialDayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialDayKind::MajorHoliday => "MAJOR_HOLIDAY",
            SpecialDayKind::HalfDay => "HALF_DAY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    Name,
    Status,
}

impl SortKey for Account {
    type Field = AccountField;

    fn sort_value(&self, field: AccountField) -> SortValue {
        match field {
            AccountField::Name => SortValue::text(&self.name),
            AccountField::Status => SortValue::text(self.status.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Name,
    AccountName,
    Status,
}

impl SortKey for Task {
    type Field = TaskField;

    fn sort_value(&self, field: TaskField) -> SortValue {
        match field {
            TaskField::Name => SortValue::text(&self.name),
            TaskField::AccountName => SortValue::text(&self.account.name),
            TaskField::Status => SortValue::text(self.status.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    Email,
    Status,
}

impl SortKey for User {
    type Field = UserField;

    fn sort_value(&self, field: UserField) -> SortValue {
        match field {
            UserField::Name => SortValue::text(&self.name),
            UserField::Email => SortValue::from_opt_text(self.email.as_deref()),
            UserField::Status => SortValue::text(self.status.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialDayField {
    Date,
    Name,
    Kind,
}

impl SortKey for SpecialDay {
    type Field = SpecialDayField;

    fn sort_value(&self, field: SpecialDayField) -> SortValue {
        match field {
            SpecialDayField::Date => SortValue::Date(self.date),
            SpecialDayField::Name => SortValue::text(&self.name),
            SpecialDayField::Kind => SortValue::text(self.kind.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::TableSort;

    fn account(id: &str, name: &str) -> Account {
        Account {
            id: id.to_string(),
            name: name.to_string(),
            status: ActivationStatus::Active,
        }
    }

    #[test]
    fn tasks_sort_by_nested_account_name() {
        let mut sort = TableSort::with_default(TaskField::AccountName);
        let tasks = vec![
            Task {
                id: "t1".into(),
                name: "Support".into(),
                account: account("a2", "Globex"),
                status: ActivationStatus::Active,
            },
            Task {
                id: "t2".into(),
                name: "Development".into(),
                account: account("a1", "acme industries"),
                status: ActivationStatus::Active,
            },
        ];
        let sorted = sort.sorted(&tasks);
        assert_eq!(sorted[0].account.name, "acme industries");

        sort.request_sort(TaskField::AccountName);
        let sorted = sort.sorted(&tasks);
        assert_eq!(sorted[0].account.name, "Globex");
    }

    #[test]
    fn users_without_email_sort_after_those_with() {
        let sort = TableSort::with_default(UserField::Email);
        let users = vec![
            User {
                id: "u1".into(),
                name: "Nils".into(),
                email: None,
                status: ActivationStatus::Active,
            },
            User {
                id: "u2".into(),
                name: "Maja".into(),
                email: Some("maja@example.com".into()),
                status: ActivationStatus::Active,
            },
        ];
        let sorted = sort.sorted(&users);
        assert_eq!(sorted[0].name, "Maja");
    }

    #[test]
    fn activation_status_wire_format_is_uppercase() {
        assert_eq!(
            serde_json::to_string(&ActivationStatus::Inactive).unwrap(),
            "\"INACTIVE\""
        );
        let status: ActivationStatus = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(status, ActivationStatus::Active);
    }
}
