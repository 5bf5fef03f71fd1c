//! Task and profile models mapped to the backend tables.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Completion state of a todo, stored as a lowercase string column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    Pending,
    Completed,
}

impl TodoStatus {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// A todo row as returned by the backend.
///
/// Ids are assigned by the backend sequence; clients never mint them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub status: TodoStatus,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Whether this todo is due exactly on `today`.
    ///
    /// Completed todos are never reported as due; status wins over date.
    #[must_use]
    pub fn is_due_today(&self, today: NaiveDate) -> bool {
        !self.status.is_completed() && is_due_today(self.due_date, today)
    }

    /// Whether this todo's due date has passed.
    ///
    /// Completed todos are never reported as overdue; status wins over date.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_completed() && is_overdue(self.due_date, today)
    }
}

/// True when the due date equals `today`. A missing date is never due.
#[must_use]
pub fn is_due_today(due_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    due_date.is_some_and(|due| due == today)
}

/// True when the due date is strictly before `today`. A missing date, a
/// same-day date, and a future date are all not overdue.
#[must_use]
pub fn is_overdue(due_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    due_date.is_some_and(|due| due < today)
}

/// Insert payload for a new todo. Creation always starts pending and always
/// carries a concrete due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTodo {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub status: TodoStatus,
}

impl NewTodo {
    #[must_use]
    pub const fn new(title: String, description: Option<String>, due_date: NaiveDate) -> Self {
        Self {
            title,
            description,
            due_date,
            status: TodoStatus::Pending,
        }
    }
}

/// Update payload covering exactly the editable columns of a todo.
///
/// Completion state and identity are not editable here; status changes go
/// through a dedicated toggle write. `None` values clear their column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoChanges {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// A user profile row keyed by the auth identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// Insert payload for the profile row written right after sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProfile {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> NaiveDate {
        value.parse().unwrap()
    }

    fn todo(status: TodoStatus, due_date: Option<NaiveDate>) -> Todo {
        Todo {
            id: 1,
            title: "Write report".to_string(),
            description: None,
            due_date,
            status,
            created_at: "2024-05-10T08:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn overdue_requires_strictly_past_due_date() {
        let today = date("2024-05-15");
        assert!(is_overdue(Some(date("2024-05-14")), today));
        assert!(!is_overdue(Some(date("2024-05-15")), today));
        assert!(!is_overdue(Some(date("2024-05-16")), today));
        assert!(!is_overdue(None, today));
    }

    #[test]
    fn due_today_is_an_exact_date_match() {
        let today = date("2024-05-15");
        assert!(is_due_today(Some(date("2024-05-15")), today));
        assert!(!is_due_today(Some(date("2024-05-14")), today));
        assert!(!is_due_today(None, today));
    }

    #[test]
    fn completed_todos_are_never_overdue_or_due_today() {
        let today = date("2024-05-15");
        let completed = todo(TodoStatus::Completed, Some(date("2024-05-01")));
        assert!(!completed.is_overdue(today));

        let completed_today = todo(TodoStatus::Completed, Some(today));
        assert!(!completed_today.is_due_today(today));

        let pending = todo(TodoStatus::Pending, Some(date("2024-05-01")));
        assert!(pending.is_overdue(today));
    }

    #[test]
    fn status_serializes_as_lowercase_column_value() {
        assert_eq!(
            serde_json::to_string(&TodoStatus::Pending).unwrap(),
            "\"pending\""
        );
        let parsed: TodoStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, TodoStatus::Completed);
        assert_eq!(TodoStatus::Pending.as_str(), "pending");
    }

    #[test]
    fn toggled_flips_between_states() {
        assert_eq!(TodoStatus::Pending.toggled(), TodoStatus::Completed);
        assert_eq!(TodoStatus::Completed.toggled(), TodoStatus::Pending);
    }

    #[test]
    fn todo_deserializes_a_backend_row() {
        let row = r#"{
            "id": 42,
            "title": "Buy milk",
            "description": null,
            "due_date": "2024-05-15",
            "status": "pending",
            "created_at": "2024-05-14T09:30:00+00:00"
        }"#;
        let todo: Todo = serde_json::from_str(row).unwrap();
        assert_eq!(todo.id, 42);
        assert_eq!(todo.due_date, Some(date("2024-05-15")));
        assert_eq!(todo.status, TodoStatus::Pending);
        assert!(todo.description.is_none());
    }

    #[test]
    fn new_todo_starts_pending() {
        let new_todo = NewTodo::new("Buy milk".to_string(), None, date("2024-05-15"));
        assert_eq!(new_todo.status, TodoStatus::Pending);

        let payload = serde_json::to_value(&new_todo).unwrap();
        assert_eq!(payload["title"], "Buy milk");
        assert_eq!(payload["due_date"], "2024-05-15");
        assert_eq!(payload["status"], "pending");
        assert!(payload.get("description").is_none());
    }

    #[test]
    fn todo_changes_covers_only_editable_columns() {
        let changes = TodoChanges {
            title: "Buy oat milk".to_string(),
            description: None,
            due_date: Some(date("2024-05-16")),
        };
        let payload = serde_json::to_value(&changes).unwrap();
        let object = payload.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object.contains_key("title"));
        assert!(object.contains_key("description"));
        assert!(object.contains_key("due_date"));
        assert!(object["description"].is_null());
    }
}
