//! List filtering: server-side row criteria and client-side text search.

use chrono::{Datelike, Days, NaiveDate};

use crate::models::{Todo, TodoStatus};
use crate::rest::TableFilter;

/// The mutually exclusive list filters offered by the list screen.
///
/// Date filters compare against the due-date column only; a todo with no
/// due date appears under `All` and the status filters, never under the
/// date windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TodoFilter {
    #[default]
    All,
    Today,
    ThisWeek,
    Completed,
    Pending,
}

impl TodoFilter {
    /// Render the server-side criteria for this filter.
    #[must_use]
    pub fn table_filters(self, today: NaiveDate) -> Vec<TableFilter> {
        match self {
            Self::All => Vec::new(),
            Self::Today => vec![TableFilter::eq("due_date", today.to_string())],
            Self::ThisWeek => {
                let (monday, sunday) = week_window(today);
                vec![
                    TableFilter::gte("due_date", monday.to_string()),
                    TableFilter::lte("due_date", sunday.to_string()),
                ]
            }
            Self::Completed => vec![TableFilter::eq("status", TodoStatus::Completed.as_str())],
            Self::Pending => vec![TableFilter::eq("status", TodoStatus::Pending.as_str())],
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::ThisWeek => "week",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }
}

/// The Monday-through-Sunday calendar week containing `today`.
#[must_use]
pub fn week_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_from_monday = u64::from(today.weekday().num_days_from_monday());
    let monday = today - Days::new(days_from_monday);
    let sunday = monday + Days::new(6);
    (monday, sunday)
}

/// Case-insensitive substring match over title and description.
///
/// A blank query matches everything.
#[must_use]
pub fn matches_search(todo: &Todo, query: &str) -> bool {
    let normalized_query = normalize_query(query);
    if normalized_query.is_empty() {
        return true;
    }
    if todo.title.to_lowercase().contains(&normalized_query) {
        return true;
    }
    todo.description
        .as_ref()
        .is_some_and(|description| description.to_lowercase().contains(&normalized_query))
}

/// Narrow a fetched snapshot down to the todos matching `query`.
#[must_use]
pub fn filter_todos(todos: &[Todo], query: &str) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| matches_search(todo, query))
        .cloned()
        .collect()
}

fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::FilterOp;

    fn date(value: &str) -> NaiveDate {
        value.parse().unwrap()
    }

    fn todo(title: &str, description: Option<&str>) -> Todo {
        Todo {
            id: 1,
            title: title.to_string(),
            description: description.map(ToString::to_string),
            due_date: None,
            status: TodoStatus::Pending,
            created_at: "2024-05-10T08:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn week_window_spans_monday_through_sunday() {
        // 2024-05-15 is a Wednesday.
        let (monday, sunday) = week_window(date("2024-05-15"));
        assert_eq!(monday, date("2024-05-13"));
        assert_eq!(sunday, date("2024-05-19"));
    }

    #[test]
    fn week_window_is_stable_across_the_whole_week() {
        let monday = date("2024-05-13");
        let sunday = date("2024-05-19");
        assert_eq!(week_window(monday), (monday, sunday));
        assert_eq!(week_window(sunday), (monday, sunday));
    }

    #[test]
    fn today_filter_matches_the_due_date_exactly() {
        let filters = TodoFilter::Today.table_filters(date("2024-05-15"));
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].op, FilterOp::Eq);
        assert_eq!(
            filters[0].to_query_pair(),
            ("due_date".to_string(), "eq.2024-05-15".to_string())
        );
    }

    #[test]
    fn this_week_filter_brackets_the_window() {
        let filters = TodoFilter::ThisWeek.table_filters(date("2024-05-15"));
        let pairs = filters
            .iter()
            .map(TableFilter::to_query_pair)
            .collect::<Vec<_>>();
        assert_eq!(
            pairs,
            vec![
                ("due_date".to_string(), "gte.2024-05-13".to_string()),
                ("due_date".to_string(), "lte.2024-05-19".to_string()),
            ]
        );
    }

    #[test]
    fn status_filters_use_the_status_column() {
        let completed = TodoFilter::Completed.table_filters(date("2024-05-15"));
        assert_eq!(
            completed[0].to_query_pair(),
            ("status".to_string(), "eq.completed".to_string())
        );
        let pending = TodoFilter::Pending.table_filters(date("2024-05-15"));
        assert_eq!(
            pending[0].to_query_pair(),
            ("status".to_string(), "eq.pending".to_string())
        );
    }

    #[test]
    fn all_filter_sends_no_criteria() {
        assert!(TodoFilter::All.table_filters(date("2024-05-15")).is_empty());
    }

    #[test]
    fn search_matches_title_or_description_case_insensitively() {
        let todos = vec![
            todo("Project kickoff", None),
            todo("Groceries", Some("for the project dinner")),
            todo("Dentist", None),
        ];

        let matched = filter_todos(&todos, "PROJ");
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].title, "Project kickoff");
        assert_eq!(matched[1].title, "Groceries");
    }

    #[test]
    fn blank_search_matches_everything() {
        let todos = vec![todo("One", None), todo("Two", None)];
        assert_eq!(filter_todos(&todos, "").len(), 2);
        assert_eq!(filter_todos(&todos, "   ").len(), 2);
    }

    #[test]
    fn search_ignores_missing_descriptions() {
        let todos = vec![todo("Call plumber", None)];
        assert!(filter_todos(&todos, "sink").is_empty());
    }
}
