use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tick_core::rest::TableClient;
use tick_core::route::{protected_route, GateDecision};
use tick_core::todos::{TodoFilter, TodoStore, TodoTable};
use tick_core::{Todo, TodoStatus};

use crate::auth::{backend_config, session_manager};
use crate::cli::ListFilter;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct TodoListItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: &'static str,
    pub created_at: String,
    pub relative_created: String,
}

/// Gate a todo command: restore the persisted session and build a store
/// bound to its access token.
pub async fn open_todo_store() -> Result<TodoStore<TodoTable>, CliError> {
    let config = backend_config()?;
    let manager = session_manager(&config)?;
    manager.initialize().await;

    let state = manager.state();
    if !matches!(protected_route(&state), GateDecision::Authenticated) {
        return Err(CliError::NotSignedIn);
    }
    let session = state.session.ok_or(CliError::NotSignedIn)?;
    tracing::debug!("Using session for user {}", session.user.id);

    let tables = TableClient::new(&config.url, config.anon_key)?;
    Ok(TodoStore::new(TodoTable::new(tables, session.access_token)))
}

pub const fn todo_filter(filter: ListFilter) -> TodoFilter {
    match filter {
        ListFilter::All => TodoFilter::All,
        ListFilter::Today => TodoFilter::Today,
        ListFilter::Week => TodoFilter::ThisWeek,
        ListFilter::Completed => TodoFilter::Completed,
        ListFilter::Pending => TodoFilter::Pending,
    }
}

pub fn parse_due_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::InvalidDate(raw.trim().to_string()))
}

pub fn format_todo_lines(todos: &[Todo], today: NaiveDate) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    todos
        .iter()
        .map(|todo| {
            let marker = status_marker(todo.status);
            let title = title_preview(&todo.title, 40);
            let due = render_due_label(todo, today);
            let relative = format_relative_time(todo.created_at.timestamp_millis(), now_ms);
            format!("{:>5}  {marker}  {title:<40}  {due:<19}  {relative}", todo.id)
        })
        .collect()
}

pub fn todo_to_list_item(todo: &Todo) -> TodoListItem {
    let now_ms = Utc::now().timestamp_millis();
    TodoListItem {
        id: todo.id,
        title: todo.title.clone(),
        description: todo.description.clone(),
        due_date: todo.due_date,
        status: todo.status.as_str(),
        created_at: todo.created_at.to_rfc3339(),
        relative_created: format_relative_time(todo.created_at.timestamp_millis(), now_ms),
    }
}

pub const fn status_marker(status: TodoStatus) -> &'static str {
    if status.is_completed() {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Due-date column label. Open todos are annotated when due today or past
/// due; completed todos show the bare date.
pub fn render_due_label(todo: &Todo, today: NaiveDate) -> String {
    match todo.due_date {
        None => "-".to_string(),
        Some(date) if todo.is_due_today(today) => format!("{date} (today)"),
        Some(date) if todo.is_overdue(today) => format!("{date} (overdue)"),
        Some(date) => date.to_string(),
    }
}

pub fn title_preview(title: &str, max_chars: usize) -> String {
    let first_line = title.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}
