//! Todo list state: fetching, mutations, and the visible snapshot.

pub mod filter;

pub use filter::{filter_todos, matches_search, week_window, TodoFilter};

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{NewTodo, Todo, TodoChanges, TodoStatus};
use crate::rest::{DataError, DataResult, TableClient, TableFilter, TableOrder};
use crate::util::normalize_text_option;

const TODO_TABLE: &str = "todo";

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Todo title must not be empty")]
    EmptyTitle,
    #[error("No todo found with id {0}")]
    NotFound(i64),
    #[error(transparent)]
    Data(#[from] DataError),
}

pub type TodoResult<T> = Result<T, TodoError>;

/// Row operations the list screen needs from the backend.
///
/// Listing always returns rows newest-first; implementations own the
/// ordering so callers cannot forget it.
#[allow(async_fn_in_trait)]
pub trait TodoApi {
    async fn list(&self, filters: &[TableFilter]) -> DataResult<Vec<Todo>>;
    async fn insert(&self, todo: &NewTodo) -> DataResult<()>;
    async fn update(&self, id: i64, changes: &TodoChanges) -> DataResult<()>;
    async fn set_status(&self, id: i64, status: TodoStatus) -> DataResult<()>;
    async fn delete(&self, id: i64) -> DataResult<()>;
}

/// `TodoApi` over the hosted todo table, scoped to one signed-in user's
/// access token.
#[derive(Debug, Clone)]
pub struct TodoTable {
    tables: TableClient,
    access_token: String,
}

impl TodoTable {
    #[must_use]
    pub const fn new(tables: TableClient, access_token: String) -> Self {
        Self {
            tables,
            access_token,
        }
    }

    fn id_filter(id: i64) -> Vec<TableFilter> {
        vec![TableFilter::eq("id", id.to_string())]
    }
}

impl TodoApi for TodoTable {
    async fn list(&self, filters: &[TableFilter]) -> DataResult<Vec<Todo>> {
        self.tables
            .select(
                Some(&self.access_token),
                TODO_TABLE,
                filters,
                Some(&TableOrder::descending("created_at")),
            )
            .await
    }

    async fn insert(&self, todo: &NewTodo) -> DataResult<()> {
        self.tables
            .insert(Some(&self.access_token), TODO_TABLE, todo)
            .await
    }

    async fn update(&self, id: i64, changes: &TodoChanges) -> DataResult<()> {
        self.tables
            .update(
                Some(&self.access_token),
                TODO_TABLE,
                &Self::id_filter(id),
                changes,
            )
            .await
    }

    async fn set_status(&self, id: i64, status: TodoStatus) -> DataResult<()> {
        let patch = serde_json::json!({ "status": status });
        self.tables
            .update(
                Some(&self.access_token),
                TODO_TABLE,
                &Self::id_filter(id),
                &patch,
            )
            .await
    }

    async fn delete(&self, id: i64) -> DataResult<()> {
        self.tables
            .delete(Some(&self.access_token), TODO_TABLE, &Self::id_filter(id))
            .await
    }
}

/// Owns the fetched snapshot plus the active filter and search text.
///
/// Mutations write through the API and then re-fetch the full list under
/// the active filter, successful or not on the fetch side: a failed
/// re-fetch keeps the previous snapshot visible and records the error
/// instead of surfacing it through the mutation.
#[derive(Debug)]
pub struct TodoStore<A: TodoApi> {
    api: A,
    todos: Vec<Todo>,
    filter: TodoFilter,
    search: String,
    loading: bool,
    last_error: Option<String>,
}

impl<A: TodoApi> TodoStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            todos: Vec::new(),
            filter: TodoFilter::default(),
            search: String::new(),
            loading: false,
            last_error: None,
        }
    }

    /// The current snapshot, unfiltered by search.
    #[must_use]
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    #[must_use]
    pub const fn filter(&self) -> TodoFilter {
        self.filter
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The most recent fetch failure, cleared by the next successful fetch.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn find(&self, id: i64) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// The snapshot narrowed by the current search text.
    #[must_use]
    pub fn visible(&self) -> Vec<Todo> {
        filter_todos(&self.todos, &self.search)
    }

    /// Update the search text. Search narrows the existing snapshot; it
    /// never triggers a fetch.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Switch the active filter and re-fetch under it.
    pub async fn apply_filter(&mut self, filter: TodoFilter, today: NaiveDate) -> TodoResult<()> {
        self.filter = filter;
        self.refresh(today).await
    }

    /// Re-fetch the list under the active filter.
    ///
    /// On failure the previous snapshot stays in place; the error is
    /// logged, recorded on `last_error`, and returned.
    pub async fn refresh(&mut self, today: NaiveDate) -> TodoResult<()> {
        self.loading = true;
        let fetched = self.api.list(&self.filter.table_filters(today)).await;
        self.loading = false;

        match fetched {
            Ok(todos) => {
                self.todos = todos;
                self.last_error = None;
                Ok(())
            }
            Err(error) => {
                tracing::warn!("Failed to fetch todos: {error}");
                self.last_error = Some(error.to_string());
                Err(error.into())
            }
        }
    }

    /// Create a todo. The title must survive trimming; a blank due date
    /// defaults to `today`. No request is made for an invalid title.
    pub async fn create(
        &mut self,
        title: &str,
        description: Option<String>,
        due_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> TodoResult<()> {
        let Some(title) = normalize_text_option(Some(title.to_string())) else {
            return Err(TodoError::EmptyTitle);
        };
        let new_todo = NewTodo::new(
            title,
            normalize_text_option(description),
            due_date.unwrap_or(today),
        );

        self.api.insert(&new_todo).await?;
        self.refetch_after_mutation(today).await;
        Ok(())
    }

    /// Rewrite the editable fields of an existing todo.
    pub async fn update(
        &mut self,
        id: i64,
        changes: TodoChanges,
        today: NaiveDate,
    ) -> TodoResult<()> {
        if self.find(id).is_none() {
            return Err(TodoError::NotFound(id));
        }
        let Some(title) = normalize_text_option(Some(changes.title)) else {
            return Err(TodoError::EmptyTitle);
        };
        let changes = TodoChanges {
            title,
            description: normalize_text_option(changes.description),
            due_date: changes.due_date,
        };

        self.api.update(id, &changes).await?;
        self.refetch_after_mutation(today).await;
        Ok(())
    }

    /// Flip a todo between pending and completed.
    ///
    /// The flip is computed from the snapshot row, matching what the caller
    /// is looking at.
    pub async fn toggle(&mut self, id: i64, today: NaiveDate) -> TodoResult<()> {
        let current = self.find(id).ok_or(TodoError::NotFound(id))?;
        let next_status = current.status.toggled();

        self.api.set_status(id, next_status).await?;
        self.refetch_after_mutation(today).await;
        Ok(())
    }

    /// Permanently delete a todo.
    pub async fn delete(&mut self, id: i64, today: NaiveDate) -> TodoResult<()> {
        if self.find(id).is_none() {
            return Err(TodoError::NotFound(id));
        }

        self.api.delete(id).await?;
        self.refetch_after_mutation(today).await;
        Ok(())
    }

    /// The unconditional post-mutation re-fetch. The mutation already
    /// succeeded, so a fetch failure here is recorded but not propagated.
    async fn refetch_after_mutation(&mut self, today: NaiveDate) {
        let _ = self.refresh(today).await;
    }
}
