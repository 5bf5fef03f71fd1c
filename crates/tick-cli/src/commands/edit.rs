use tick_core::models::TodoChanges;
use tick_core::todos::TodoError;
use tick_core::util::today_local;

use crate::commands::common::{open_todo_store, parse_due_date};
use crate::error::CliError;

/// Merge the given flags over the current row and submit the full set of
/// editable fields. Status and id are not editable here.
pub async fn run_edit(
    id: i64,
    title: Option<String>,
    description: Option<String>,
    due: Option<&str>,
) -> Result<(), CliError> {
    if title.is_none() && description.is_none() && due.is_none() {
        return Err(CliError::NothingToEdit);
    }
    let due_date = due.map(parse_due_date).transpose()?;
    let today = today_local();

    let mut store = open_todo_store().await?;
    store.refresh(today).await?;
    let current = store.find(id).ok_or(TodoError::NotFound(id))?.clone();

    let changes = TodoChanges {
        title: title.unwrap_or(current.title),
        description: description.or(current.description),
        due_date: due_date.or(current.due_date),
    };
    store.update(id, changes, today).await?;

    println!("Updated {id}");
    Ok(())
}
