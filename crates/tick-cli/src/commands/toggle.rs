use tick_core::todos::TodoError;
use tick_core::util::today_local;

use crate::commands::common::open_todo_store;
use crate::error::CliError;

pub async fn run_toggle(id: i64) -> Result<(), CliError> {
    let today = today_local();
    let mut store = open_todo_store().await?;
    store.refresh(today).await?;

    let next = store
        .find(id)
        .ok_or(TodoError::NotFound(id))?
        .status
        .toggled();
    store.toggle(id, today).await?;

    println!("{id} is now {}", next.as_str());
    Ok(())
}
