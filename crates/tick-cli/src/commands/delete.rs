use tick_core::util::today_local;

use crate::commands::common::open_todo_store;
use crate::error::CliError;

pub async fn run_delete(id: i64) -> Result<(), CliError> {
    let today = today_local();
    let mut store = open_todo_store().await?;
    store.refresh(today).await?;
    store.delete(id, today).await?;

    println!("Deleted {id}");
    Ok(())
}
