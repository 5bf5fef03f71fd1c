use tick_core::util::today_local;

use crate::commands::common::{open_todo_store, parse_due_date};
use crate::error::CliError;

pub async fn run_add(
    title_parts: &[String],
    description: Option<String>,
    due: Option<&str>,
) -> Result<(), CliError> {
    let due_date = due.map(parse_due_date).transpose()?;
    let title = title_parts.join(" ");

    let mut store = open_todo_store().await?;
    store
        .create(&title, description, due_date, today_local())
        .await?;

    println!("Added \"{}\"", title.trim());
    Ok(())
}
