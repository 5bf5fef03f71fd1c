use tick_core::util::today_local;

use crate::cli::ListFilter;
use crate::commands::common::{
    format_todo_lines, open_todo_store, todo_filter, todo_to_list_item, TodoListItem,
};
use crate::error::CliError;

pub async fn run_list(
    filter: ListFilter,
    search: Option<&str>,
    as_json: bool,
) -> Result<(), CliError> {
    let today = today_local();
    let mut store = open_todo_store().await?;
    store.apply_filter(todo_filter(filter), today).await?;
    if let Some(search) = search {
        store.set_search(search);
    }
    let visible = store.visible();

    if as_json {
        let items = visible
            .iter()
            .map(todo_to_list_item)
            .collect::<Vec<TodoListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for line in format_todo_lines(&visible, today) {
            println!("{line}");
        }
    }

    Ok(())
}
