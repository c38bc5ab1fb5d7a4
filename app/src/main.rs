//! Interactive console shell for the todo client.
//!
//! A line-oriented view over the store: each command becomes an action, the
//! shell waits for the action's round-trip to settle, then re-renders the
//! visible list and counters from the store snapshot.
//!
//! Run with an optional API base URL (default `http://localhost:8080/api`):
//!
//! ```bash
//! cargo run --bin todoview -- http://localhost:8080/api
//! ```

use std::io::{self, BufRead, Write};
use std::time::Duration;
use todoview_api::TodoId;
use todoview_app::{DraftField, Filter, HttpTodoApi, TodoAction, TodoReducer, TodoState};
use todoview_runtime::Store;
use tracing_subscriber::EnvFilter;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// How long a command waits for its round-trip before giving the prompt back.
/// The request itself is never cancelled; a late response still applies.
const REQUEST_WAIT: Duration = Duration::from_secs(10);

type TodoStore = Store<TodoState, TodoAction, HttpTodoApi, TodoReducer<HttpTodoApi>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let api = HttpTodoApi::new(base_url.clone());
    let store = Store::new(TodoState::new(), TodoReducer::new(), api);

    println!("todoview - remote todo list at {base_url}");
    println!("Type 'help' for commands.\n");

    dispatch(&store, TodoAction::LoadAll).await;
    render(&store).await;

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "help" | "h" => print_help(),
            "quit" | "q" | "exit" => break,
            "list" | "ls" => render(&store).await,
            "refresh" | "r" => {
                dispatch(&store, TodoAction::LoadAll).await;
                render(&store).await;
            }
            "stats" => {
                let stats = store.state(TodoState::stats).await;
                println!(
                    "Total: {}  Active: {}  Completed: {}",
                    stats.total, stats.active, stats.completed
                );
            }
            "add" => {
                if rest.is_empty() {
                    println!("usage: add <title> [-- <description>]");
                    continue;
                }
                let (title, description) = split_description(rest);
                dispatch(&store, TodoAction::AddNew { title, description }).await;
                render(&store).await;
            }
            "toggle" | "t" => match parse_id(rest) {
                Some(id) => {
                    dispatch(&store, TodoAction::Toggle { id }).await;
                    render(&store).await;
                }
                None => println!("usage: toggle <id>"),
            },
            "delete" | "rm" => match parse_id(rest) {
                Some(id) => {
                    dispatch(&store, TodoAction::Delete { id }).await;
                    render(&store).await;
                }
                None => println!("usage: delete <id>"),
            },
            "filter" => match Filter::parse(rest) {
                Some(filter) => {
                    dispatch(&store, TodoAction::SetFilter { filter }).await;
                    render(&store).await;
                }
                None => println!("usage: filter all|active|completed"),
            },
            "edit" => match parse_id(rest) {
                Some(id) => {
                    dispatch(&store, TodoAction::BeginEdit { id }).await;
                    show_edit(&store).await;
                }
                None => println!("usage: edit <id>"),
            },
            "title" => {
                dispatch(
                    &store,
                    TodoAction::UpdateDraft {
                        field: DraftField::Title,
                        value: rest.to_string(),
                    },
                )
                .await;
                show_edit(&store).await;
            }
            "desc" => {
                dispatch(
                    &store,
                    TodoAction::UpdateDraft {
                        field: DraftField::Description,
                        value: rest.to_string(),
                    },
                )
                .await;
                show_edit(&store).await;
            }
            "save" => {
                dispatch(&store, TodoAction::CommitEdit).await;
                render(&store).await;
            }
            "cancel" => {
                dispatch(&store, TodoAction::CancelEdit).await;
                println!("(edit cancelled)");
            }
            _ => println!("unknown command '{command}'; type 'help'"),
        }
    }

    if let Err(error) = store.shutdown(Duration::from_secs(5)).await {
        println!("(shutdown incomplete: {error})");
    }
    println!("Goodbye!");
    Ok(())
}

/// Send an action and wait for its effects to settle before re-rendering.
async fn dispatch(store: &TodoStore, action: TodoAction) {
    match store.send(action).await {
        Ok(mut handle) => {
            if handle.wait_with_timeout(REQUEST_WAIT).await.is_err() {
                println!("(request still pending; the view may be stale)");
            }
        }
        Err(error) => println!("(action not accepted: {error})"),
    }
}

/// Print the visible list and counters for the current snapshot.
async fn render(store: &TodoStore) {
    let state = store.state(Clone::clone).await;
    let stats = state.stats();
    println!(
        "Total: {}  Active: {}  Completed: {}   (filter: {})",
        stats.total, stats.active, stats.completed, state.filter
    );

    let visible = state.visible();
    if visible.is_empty() {
        println!("No todos yet!");
        return;
    }
    for todo in visible {
        let mark = if todo.completed { "x" } else { " " };
        let mut line = format!("  [{mark}] {}: {}", todo.id, todo.title);
        if let Some(description) = &todo.description {
            if !description.is_empty() {
                line.push_str(&format!(" - {description}"));
            }
        }
        if state.is_editing(&todo.id) {
            line.push_str("  (editing)");
        }
        println!("{line}");
    }
}

/// Print the active edit session, if any.
async fn show_edit(store: &TodoStore) {
    match store.state(|s| s.edit.clone()).await {
        Some(edit) => println!(
            "(editing {}: title '{}', description '{}')",
            edit.id, edit.draft.title, edit.draft.description
        ),
        None => println!("(no edit in progress)"),
    }
}

/// Parse a non-empty id argument.
fn parse_id(rest: &str) -> Option<TodoId> {
    if rest.is_empty() {
        None
    } else {
        Some(TodoId::parse(rest))
    }
}

/// Split `title -- description`; everything is title when the separator is
/// absent.
fn split_description(rest: &str) -> (String, String) {
    match rest.split_once(" -- ") {
        Some((title, description)) => (title.trim().to_string(), description.trim().to_string()),
        None => (rest.to_string(), String::new()),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  list | ls                  show the visible list");
    println!("  refresh | r                re-fetch from the server");
    println!("  add <title> [-- <desc>]    create a todo");
    println!("  toggle | t <id>            flip completion");
    println!("  delete | rm <id>           delete a todo");
    println!("  filter all|active|completed");
    println!("  edit <id>                  start editing");
    println!("  title <text>               change the draft title");
    println!("  desc <text>                change the draft description");
    println!("  save                       commit the draft");
    println!("  cancel                     discard the draft");
    println!("  stats                      show counters");
    println!("  quit | q                   exit");
}
