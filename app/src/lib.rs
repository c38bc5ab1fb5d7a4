//! Todo client built on the todoview architecture.
//!
//! The view state (collection, filter, edit session) lives in a
//! [`TodoState`] snapshot; every user intent and every server response is a
//! [`TodoAction`]; [`TodoReducer`] is the single pure transition function.
//! Requests reach the network only as effect descriptions built by a
//! [`TodoApi`] environment, so the whole business logic runs and tests
//! without one.
//!
//! # Quick Start
//!
//! ```no_run
//! use todoview_app::{HttpTodoApi, TodoAction, TodoReducer, TodoState};
//! use todoview_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = HttpTodoApi::new("http://localhost:8080/api");
//! let store = Store::new(TodoState::new(), TodoReducer::new(), api);
//!
//! // Fetch the collection and wait for the round-trip to settle.
//! let mut handle = store.send(TodoAction::LoadAll).await?;
//! handle.wait().await;
//!
//! let stats = store.state(TodoState::stats).await;
//! println!("{} todos, {} still open", stats.total, stats.active);
//! # Ok(())
//! # }
//! ```

pub mod environment;
pub mod reducer;
pub mod types;

// Re-export commonly used types
pub use environment::{HttpTodoApi, TodoApi};
pub use reducer::TodoReducer;
pub use types::{
    ApiOperation, DraftField, EditDraft, EditSession, Filter, Stats, TodoAction, TodoState,
};
