//! Environment for the todo reducer: the five remote operations as effects.
//!
//! The reducer never touches the network. It asks the environment for an
//! effect description; the Store runs it and feeds the resulting action back.
//! Swapping the environment is how tests replace the network wholesale.

use crate::types::{ApiOperation, TodoAction};
use std::sync::Arc;
use todoview_api::{NewTodo, Todo, TodoApiClient, TodoId};
use todoview_core::effect::Effect;

/// The remote todo store, seen from the reducer.
///
/// Each method describes one fire-and-forget request. Implementations map
/// success to the matching response action and any failure to
/// [`TodoAction::RequestFailed`]; the reducer never sees a transport error
/// type, only actions.
pub trait TodoApi: Send + Sync {
    /// Fetch the whole collection.
    fn fetch_all(&self) -> Effect<TodoAction>;

    /// Create a record.
    fn create(&self, new_todo: NewTodo) -> Effect<TodoAction>;

    /// Flip a record's completion flag.
    fn toggle(&self, id: TodoId) -> Effect<TodoAction>;

    /// Replace a record wholesale.
    fn replace(&self, todo: Todo) -> Effect<TodoAction>;

    /// Delete a record.
    fn delete(&self, id: TodoId) -> Effect<TodoAction>;
}

/// Production environment backed by [`TodoApiClient`].
#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    client: Arc<TodoApiClient>,
}

impl HttpTodoApi {
    /// Create an environment against the given API base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Arc::new(TodoApiClient::new(base_url)),
        }
    }
}

impl TodoApi for HttpTodoApi {
    fn fetch_all(&self) -> Effect<TodoAction> {
        let client = Arc::clone(&self.client);
        Effect::Future(Box::pin(async move {
            Some(match client.list().await {
                Ok(todos) => TodoAction::Loaded { todos },
                Err(e) => TodoAction::RequestFailed {
                    operation: ApiOperation::List,
                    error: e.to_string(),
                },
            })
        }))
    }

    fn create(&self, new_todo: NewTodo) -> Effect<TodoAction> {
        let client = Arc::clone(&self.client);
        Effect::Future(Box::pin(async move {
            Some(match client.create(&new_todo).await {
                Ok(todo) => TodoAction::Created { todo },
                Err(e) => TodoAction::RequestFailed {
                    operation: ApiOperation::Create,
                    error: e.to_string(),
                },
            })
        }))
    }

    fn toggle(&self, id: TodoId) -> Effect<TodoAction> {
        let client = Arc::clone(&self.client);
        Effect::Future(Box::pin(async move {
            Some(match client.toggle(&id).await {
                Ok(todo) => TodoAction::Toggled { todo },
                Err(e) => TodoAction::RequestFailed {
                    operation: ApiOperation::Toggle,
                    error: e.to_string(),
                },
            })
        }))
    }

    fn replace(&self, todo: Todo) -> Effect<TodoAction> {
        let client = Arc::clone(&self.client);
        Effect::Future(Box::pin(async move {
            Some(match client.replace(&todo).await {
                Ok(updated) => TodoAction::Updated { todo: updated },
                Err(e) => TodoAction::RequestFailed {
                    operation: ApiOperation::Replace,
                    error: e.to_string(),
                },
            })
        }))
    }

    fn delete(&self, id: TodoId) -> Effect<TodoAction> {
        let client = Arc::clone(&self.client);
        Effect::Future(Box::pin(async move {
            Some(match client.delete(&id).await {
                // The response carries no body; the id we captured is the event.
                Ok(()) => TodoAction::Deleted { id },
                Err(e) => TodoAction::RequestFailed {
                    operation: ApiOperation::Delete,
                    error: e.to_string(),
                },
            })
        }))
    }
}
