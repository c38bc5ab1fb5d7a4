//! The view-state reducer: every transition the todo client knows.
//!
//! User intents validate locally and describe requests; server responses are
//! the only events that change the collection. Failures are logged and
//! swallowed: no rollback, no retry, no user-visible error state.

use crate::environment::TodoApi;
use crate::types::{DraftField, EditDraft, EditSession, TodoAction, TodoState};
use todoview_api::{NewTodo, Todo};
use todoview_core::effect::Effects;
use todoview_core::reducer::Reducer;
use todoview_core::smallvec;

/// Reducer for the todo view state.
///
/// Generic over the environment so tests can swap the network for a
/// recording stub.
#[derive(Debug, Clone, Copy)]
pub struct TodoReducer<E> {
    _phantom: std::marker::PhantomData<E>,
}

impl<E> TodoReducer<E> {
    /// Creates a new reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<E> Default for TodoReducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TodoReducer<E> {
    /// Replaces the record with `todo.id` in place, preserving its position.
    /// Silently a no-op when the id is gone (deleted while the request was in
    /// flight; accepted race).
    fn replace_one(state: &mut TodoState, todo: Todo) {
        match state.todos.iter_mut().find(|t| t.id == todo.id) {
            Some(slot) => *slot = todo,
            None => {
                tracing::debug!(id = %todo.id, "stale update for a record no longer present");
            }
        }
    }
}

impl<E: TodoApi> Reducer for TodoReducer<E> {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            // ========== User intents ==========
            TodoAction::LoadAll => smallvec![env.fetch_all()],

            TodoAction::AddNew { title, description } => {
                if title.trim().is_empty() {
                    tracing::debug!("ignoring add with empty title");
                    return Effects::new();
                }
                smallvec![env.create(NewTodo { title, description })]
            }

            // Issued without checking local presence: requests are keyed by
            // id, and a record deleted under us just yields a failed request.
            TodoAction::Toggle { id } => smallvec![env.toggle(id)],

            TodoAction::Delete { id } => smallvec![env.delete(id)],

            TodoAction::SetFilter { filter } => {
                state.filter = filter;
                Effects::new()
            }

            TodoAction::BeginEdit { id } => {
                match state.find(&id) {
                    Some(todo) => {
                        // Overwrites any prior session: switching targets
                        // discards the unsaved draft without a request.
                        state.edit = Some(EditSession {
                            id,
                            draft: EditDraft {
                                title: todo.title.clone(),
                                description: todo.description.clone().unwrap_or_default(),
                            },
                        });
                    }
                    None => {
                        tracing::debug!(%id, "cannot edit an unknown record");
                    }
                }
                Effects::new()
            }

            TodoAction::UpdateDraft { field, value } => {
                if let Some(edit) = &mut state.edit {
                    match field {
                        DraftField::Title => edit.draft.title = value,
                        DraftField::Description => edit.draft.description = value,
                    }
                }
                Effects::new()
            }

            TodoAction::CommitEdit => {
                let Some(edit) = &state.edit else {
                    return Effects::new();
                };
                if edit.draft.title.trim().is_empty() {
                    tracing::debug!("ignoring commit with empty draft title");
                    return Effects::new();
                }
                match state.find(&edit.id) {
                    Some(current) => {
                        // Merge: draft fields over the local copy of the
                        // record, id and completion flag untouched.
                        let merged = Todo {
                            id: current.id.clone(),
                            title: edit.draft.title.clone(),
                            description: Some(edit.draft.description.clone()),
                            completed: current.completed,
                        };
                        smallvec![env.replace(merged)]
                    }
                    None => {
                        // The record was deleted while being edited; there is
                        // nothing left to replace, so the stale session goes.
                        tracing::debug!(id = %edit.id, "edited record vanished, dropping session");
                        state.edit = None;
                        Effects::new()
                    }
                }
            }

            TodoAction::CancelEdit => {
                state.edit = None;
                Effects::new()
            }

            // ========== Server responses ==========
            TodoAction::Loaded { todos } => {
                state.todos = todos;
                Effects::new()
            }

            TodoAction::Created { todo } => {
                state.todos.push(todo);
                Effects::new()
            }

            TodoAction::Toggled { todo } => {
                Self::replace_one(state, todo);
                Effects::new()
            }

            TodoAction::Updated { todo } => {
                Self::replace_one(state, todo);
                // The commit round-trip finished: close whatever session is
                // active, even one switched-to while the request was in
                // flight (last-applied-wins).
                state.edit = None;
                Effects::new()
            }

            TodoAction::Deleted { id } => {
                state.todos.retain(|t| t.id != id);
                // An edit session pointing at the removed id stays active on
                // purpose; CommitEdit resolves it.
                Effects::new()
            }

            TodoAction::RequestFailed { operation, error } => {
                tracing::warn!(%operation, %error, "request failed; view left as-is");
                Effects::new()
            }
        }
    }
}
