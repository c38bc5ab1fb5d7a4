//! View state and actions for the todo client.
//!
//! The snapshot a user sees is exactly three things: the collection as last
//! reported by the server, the active filter, and an optional edit session.
//! Everything else (visible list, counters) is derived on demand.

use todoview_api::{Todo, TodoId};

/// Which part of the collection the view shows. Pure UI state, never sent to
/// the server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    /// Every record
    #[default]
    All,
    /// Records not yet completed
    Active,
    /// Completed records
    Completed,
}

impl Filter {
    /// Parses user input (`all`, `active`, `completed`).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Whether a record passes this filter.
    #[must_use]
    pub const fn admits(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// The two editable fields of a draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    /// The title field
    Title,
    /// The description field
    Description,
}

/// Unsaved title/description text for the record being edited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditDraft {
    /// Draft title; must be non-empty to commit
    pub title: String,
    /// Draft description; empty stands in for "no description"
    pub description: String,
}

/// An in-progress edit of a single record. At most one exists at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSession {
    /// Id of the record being edited
    pub id: TodoId,
    /// The unsaved field values
    pub draft: EditDraft,
}

/// Derived counters over the collection. Never stored; recompute via
/// [`TodoState::stats`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stats {
    /// All records
    pub total: usize,
    /// Records with `completed == false`
    pub active: usize,
    /// Records with `completed == true`
    pub completed: usize,
}

/// Which remote operation a failure report belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiOperation {
    /// GET the collection
    List,
    /// POST a new record
    Create,
    /// PATCH a record's completion flag
    Toggle,
    /// PUT a full record
    Replace,
    /// DELETE a record
    Delete,
}

impl std::fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Create => write!(f, "create"),
            Self::Toggle => write!(f, "toggle"),
            Self::Replace => write!(f, "replace"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// The local snapshot: collection, filter, edit session.
///
/// The collection keeps server response order; ids are trusted to be unique
/// because the server assigns them. Nothing outside the reducer mutates this.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoState {
    /// Records as last reported by the server, in server order
    pub todos: Vec<Todo>,
    /// Active view filter
    pub filter: Filter,
    /// In-progress edit, if any
    pub edit: Option<EditSession>,
}

impl TodoState {
    /// Creates an empty snapshot with the default filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn find(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    /// Whether an edit session for `id` is active.
    #[must_use]
    pub fn is_editing(&self, id: &TodoId) -> bool {
        self.edit.as_ref().is_some_and(|e| &e.id == id)
    }

    /// Records passing the active filter, collection order preserved.
    ///
    /// Recomputed on every call; the collection is small and caching would
    /// just add invalidation rules.
    #[must_use]
    pub fn visible(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| self.filter.admits(t)).collect()
    }

    /// Derived counters; `total == active + completed` always.
    #[must_use]
    pub fn stats(&self) -> Stats {
        let completed = self.todos.iter().filter(|t| t.completed).count();
        Stats {
            total: self.todos.len(),
            active: self.todos.len() - completed,
            completed,
        }
    }
}

/// Every input the reducer processes: user intents and the server responses
/// that effects feed back.
///
/// Intents may issue requests (as effect descriptions) but never change the
/// collection; responses are the only events that do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== User intents ==========
    /// Fetch the whole collection from the server
    LoadAll,

    /// Create a record; empty title means no-op, no request
    AddNew {
        /// Title for the new record
        title: String,
        /// Description, possibly empty
        description: String,
    },

    /// Flip a record's completion flag server-side
    Toggle {
        /// Target record
        id: TodoId,
    },

    /// Delete a record server-side
    Delete {
        /// Target record
        id: TodoId,
    },

    /// Switch the view filter; purely local, immediate
    SetFilter {
        /// The filter to activate
        filter: Filter,
    },

    /// Start editing a record, copying its fields into a fresh draft and
    /// discarding any prior session
    BeginEdit {
        /// Record to edit
        id: TodoId,
    },

    /// Change one draft field; no-op without an active session
    UpdateDraft {
        /// Which field to change
        field: DraftField,
        /// New text
        value: String,
    },

    /// Save the draft: replace the record server-side with the merged body
    CommitEdit,

    /// Drop the session without a request
    CancelEdit,

    // ========== Server responses ==========
    /// List succeeded: replace the collection wholesale
    Loaded {
        /// Records in server order
        todos: Vec<Todo>,
    },

    /// Create succeeded: append the record
    Created {
        /// The record with its server-assigned id
        todo: Todo,
    },

    /// Toggle succeeded: replace the matching record in place
    Toggled {
        /// The record with its flag flipped
        todo: Todo,
    },

    /// Replace succeeded: replace the matching record in place and close the
    /// edit session
    Updated {
        /// The updated record
        todo: Todo,
    },

    /// Delete succeeded: remove the record by id
    Deleted {
        /// Id of the removed record
        id: TodoId,
    },

    /// A request failed to complete or parse; logged and otherwise inert
    RequestFailed {
        /// Which operation failed
        operation: ApiOperation,
        /// What went wrong, for diagnostics only
        error: String,
    },
}
