//! Wire types for the remote todo API.

use serde::{Deserialize, Serialize};

/// Server-assigned identifier for a todo.
///
/// The wire shape is `string | number`; the reference backend hands out
/// numeric ids, but the client treats them as opaque either way and never
/// assigns or mutates one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    /// Numeric id
    Number(i64),
    /// Opaque text id
    Text(String),
}

impl TodoId {
    /// Parses user input into an id, preferring the numeric form so that
    /// typed-in ids compare equal to what the server returned.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        input
            .parse::<i64>()
            .map_or_else(|_| Self::Text(input.to_string()), Self::Number)
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A single todo record as the server stores it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Server-assigned identifier
    pub id: TodoId,
    /// Title, non-empty
    pub title: String,
    /// Optional free-form description; `null` and absent both map to `None`
    #[serde(default)]
    pub description: Option<String>,
    /// Completion flag
    pub completed: bool,
}

/// Payload for creating a todo. The server assigns the id and starts the
/// record as not completed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    /// Title, non-empty
    pub title: String,
    /// Description, possibly empty
    pub description: String,
}
