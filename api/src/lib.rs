//! # Todoview API
//!
//! Wire types and HTTP client for the remote todo store.
//!
//! The remote API owns every record: ids are assigned server-side, mutations
//! happen server-side, and this crate only translates five intents into
//! requests and parses the JSON that comes back. There is no queuing, no
//! retry, and no cancellation: each call is a single request/response pair,
//! and callers decide what a failure means.
//!
//! | Operation | Request |
//! |---|---|
//! | [`TodoApiClient::list`] | `GET {base}/todos` |
//! | [`TodoApiClient::create`] | `POST {base}/todos` |
//! | [`TodoApiClient::toggle`] | `PATCH {base}/todos/{id}/toggle` |
//! | [`TodoApiClient::replace`] | `PUT {base}/todos/{id}` |
//! | [`TodoApiClient::delete`] | `DELETE {base}/todos/{id}` |

pub mod client;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use client::TodoApiClient;
pub use error::TodoApiError;
pub use types::{NewTodo, Todo, TodoId};
