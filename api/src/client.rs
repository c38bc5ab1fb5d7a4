//! Todo API client implementation.

use crate::error::TodoApiError;
use crate::types::{NewTodo, Todo, TodoId};
use reqwest::{Client, Response, StatusCode};

/// Client for a remote todo collection.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct TodoApiClient {
    client: Client,
    base_url: String,
}

impl TodoApiClient {
    /// Create a new client against the given base URL, e.g.
    /// `http://localhost:8080/api`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the full collection, in server order.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails to complete, the status is
    /// unexpected, or the body does not parse as a todo array.
    pub async fn list(&self) -> Result<Vec<Todo>, TodoApiError> {
        let response = self
            .client
            .get(format!("{}/todos", self.base_url))
            .send()
            .await
            .map_err(|e| TodoApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<Vec<Todo>>()
                .await
                .map_err(|e| TodoApiError::ResponseParseFailed(e.to_string())),
            _ => Err(Self::error_for(response).await),
        }
    }

    /// Create a new todo. The server assigns the id and `completed = false`.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails to complete, the status is
    /// unexpected, or the body does not parse as a todo.
    pub async fn create(&self, new_todo: &NewTodo) -> Result<Todo, TodoApiError> {
        let response = self
            .client
            .post(format!("{}/todos", self.base_url))
            .json(new_todo)
            .send()
            .await
            .map_err(|e| TodoApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => response
                .json::<Todo>()
                .await
                .map_err(|e| TodoApiError::ResponseParseFailed(e.to_string())),
            _ => Err(Self::error_for(response).await),
        }
    }

    /// Flip a todo's completion flag server-side.
    ///
    /// # Errors
    ///
    /// Returns [`TodoApiError::NotFound`] when the record no longer exists,
    /// and the usual transport/parse errors otherwise.
    pub async fn toggle(&self, id: &TodoId) -> Result<Todo, TodoApiError> {
        let response = self
            .client
            .patch(format!("{}/todos/{id}/toggle", self.base_url))
            .send()
            .await
            .map_err(|e| TodoApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<Todo>()
                .await
                .map_err(|e| TodoApiError::ResponseParseFailed(e.to_string())),
            _ => Err(Self::error_for(response).await),
        }
    }

    /// Replace a record wholesale with the given body.
    ///
    /// # Errors
    ///
    /// Returns [`TodoApiError::NotFound`] when the record no longer exists,
    /// and the usual transport/parse errors otherwise.
    pub async fn replace(&self, todo: &Todo) -> Result<Todo, TodoApiError> {
        let response = self
            .client
            .put(format!("{}/todos/{}", self.base_url, todo.id))
            .json(todo)
            .send()
            .await
            .map_err(|e| TodoApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<Todo>()
                .await
                .map_err(|e| TodoApiError::ResponseParseFailed(e.to_string())),
            _ => Err(Self::error_for(response).await),
        }
    }

    /// Delete a record. Success carries no body.
    ///
    /// # Errors
    ///
    /// Returns [`TodoApiError::NotFound`] when the record no longer exists,
    /// and transport errors otherwise.
    pub async fn delete(&self, id: &TodoId) -> Result<(), TodoApiError> {
        let response = self
            .client
            .delete(format!("{}/todos/{id}", self.base_url))
            .send()
            .await
            .map_err(|e| TodoApiError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
            _ => Err(Self::error_for(response).await),
        }
    }

    async fn error_for(response: Response) -> TodoApiError {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return TodoApiError::NotFound;
        }
        let message = response.text().await.unwrap_or_default();
        TodoApiError::UnexpectedStatus {
            status: status.as_u16(),
            message,
        }
    }
}
