//! Type-safe GraphQL client for the Bookshelf backend.
//!
//! The client wraps a `reqwest::Client` and exposes one method per operation:
//! `list_books()`, `get_book(id)`, `create_book(input)`, `update_book(input)`
//! and `delete_book(id)`.
//!
//! All methods return `Result<T, ClientError>` where `T` is the expected
//! payload type. When a bearer token is set, every request carries an
//! `Authorization: Bearer <token>` header; without one the header is omitted
//! and the server is expected to reject the call with an auth error.

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use bookshelf_core::{Book, CreateBookInput, UpdateBookInput};

use crate::operations::{
    CREATE_BOOK, CreateBookData, DELETE_BOOK, DeleteBookData, GET_BOOK, GET_BOOKS, GetBookData,
    GetBooksData, GraphQlRequest, GraphQlResponse, UPDATE_BOOK, UpdateBookData,
};

// ============================================================================
// Error Type
// ============================================================================

/// Errors that can occur when talking to the GraphQL API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (network error, timeout, etc.).
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server reported an error (GraphQL `errors` or a non-success status).
    #[error("API error: {message}")]
    Api {
        /// Human-readable error message from the response.
        message: String,
    },

    /// Failed to deserialise the response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    /// Create an `Api` error from a server-reported message.
    fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Whether this is a server-reported API error.
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Get the user-facing error message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Request(e) => {
                if e.is_timeout() {
                    "Request timed out. Please try again.".to_string()
                } else if e.is_connect() {
                    "Unable to connect to the server. Please check your connection.".to_string()
                } else {
                    "An unexpected network error occurred.".to_string()
                }
            }
            Self::Api { message } => message.clone(),
            Self::Parse(_) => "Received an unexpected response from the server.".to_string(),
        }
    }
}

// ============================================================================
// API Client
// ============================================================================

/// GraphQL client for the Bookshelf backend.
///
/// # Example
///
/// ```rust,ignore
/// let client = ApiClient::new("http://localhost:4000/graphql").with_token(token);
/// let books = client.list_books().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The underlying reqwest HTTP client.
    client: Client,
    /// URL of the GraphQL endpoint.
    endpoint: String,
    /// Optional bearer token for authenticated requests.
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client for the given GraphQL endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("failed to create HTTP client"),
            endpoint: endpoint.into(),
            token: None,
        }
    }

    /// Set the bearer token used for authenticated requests.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Clear the bearer token.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Whether a bearer token is currently set.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// The GraphQL endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    // ========================================================================
    // Generic request helper
    // ========================================================================

    /// Execute a GraphQL operation and unwrap its response envelope.
    async fn execute<V: Serialize, T: DeserializeOwned>(
        &self,
        query: &'static str,
        variables: V,
    ) -> Result<T, ClientError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest::new(query, variables));

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: GraphQlResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(ClientError::Parse(e.to_string()));
            }
            // Non-success status with a body that is not a GraphQL envelope
            Err(_) => {
                return Err(ClientError::api(format!(
                    "Server returned status {}",
                    status.as_u16()
                )));
            }
        };

        envelope.into_result().map_err(ClientError::api)
    }

    // ========================================================================
    // Book operations
    // ========================================================================

    /// Fetch the full book collection.
    pub async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        let data: GetBooksData = self.execute(GET_BOOKS, serde_json::json!({})).await?;
        Ok(data.books)
    }

    /// Fetch a single book by id.
    pub async fn get_book(&self, id: i64) -> Result<Book, ClientError> {
        let data: GetBookData = self.execute(GET_BOOK, serde_json::json!({ "id": id })).await?;
        Ok(data.book)
    }

    /// Create a new book.
    pub async fn create_book(&self, input: &CreateBookInput) -> Result<Book, ClientError> {
        let data: CreateBookData = self
            .execute(CREATE_BOOK, serde_json::json!({ "createBookInput": input }))
            .await?;
        Ok(data.create_book)
    }

    /// Update an existing book.
    pub async fn update_book(&self, input: &UpdateBookInput) -> Result<Book, ClientError> {
        let data: UpdateBookData = self
            .execute(UPDATE_BOOK, serde_json::json!({ "updateBookInput": input }))
            .await?;
        Ok(data.update_book)
    }

    /// Delete a book by id. Returns the server's acknowledgement flag.
    pub async fn delete_book(&self, id: i64) -> Result<bool, ClientError> {
        let data: DeleteBookData = self
            .execute(DELETE_BOOK, serde_json::json!({ "id": id }))
            .await?;
        Ok(data.delete_book)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_starts_without_token() {
        let client = ApiClient::new("http://localhost:4000/graphql");
        assert!(!client.has_token());
        assert_eq!(client.endpoint(), "http://localhost:4000/graphql");
    }

    #[test]
    fn test_with_token_and_clear() {
        let mut client = ApiClient::new("http://localhost:4000/graphql").with_token("abc123");
        assert!(client.has_token());

        client.clear_token();
        assert!(!client.has_token());
    }

    #[test]
    fn test_api_error_message() {
        let err = ClientError::api("Not found");
        assert!(err.is_api());
        assert_eq!(err.to_string(), "API error: Not found");
        assert_eq!(err.user_message(), "Not found");
    }

    #[test]
    fn test_parse_error_user_message() {
        let err = ClientError::Parse("expected value at line 1".to_string());
        assert!(!err.is_api());
        assert_eq!(
            err.user_message(),
            "Received an unexpected response from the server."
        );
    }

    #[test]
    fn test_create_variables_shape() {
        let input = CreateBookInput::from_form("Dune", "Sci-fi novel");
        let variables = serde_json::json!({ "createBookInput": input });

        assert_eq!(variables["createBookInput"]["name"], "Dune");
        assert_eq!(variables["createBookInput"]["description"], "Sci-fi novel");
    }

    #[test]
    fn test_update_variables_shape() {
        let input = UpdateBookInput::from_form(5, "Dune", "Updated");
        let variables = serde_json::json!({ "updateBookInput": input });

        assert_eq!(variables["updateBookInput"]["id"], 5);
        assert_eq!(variables["updateBookInput"]["name"], "Dune");
    }
}
