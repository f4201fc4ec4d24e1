//! GraphQL operation documents and wire types
//!
//! The documents mirror the backend schema: one reusable `BookFields`
//! fragment shared by every operation that returns a book, two queries and
//! three mutations. Variable names match the schema's input arguments.

use bookshelf_core::Book;
use serde::{Deserialize, Serialize};

// ============================================================================
// Documents
// ============================================================================

/// Query returning the full book collection
pub const GET_BOOKS: &str = "\
query GetBooks {
  books {
    ...BookFields
  }
}
fragment BookFields on Book {
  id
  name
  description
  createdAt
  updatedAt
}";

/// Query returning a single book by id
pub const GET_BOOK: &str = "\
query GetBook($id: Int!) {
  book(id: $id) {
    ...BookFields
  }
}
fragment BookFields on Book {
  id
  name
  description
  createdAt
  updatedAt
}";

/// Mutation creating a new book
pub const CREATE_BOOK: &str = "\
mutation CreateBook($createBookInput: CreateBookInput!) {
  createBook(createBookInput: $createBookInput) {
    ...BookFields
  }
}
fragment BookFields on Book {
  id
  name
  description
  createdAt
  updatedAt
}";

/// Mutation updating an existing book
pub const UPDATE_BOOK: &str = "\
mutation UpdateBook($updateBookInput: UpdateBookInput!) {
  updateBook(updateBookInput: $updateBookInput) {
    ...BookFields
  }
}
fragment BookFields on Book {
  id
  name
  description
  createdAt
  updatedAt
}";

/// Mutation deleting a book, returning an acknowledgement flag
pub const DELETE_BOOK: &str = "\
mutation DeleteBook($id: Int!) {
  deleteBook(id: $id)
}";

// ============================================================================
// Request Envelope
// ============================================================================

/// A GraphQL request body: the document plus its variables
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<V: Serialize> {
    pub query: &'static str,
    pub variables: V,
}

impl<V: Serialize> GraphQlRequest<V> {
    pub fn new(query: &'static str, variables: V) -> Self {
        Self { query, variables }
    }
}

// ============================================================================
// Response Envelope
// ============================================================================

/// A single error entry from the GraphQL `errors` array
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// A GraphQL response envelope: `data` on success, `errors` on failure.
///
/// Both can be present; per the GraphQL spec, any `errors` entry means the
/// operation did not complete as requested, so errors take precedence.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    /// Collapse the envelope into the payload or the joined error messages.
    ///
    /// Returns `Err(message)` when the server reported errors and
    /// `Err("...")` with a generic message when the envelope carried neither
    /// data nor errors.
    pub fn into_result(self) -> Result<T, String> {
        if !self.errors.is_empty() {
            let message = self
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(message);
        }

        self.data
            .ok_or_else(|| "Response contained no data".to_string())
    }
}

// ============================================================================
// Operation Payloads
// ============================================================================

/// Payload of the `GetBooks` query
#[derive(Debug, Deserialize)]
pub struct GetBooksData {
    pub books: Vec<Book>,
}

/// Payload of the `GetBook` query
#[derive(Debug, Deserialize)]
pub struct GetBookData {
    pub book: Book,
}

/// Payload of the `CreateBook` mutation
#[derive(Debug, Deserialize)]
pub struct CreateBookData {
    #[serde(rename = "createBook")]
    pub create_book: Book,
}

/// Payload of the `UpdateBook` mutation
#[derive(Debug, Deserialize)]
pub struct UpdateBookData {
    #[serde(rename = "updateBook")]
    pub update_book: Book,
}

/// Payload of the `DeleteBook` mutation
#[derive(Debug, Deserialize)]
pub struct DeleteBookData {
    #[serde(rename = "deleteBook")]
    pub delete_book: bool,
}

// ============================================================================
// Tests
// ============================================================================
