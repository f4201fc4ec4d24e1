//! Core types used throughout Bookshelf
//!
//! This module contains the entity and input types shared between the API
//! client and the UI, matching the GraphQL schema of the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Book Entity
// ============================================================================

/// A book record as returned by the GraphQL API.
///
/// The identifier and both timestamps are server-assigned and immutable from
/// the client's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server-assigned unique identifier (never reused)
    pub id: i64,
    /// Book title (non-empty)
    pub name: String,
    /// Book description (non-empty)
    pub description: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Creation date formatted for table display, e.g. "Mar 4, 2026"
    pub fn created_display(&self) -> String {
        format_date(&self.created_at)
    }

    /// Last-update date formatted for table display
    pub fn updated_display(&self) -> String {
        format_date(&self.updated_at)
    }
}

/// Format a timestamp as a short human-readable date ("Mar 4, 2026")
pub fn format_date(date: &DateTime<Utc>) -> String {
    // %-d is not portable; format the day separately
    format!(
        "{} {}, {}",
        date.format("%b"),
        date.format("%d").to_string().trim_start_matches('0'),
        date.format("%Y")
    )
}

// ============================================================================
// Mutation Inputs
// ============================================================================

/// Input for the create-book mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBookInput {
    pub name: String,
    pub description: String,
}

impl CreateBookInput {
    /// Build an input from raw form values, trimming surrounding whitespace
    pub fn from_form(name: &str, description: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
        }
    }
}

/// Input for the update-book mutation.
///
/// `name` and `description` are optional; fields left as `None` are omitted
/// from the wire and left untouched by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBookInput {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateBookInput {
    /// Build a full update from raw form values, trimming whitespace
    pub fn from_form(id: i64, name: &str, description: &str) -> Self {
        Self {
            id,
            name: Some(name.trim().to_string()),
            description: Some(description.trim().to_string()),
        }
    }
}

// ============================================================================
// User Profile
// ============================================================================

/// Profile of the authenticated user, as reported by the identity provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl UserProfile {
    /// Single-character fallback for the avatar when no picture is available
    pub fn initial(&self) -> String {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .and_then(|s| s.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_book() -> Book {
        Book {
            id: 7,
            name: "Dune".to_string(),
            description: "Sci-fi novel".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 4, 12, 30, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_book_deserializes_camel_case() {
        let json = r#"{
            "id": 42,
            "name": "Dune",
            "description": "Sci-fi novel",
            "createdAt": "2026-03-04T12:30:00Z",
            "updatedAt": "2026-03-05T09:00:00Z"
        }"#;

        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, 42);
        assert_eq!(book.name, "Dune");
        assert_eq!(
            book.created_at,
            Utc.with_ymd_and_hms(2026, 3, 4, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_format_date() {
        let book = sample_book();
        assert_eq!(book.created_display(), "Mar 4, 2026");
        assert_eq!(book.updated_display(), "Mar 5, 2026");
    }

    #[test]
    fn test_format_date_double_digit_day() {
        let date = Utc.with_ymd_and_hms(2025, 12, 25, 0, 0, 0).unwrap();
        assert_eq!(format_date(&date), "Dec 25, 2025");
    }

    #[test]
    fn test_create_input_trims() {
        let input = CreateBookInput::from_form("  Dune  ", " Sci-fi novel ");
        assert_eq!(input.name, "Dune");
        assert_eq!(input.description, "Sci-fi novel");
    }

    #[test]
    fn test_update_input_omits_none_fields() {
        let input = UpdateBookInput {
            id: 3,
            name: Some("Dune".to_string()),
            description: None,
        };

        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Dune");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_update_input_from_form() {
        let input = UpdateBookInput::from_form(9, " Dune ", " Updated ");
        assert_eq!(input.id, 9);
        assert_eq!(input.name.as_deref(), Some("Dune"));
        assert_eq!(input.description.as_deref(), Some("Updated"));
    }

    #[test]
    fn test_profile_initial() {
        let profile = UserProfile {
            name: Some("ada".to_string()),
            email: Some("ada@example.com".to_string()),
            picture: None,
        };
        assert_eq!(profile.initial(), "A");

        let email_only = UserProfile {
            name: None,
            email: Some("bob@example.com".to_string()),
            picture: None,
        };
        assert_eq!(email_only.initial(), "B");

        assert_eq!(UserProfile::default().initial(), "?");
    }
}
