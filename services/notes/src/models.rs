//! API models for request and response payloads

use auth::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Identifier of a note, as assigned by the store
pub type NoteId = i64;

/// Note entity
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Note {
    pub id: NoteId,
    #[sqlx(rename = "user_id")]
    pub owner_id: UserId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Fields of a note about to be created; the owner comes from the caller's identity
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

/// Request for note creation
///
/// Any other field in the payload, such as an owner id, is ignored.
#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Response for note operations
#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
        }
    }
}

/// Response for user registration
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
}

/// Response for user login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub email: String,
    pub token: String,
}
