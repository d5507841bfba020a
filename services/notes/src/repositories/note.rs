//! Note repository backed by SQLite

use async_trait::async_trait;
use chrono::Utc;
use common::error::{StoreError, StoreResult};
use sqlx::SqlitePool;
use tracing::info;

use super::NoteStore;
use crate::{
    middleware::RequestIdentity,
    models::{NewNote, Note, NoteId},
};

/// Note repository for database operations
#[derive(Clone)]
pub struct SqliteNoteStore {
    pool: SqlitePool,
}

impl SqliteNoteStore {
    /// Create a new note repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteStore for SqliteNoteStore {
    async fn create(&self, owner: &RequestIdentity, note: NewNote) -> StoreResult<Note> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (user_id, title, content, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, title, content, created_at
            "#,
        )
        .bind(owner.user_id())
        .bind(&note.title)
        .bind(&note.content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::tag("notes.create"))?;

        info!(note_id = note.id, user_id = owner.user_id(), "Note inserted");
        Ok(note)
    }

    async fn get(&self, owner: &RequestIdentity, id: NoteId) -> StoreResult<Note> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, user_id, title, content, created_at
            FROM notes
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner.user_id())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::tag("notes.get"))?
        .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, owner: &RequestIdentity, id: NoteId) -> StoreResult<Note> {
        // Dropping the transaction before commit rolls it back, so a
        // cancelled request never leaves the read without the delete.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(StoreError::tag("notes.delete"))?;

        let note = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, user_id, title, content, created_at
            FROM notes
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner.user_id())
        .fetch_optional(&mut *tx)
        .await
        .map_err(StoreError::tag("notes.delete"))?
        .ok_or(StoreError::NotFound)?;

        sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner.user_id())
            .execute(&mut *tx)
            .await
            .map_err(StoreError::tag("notes.delete"))?;

        tx.commit().await.map_err(StoreError::tag("notes.delete"))?;

        info!(note_id = id, user_id = owner.user_id(), "Note deleted");
        Ok(note)
    }

    async fn list(&self, owner: &RequestIdentity) -> StoreResult<Vec<Note>> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, user_id, title, content, created_at
            FROM notes
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner.user_id())
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::tag("notes.list"))
    }
}
