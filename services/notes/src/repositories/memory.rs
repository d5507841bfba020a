//! In-memory note store

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use auth::CredentialStore;
use chrono::Utc;
use common::error::{StoreError, StoreResult};
use tokio::sync::Mutex;

use super::NoteStore;
use crate::{
    middleware::RequestIdentity,
    models::{NewNote, Note, NoteId},
};

#[derive(Debug, Default)]
struct Notes {
    by_id: BTreeMap<NoteId, Note>,
    last_id: NoteId,
}

/// Note store keeping notes in process memory
///
/// When built with [`InMemoryNoteStore::with_owners`], owners are checked
/// against the credential store the way the relational schema does: notes
/// cannot be created for a missing user, and a deleted user's notes are gone.
#[derive(Clone, Default)]
pub struct InMemoryNoteStore {
    notes: Arc<Mutex<Notes>>,
    owners: Option<Arc<dyn CredentialStore>>,
}

impl InMemoryNoteStore {
    /// Create an empty store that accepts any owner
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store whose owners must exist in `owners`
    pub fn with_owners(owners: Arc<dyn CredentialStore>) -> Self {
        Self {
            notes: Arc::default(),
            owners: Some(owners),
        }
    }

    async fn owner_exists(&self, owner: &RequestIdentity) -> StoreResult<bool> {
        match &self.owners {
            Some(owners) => owners.exists(owner.user_id()).await,
            None => Ok(true),
        }
    }

    /// Drop the notes of an owner who no longer exists
    async fn purge_if_orphaned(&self, owner: &RequestIdentity) -> StoreResult<()> {
        if !self.owner_exists(owner).await? {
            let mut notes = self.notes.lock().await;
            notes.by_id.retain(|_, note| note.owner_id != owner.user_id());
        }
        Ok(())
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn create(&self, owner: &RequestIdentity, note: NewNote) -> StoreResult<Note> {
        if !self.owner_exists(owner).await? {
            return Err(StoreError::MissingReference);
        }

        let mut notes = self.notes.lock().await;
        notes.last_id += 1;

        let note = Note {
            id: notes.last_id,
            owner_id: owner.user_id(),
            title: note.title,
            content: note.content,
            created_at: Utc::now(),
        };
        notes.by_id.insert(note.id, note.clone());

        Ok(note)
    }

    async fn get(&self, owner: &RequestIdentity, id: NoteId) -> StoreResult<Note> {
        self.purge_if_orphaned(owner).await?;

        let notes = self.notes.lock().await;
        notes
            .by_id
            .get(&id)
            .filter(|note| note.owner_id == owner.user_id())
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, owner: &RequestIdentity, id: NoteId) -> StoreResult<Note> {
        self.purge_if_orphaned(owner).await?;

        let mut notes = self.notes.lock().await;
        match notes.by_id.get(&id) {
            Some(note) if note.owner_id == owner.user_id() => {}
            _ => return Err(StoreError::NotFound),
        }

        notes.by_id.remove(&id).ok_or(StoreError::NotFound)
    }

    async fn list(&self, owner: &RequestIdentity) -> StoreResult<Vec<Note>> {
        self.purge_if_orphaned(owner).await?;

        let notes = self.notes.lock().await;
        Ok(notes
            .by_id
            .values()
            .filter(|note| note.owner_id == owner.user_id())
            .cloned()
            .collect())
    }
}
