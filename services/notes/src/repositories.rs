//! Note storage
//!
//! Every operation except creation is scoped by the caller's
//! [`RequestIdentity`]: a note owned by someone else is reported exactly
//! like a missing one.

use async_trait::async_trait;
use common::error::StoreResult;

use crate::{
    middleware::RequestIdentity,
    models::{NewNote, Note, NoteId},
};

pub mod memory;
pub mod note;

pub use memory::InMemoryNoteStore;
pub use note::SqliteNoteStore;

/// Persistence port for notes
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Create a note owned by `owner`
    async fn create(&self, owner: &RequestIdentity, note: NewNote) -> StoreResult<Note>;

    /// Fetch one of `owner`'s notes
    async fn get(&self, owner: &RequestIdentity, id: NoteId) -> StoreResult<Note>;

    /// Remove one of `owner`'s notes and return it
    async fn delete(&self, owner: &RequestIdentity, id: NoteId) -> StoreResult<Note>;

    /// All of `owner`'s notes in ascending id order
    async fn list(&self, owner: &RequestIdentity) -> StoreResult<Vec<Note>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use auth::{CredentialStore, InMemoryCredentialStore, SqliteCredentialStore};
    use common::{
        database::{DatabaseConfig, init_pool, migrate},
        error::StoreError,
    };

    fn new_note(title: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: format!("{title} content"),
        }
    }

    async fn check_ownership_isolation(store: &dyn NoteStore, alice: RequestIdentity, bob: RequestIdentity) {
        let note = store.create(&alice, new_note("alice-1")).await.unwrap();
        assert_eq!(note.owner_id, alice.user_id());
        assert_eq!(note.title, "alice-1");

        assert_eq!(store.get(&alice, note.id).await.unwrap(), note);
        assert!(matches!(store.get(&bob, note.id).await, Err(StoreError::NotFound)));
        assert!(matches!(store.delete(&bob, note.id).await, Err(StoreError::NotFound)));

        // Bob's failed delete left the note in place
        assert!(store.get(&alice, note.id).await.is_ok());

        let bobs = store.create(&bob, new_note("bob-1")).await.unwrap();
        let second = store.create(&alice, new_note("alice-2")).await.unwrap();

        let listed: Vec<NoteId> = store.list(&alice).await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(listed, vec![note.id, second.id]);
        let listed: Vec<NoteId> = store.list(&bob).await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(listed, vec![bobs.id]);

        let deleted = store.delete(&alice, note.id).await.unwrap();
        assert_eq!(deleted, note);
        assert!(matches!(store.get(&alice, note.id).await, Err(StoreError::NotFound)));
        assert!(matches!(store.delete(&alice, note.id).await, Err(StoreError::NotFound)));
        assert!(matches!(store.get(&alice, 9999).await, Err(StoreError::NotFound)));
    }

    async fn check_deleted_owner(store: &dyn NoteStore, users: &dyn CredentialStore) {
        let gone = users.create("gone@x.com", "hash").await.unwrap();
        let gone = RequestIdentity::new(gone);
        let note = store.create(&gone, new_note("before")).await.unwrap();

        users.delete(gone.user_id()).await.unwrap();

        assert!(matches!(
            store.create(&gone, new_note("after")).await,
            Err(StoreError::MissingReference)
        ));
        assert!(matches!(store.get(&gone, note.id).await, Err(StoreError::NotFound)));
        assert!(matches!(store.delete(&gone, note.id).await, Err(StoreError::NotFound)));
        assert!(store.list(&gone).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_store_tracks_deleted_owner() {
        let users = Arc::new(InMemoryCredentialStore::new());
        let store = InMemoryNoteStore::with_owners(users.clone());
        check_deleted_owner(&store, users.as_ref()).await;
    }

    #[tokio::test]
    async fn test_sqlite_store_tracks_deleted_owner() {
        let pool = init_pool(&DatabaseConfig::in_memory()).await.unwrap();
        migrate(&pool).await.unwrap();

        let users = SqliteCredentialStore::new(pool.clone());
        let store = SqliteNoteStore::new(pool);
        check_deleted_owner(&store, &users).await;
    }

    #[tokio::test]
    async fn test_in_memory_store_isolates_owners() {
        let store = InMemoryNoteStore::new();
        check_ownership_isolation(&store, RequestIdentity::new(1), RequestIdentity::new(2)).await;
    }

    #[tokio::test]
    async fn test_sqlite_store_isolates_owners() {
        let pool = init_pool(&DatabaseConfig::in_memory()).await.unwrap();
        migrate(&pool).await.unwrap();

        let users = SqliteCredentialStore::new(pool.clone());
        let alice = users.create("alice@x.com", "hash").await.unwrap();
        let bob = users.create("bob@x.com", "hash").await.unwrap();

        let store = SqliteNoteStore::new(pool);
        check_ownership_isolation(&store, RequestIdentity::new(alice), RequestIdentity::new(bob)).await;
    }
}
