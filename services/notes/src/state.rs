//! Application state shared across handlers

use std::sync::Arc;

use auth::{AuthService, TokenService};

use crate::repositories::NoteStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub tokens: TokenService,
    pub notes: Arc<dyn NoteStore>,
}

impl AppState {
    /// Wire the services together; the middleware verifies with the same
    /// token service that the auth service issues with.
    pub fn new(auth: AuthService, notes: Arc<dyn NoteStore>) -> Self {
        let tokens = auth.tokens().clone();
        Self {
            auth,
            tokens,
            notes,
        }
    }
}
