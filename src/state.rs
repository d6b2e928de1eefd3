//! Shared application state.
//!
//! Handlers and middleware receive an `AppState` through Axum's `State`
//! extractor. It holds the one card store and one credential store chosen at
//! startup; cloning only bumps reference counts.

use std::sync::Arc;

use crate::store::{CashCardStore, CredentialStore};

#[derive(Clone)]
pub struct AppState {
    pub cards: Arc<dyn CashCardStore>,
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    /// State backed by a single store that serves both cards and credentials.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: CashCardStore + CredentialStore + 'static,
    {
        Self {
            cards: store.clone(),
            credentials: store,
        }
    }
}
