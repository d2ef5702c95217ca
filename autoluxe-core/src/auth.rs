//! Bearer token handling for catalog requests.
//!
//! The identity provider (phone or Google sign-in) is external; this module
//! only keeps the token it hands back and drops it when the catalog service
//! rejects it.

use crate::storage::{SessionStorage, StorageError};
use std::sync::Arc;
use tracing::{info, warn};

pub const TOKEN_STORAGE_KEY: &str = "token";

#[derive(Clone)]
pub struct AuthSession {
    storage: Arc<dyn SessionStorage>,
}

impl AuthSession {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Current token, if signed in. Unreadable storage counts as signed out.
    pub fn token(&self) -> Option<String> {
        match self.storage.get_item(TOKEN_STORAGE_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to read auth token: {e}");
                None
            }
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set_item(TOKEN_STORAGE_KEY, token)?;
        info!("Auth token stored");
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), StorageError> {
        self.storage.remove_item(TOKEN_STORAGE_KEY)?;
        info!("Signed out");
        Ok(())
    }

    /// Called when the catalog service answers 401: wipe everything stored
    /// alongside the token.
    pub fn expire(&self) {
        warn!("Auth token rejected, clearing credentials");
        if let Err(e) = self.storage.clear() {
            warn!("Failed to clear credentials: {e}");
        }
    }
}
