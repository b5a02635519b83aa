use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::Result;
use crate::storage::Storage;

pub const TOKEN_KEY: &str = "coleta_token";

/// Single-slot bearer token persistence. Saving overwrites, there is no history.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn Storage>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        self.storage.set(TOKEN_KEY, token)?;
        debug!("Bearer token saved");
        Ok(())
    }

    /// Never fails: an unreadable slot is reported as absent.
    /// Surrounding whitespace, such as the newline of a hand-edited file, is dropped.
    pub fn read(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token
                .map(|token| token.trim().to_owned())
                .filter(|token| !token.is_empty()),
            Err(error) => {
                warn!(error = %error, "Fail to read stored token, treating as absent");
                None
            }
        }
    }

    pub fn clear(&self) {
        match self.storage.remove(TOKEN_KEY) {
            Ok(()) => debug!("Bearer token cleared"),
            Err(error) => warn!(error = %error, "Fail to clear stored token"),
        }
    }
}
