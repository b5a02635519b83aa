use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::token::{self, Identity};
use crate::token_store::TokenStore;

/// Hard reset of the shell back to its entry point, run on every logout.
pub trait Navigator: Send + Sync {
    fn navigate_to_root(&self);
}

impl<F> Navigator for F
where
    F: Fn() + Send + Sync,
{
    fn navigate_to_root(&self) {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Identity),
}

/// The client's belief about who is signed in.
///
/// `login` and `logout` are the only mutators. The session never writes the
/// token itself: callers persist it to the [`TokenStore`] before `login`.
pub struct Session {
    tokens: TokenStore,
    navigator: Arc<dyn Navigator>,
    state: RwLock<SessionState>,
}

impl Session {
    /// Derives the initial state from whatever token is already stored.
    pub fn restore(tokens: TokenStore, navigator: Arc<dyn Navigator>) -> Self {
        let state = match token::decode(tokens.read().as_deref()) {
            Some(identity) => {
                info!(user_id = %identity.id, name = %identity.name, "Session restored from stored token");
                SessionState::Authenticated(identity)
            }
            None => {
                debug!("No usable stored token, starting unauthenticated");
                SessionState::Unauthenticated
            }
        };
        Self {
            tokens,
            navigator,
            state: RwLock::new(state),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(
            *self.state.read().unwrap_or_else(PoisonError::into_inner),
            SessionState::Authenticated(_)
        )
    }

    pub fn current_user(&self) -> Option<Identity> {
        match &*self.state.read().unwrap_or_else(PoisonError::into_inner) {
            SessionState::Authenticated(identity) => Some(identity.clone()),
            SessionState::Unauthenticated => None,
        }
    }

    /// Returns `false` when the token does not decode, leaving the state as it was.
    pub fn login(&self, token: &str) -> bool {
        let Some(identity) = token::decode(Some(token)) else {
            warn!("Login ignored, token has no usable identity");
            return false;
        };
        info!(user_id = %identity.id, name = %identity.name, "User logged in");
        *self.state.write().unwrap_or_else(PoisonError::into_inner) =
            SessionState::Authenticated(identity);
        true
    }

    pub fn logout(&self) {
        self.tokens.clear();
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = SessionState::Unauthenticated;
        info!("User logged out");
        self.navigator.navigate_to_root();
    }

    /// Logs out as soon as the HTTP layer reports a rejected credential.
    ///
    /// Without this, the session only notices a cleared token when a consumer
    /// calls `logout` itself.
    pub fn follow_rejections(self: &Arc<Self>, mut rejections: watch::Receiver<()>) -> JoinHandle<()> {
        let session = Arc::clone(self);
        tokio::spawn(async move {
            while rejections.changed().await.is_ok() {
                if session.is_authenticated() {
                    info!("Credentials rejected by backend, ending session");
                    session.logout();
                }
            }
            debug!("Rejection signal closed");
        })
    }
}
