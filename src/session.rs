//! Session readiness: the one-shot signal that unlocks balance polling.
//!
//! Balance fetching needs the account address, which is only known after the
//! user authenticates. The gate starts in [`SessionState::AwaitingSession`];
//! the first [`SessionGate::sign_in`] moves it to [`SessionState::Ready`] for
//! the rest of the process. Anything awaiting [`SessionGate::wait`] resumes at
//! that moment.

use crate::shared::Address;
use async_lock::OnceCell;
use serde::{Deserialize, Serialize};

/// The authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub address: Address,
}

impl Session {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingSession,
    Ready,
}

pub struct SessionGate {
    session: OnceCell<Session>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self {
            session: OnceCell::new(),
        }
    }

    /// Fire the signal. Returns `false` if a session was already set; the
    /// first session stays in effect.
    pub async fn sign_in(&self, session: Session) -> bool {
        let address = session.address.clone();
        match self.session.set(session).await {
            Ok(_) => {
                tracing::debug!(address = %address, "session ready");
                true
            }
            Err(_) => {
                tracing::warn!(address = %address, "session already established, sign-in ignored");
                false
            }
        }
    }

    /// Suspend until a session is established.
    pub async fn wait(&self) -> &Session {
        self.session.wait().await
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.get()
    }

    pub fn state(&self) -> SessionState {
        if self.session.is_initialized() {
            SessionState::Ready
        } else {
            SessionState::AwaitingSession
        }
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}
