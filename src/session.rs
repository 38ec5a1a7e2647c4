//! Mock identity provider.
//!
//! There is no real authentication: a single hardcoded demo credential
//! pair signs in a fixed user. The session persists in its own namespace
//! so `whoami` works across invocations. The board store never consults
//! the session.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::Storage;

pub const DEMO_EMAIL: &str = "intern@demo.com";
pub const DEMO_PASSWORD: &str = "intern123";

/// Signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionSnapshot {
    #[serde(default)]
    user: Option<User>,
}

/// Session state backed by the `session` storage namespace.
#[derive(Debug)]
pub struct SessionStore {
    storage: Storage,
    user: Option<User>,
}

impl SessionStore {
    pub fn load(storage: Storage) -> Self {
        let snapshot: Option<SessionSnapshot> = storage.read_json_opt(&storage.session_file());
        Self {
            user: snapshot.and_then(|snap| snap.user),
            storage,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Check credentials against the demo pair and persist the session.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User> {
        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            return Err(Error::InvalidCredentials);
        }
        let user = User {
            id: "1".to_string(),
            name: "Intern User".to_string(),
            email: email.to_string(),
        };
        self.user = Some(user.clone());
        self.persist()?;
        Ok(user)
    }

    /// Drop the session. Logging out while logged out is fine.
    pub fn logout(&mut self) -> Result<()> {
        self.user = None;
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let snapshot = SessionSnapshot {
            user: self.user.clone(),
        };
        self.storage
            .write_json(&self.storage.session_file(), &snapshot)
    }
}
