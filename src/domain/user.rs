/// The person currently using the journal
///
/// Only a display name is recorded. There are no credentials here; the
/// application PIN lives with the credential store.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

/// Who is logged in, if anyone
#[derive(Debug, Clone, Default)]
pub struct UserSession {
    current: Option<User>,
}

impl UserSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` as the current user, replacing any previous one
    pub fn login(&mut self, name: impl Into<String>) -> &User {
        self.current.insert(User { name: name.into() })
    }

    pub fn logout(&mut self) {
        self.current = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }
}
