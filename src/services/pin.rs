/// Application-wide PIN gate
///
/// Independent of per-entry locks. The PIN digest and an enabled flag are
/// kept in a credential store under fixed keys.

use std::sync::Arc;

use crate::services::{security, JournalError};
use crate::storage::CredentialStore;

const PIN_KEY: &str = "journal_pin";
const ENABLED_KEY: &str = "pin_enabled";

pub struct PinGate<C> {
    credentials: Arc<C>,
}

impl<C> Clone for PinGate<C> {
    fn clone(&self) -> Self {
        Self {
            credentials: Arc::clone(&self.credentials),
        }
    }
}

impl<C: CredentialStore> PinGate<C> {
    pub fn new(credentials: Arc<C>) -> Self {
        Self { credentials }
    }

    /// Store a new PIN and enable the gate
    pub async fn set_pin(&self, pin: &str) -> Result<(), JournalError> {
        if pin.is_empty() {
            return Err(JournalError::ValidationFailed {
                issues: vec!["PIN cannot be empty".to_string()],
            });
        }

        self.credentials
            .set_credential(PIN_KEY, &security::hash_password(pin))
            .await?;
        self.credentials.set_credential(ENABLED_KEY, "true").await?;
        tracing::info!("Application PIN set");
        Ok(())
    }

    /// Check a PIN; with no PIN stored every attempt passes
    pub async fn verify_pin(&self, pin: &str) -> Result<bool, JournalError> {
        match self.credentials.get_credential(PIN_KEY).await? {
            Some(stored) if !stored.is_empty() => Ok(stored == security::hash_password(pin)),
            _ => Ok(true),
        }
    }

    pub async fn is_enabled(&self) -> Result<bool, JournalError> {
        let flag = self.credentials.get_credential(ENABLED_KEY).await?;
        Ok(flag.is_some_and(|value| value.trim().eq_ignore_ascii_case("true")))
    }

    /// Forget the PIN and disable the gate
    pub async fn disable(&self) -> Result<(), JournalError> {
        self.credentials.remove_credential(PIN_KEY).await?;
        self.credentials.remove_credential(ENABLED_KEY).await?;
        tracing::info!("Application PIN disabled");
        Ok(())
    }
}
