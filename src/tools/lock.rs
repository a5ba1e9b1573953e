/// Tools for locking and unlocking single entries

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{EntryId, PasswordType};
use crate::{AppError, JournalApp};

/// Parameters for locking an entry behind a password
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LockEntryParams {
    pub entry_id: i64,
    pub password: String,
    /// Strong, PIN or Simple (default Strong)
    pub password_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LockEntryResponse {
    pub success: bool,
    pub message: String,
}

pub async fn lock_entry(app: &JournalApp, params: LockEntryParams) -> Result<LockEntryResponse, AppError> {
    let password_type = match params.password_type.as_deref() {
        Some(name) if !name.trim().is_empty() => name.parse::<PasswordType>()?,
        _ => PasswordType::Strong,
    };

    let entry = app
        .locks()
        .lock(EntryId(params.entry_id), &params.password, password_type)
        .await?;

    Ok(LockEntryResponse {
        success: true,
        message: format!(
            "🔒 Locked the entry for {} with a {} password",
            entry.entry_date, password_type
        ),
    })
}

/// Parameters for removing the lock from an entry
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UnlockEntryParams {
    pub entry_id: i64,
    pub password: String,
}

pub async fn unlock_entry(app: &JournalApp, params: UnlockEntryParams) -> Result<LockEntryResponse, AppError> {
    let entry = app
        .locks()
        .unlock(EntryId(params.entry_id), &params.password)
        .await?;

    Ok(LockEntryResponse {
        success: true,
        message: format!("🔓 Unlocked the entry for {}", entry.entry_date),
    })
}
