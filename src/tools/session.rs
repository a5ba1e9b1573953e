/// Tools for starting and ending a session, and for the application PIN

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::services::JournalError;
use crate::tools::NoParams;
use crate::{AppError, JournalApp};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LoginParams {
    /// Display name of the person writing
    pub name: String,
    /// Application PIN, required once a PIN has been set
    pub pin: Option<String>,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct PinParams {
    /// PIN to set; leave out to turn the PIN off
    pub new_pin: Option<String>,
    /// The PIN in force, required once a PIN has been set
    pub current_pin: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub message: String,
}

/// Record who is writing, checking the application PIN when one is enabled
pub async fn login(app: &mut JournalApp, params: LoginParams) -> Result<SessionResponse, AppError> {
    let name = params.name.trim();
    if name.is_empty() {
        return Err(JournalError::ValidationFailed {
            issues: vec!["Name cannot be empty".to_string()],
        }
        .into());
    }

    if app.pin().is_enabled().await? {
        let pin = params.pin.as_deref().unwrap_or_default();
        if !app.pin().verify_pin(pin).await? {
            tracing::warn!("Rejected login for {}: wrong PIN", name);
            return Err(JournalError::AccessDenied.into());
        }
    }

    let user = app.session_mut().login(name);
    Ok(SessionResponse {
        success: true,
        message: format!("👋 Welcome, {}!", user.name),
    })
}

pub async fn logout(app: &mut JournalApp, _params: NoParams) -> Result<SessionResponse, AppError> {
    let message = match app.session().current_user() {
        Some(user) => format!("👋 Goodbye, {}!", user.name),
        None => "Nobody was logged in".to_string(),
    };
    app.session_mut().logout();

    Ok(SessionResponse {
        success: true,
        message,
    })
}

/// Set, change or turn off the application PIN
///
/// Once a PIN is enabled, changing or removing it needs the current one.
pub async fn manage_pin(app: &JournalApp, params: PinParams) -> Result<SessionResponse, AppError> {
    if app.pin().is_enabled().await? {
        let current = params.current_pin.as_deref().unwrap_or_default();
        if !app.pin().verify_pin(current).await? {
            tracing::warn!("Rejected PIN change: wrong current PIN");
            return Err(JournalError::AccessDenied.into());
        }
    }

    let message = match params.new_pin.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        Some(pin) => {
            app.pin().set_pin(pin).await?;
            "🔐 Application PIN set".to_string()
        }
        None => {
            app.pin().disable().await?;
            "🔓 Application PIN turned off".to_string()
        }
    };

    Ok(SessionResponse {
        success: true,
        message,
    })
}
