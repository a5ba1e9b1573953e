/// Password policy and digests for entry locks and the app PIN
///
/// Digests are base-64 encoded SHA-256 over the UTF-8 password bytes. There
/// is no salt, so equal passwords produce equal digests.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::domain::PasswordType;

/// Digest a password for storage
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    STANDARD.encode(digest)
}

/// Compare a password against a stored digest
///
/// An empty password or an empty stored digest never verifies.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    if password.is_empty() || stored_hash.is_empty() {
        return false;
    }
    hash_password(password) == stored_hash
}

/// The password types a lock can use
pub fn password_types() -> Vec<PasswordType> {
    PasswordType::ALL.to_vec()
}

/// Check the Strong rules and list every rule that fails
pub fn validate_strength(password: &str) -> Vec<String> {
    let mut issues = Vec::new();

    if password.chars().count() < 8 {
        issues.push("Password must be at least 8 characters".to_string());
    }
    if !password.chars().any(char::is_uppercase) {
        issues.push("Password must contain an uppercase letter".to_string());
    }
    if !password.chars().any(char::is_lowercase) {
        issues.push("Password must contain a lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        issues.push("Password must contain a digit".to_string());
    }

    issues
}

/// Validate a lock password against the rules of its type
///
/// Returns the violated rules; an empty list means the password is usable.
pub fn validate_lock_password(password: &str, password_type: PasswordType) -> Vec<String> {
    if password.is_empty() {
        return vec!["Password cannot be empty".to_string()];
    }

    let length = password.chars().count();
    let mut issues = Vec::new();

    match password_type {
        PasswordType::Strong => return validate_strength(password),
        PasswordType::Pin => {
            if !(4..=8).contains(&length) {
                issues.push("PIN must be between 4 and 8 characters".to_string());
            }
            if !password.chars().all(|c| c.is_ascii_digit()) {
                issues.push("PIN must contain only digits".to_string());
            }
        }
        PasswordType::Simple => {
            if length < 4 {
                issues.push("Simple password must be at least 4 characters".to_string());
            }
        }
    }

    issues
}
