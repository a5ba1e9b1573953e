/// Password policy and hashing
use journal_mcp::services::security::*;
use journal_mcp::PasswordType;

#[test]
fn test_password_types() {
    assert_eq!(
        password_types(),
        vec![PasswordType::Strong, PasswordType::Pin, PasswordType::Simple]
    );
}

#[test]
fn test_strong_password() {
    assert!(validate_lock_password("Abcd1234", PasswordType::Strong).is_empty());
    assert_eq!(validate_strength("abcdefgh").len(), 2);
    assert_eq!(validate_strength("ABCDEFG1").len(), 1);
}

#[test]
fn test_pin_password() {
    assert!(validate_lock_password("0000", PasswordType::Pin).is_empty());
    assert!(validate_lock_password("12345678", PasswordType::Pin).is_empty());

    let issues = validate_lock_password("12ab", PasswordType::Pin);
    assert_eq!(issues, vec!["PIN must contain only digits".to_string()]);

    assert_eq!(validate_lock_password("123", PasswordType::Pin).len(), 1);
    assert_eq!(validate_lock_password("123456789", PasswordType::Pin).len(), 1);
}

#[test]
fn test_simple_password() {
    assert!(validate_lock_password("abcd", PasswordType::Simple).is_empty());
    assert_eq!(validate_lock_password("abc", PasswordType::Simple).len(), 1);
}

#[test]
fn test_empty_password_fails_every_type() {
    for password_type in PasswordType::ALL {
        assert_eq!(
            validate_lock_password("", password_type),
            vec!["Password cannot be empty".to_string()]
        );
    }
}

#[test]
fn test_hash_round_trip() {
    let hash = hash_password("Abcd1234");
    assert_ne!(hash, "Abcd1234");
    assert_eq!(hash, hash_password("Abcd1234"));
    assert!(verify_password("Abcd1234", &hash));
    assert!(!verify_password("abcd1234", &hash));
    assert!(!verify_password("", &hash));
    assert!(!verify_password("Abcd1234", ""));
}
