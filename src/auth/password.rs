use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;

const ROUNDS: u32 = 10_000;
const KEY_LEN: usize = 32;

const MIN_LENGTH: usize = 8;
const MAX_LENGTH: usize = 16;
const ALLOWED_SYMBOLS: &str = "@$!%*?&";

/// Derive the stored credential from a plaintext password.
///
/// PBKDF2-HMAC-SHA512 with the process secret as salt material and fixed
/// parameters, so the same password always yields the same hex string and
/// login can compare stored against derived byte-for-byte.
pub fn hash_password(plain: &str, secret: &str) -> String {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha512>(plain.as_bytes(), secret.as_bytes(), ROUNDS, &mut key);
    hex::encode(key)
}

/// Check the password complexity policy before hashing, reporting every
/// violation at once: 8-16 characters, at least one lowercase, one
/// uppercase, one digit and one of `@$!%*?&`, nothing outside that set.
pub fn validate_complexity(plain: &str) -> Result<(), Vec<String>> {
    let mut violations = Vec::new();

    let length = plain.chars().count();
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        violations.push(format!(
            "Password must be between {MIN_LENGTH} and {MAX_LENGTH} characters!"
        ));
    }
    if !plain.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push("Password must contain at least one lowercase letter!".into());
    }
    if !plain.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push("Password must contain at least one uppercase letter!".into());
    }
    if !plain.chars().any(|c| c.is_ascii_digit()) {
        violations.push("Password must contain at least one digit!".into());
    }
    if !plain.chars().any(|c| ALLOWED_SYMBOLS.contains(c)) {
        violations.push(format!(
            "Password must contain at least one special character from {ALLOWED_SYMBOLS}!"
        ));
    }
    if plain
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && !ALLOWED_SYMBOLS.contains(c))
    {
        violations.push(format!(
            "Password may only contain letters, digits and {ALLOWED_SYMBOLS}!"
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
