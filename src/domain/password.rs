//! Password value object - complexity policy and Argon2 hashing.
//!
//! The policy is always applied to the plaintext, before hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Hashed password that can verify plaintext candidates.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Check a plaintext password against the complexity policy.
    ///
    /// Requires at least `MIN_PASSWORD_LENGTH` characters and one character
    /// from each class: uppercase, lowercase, digit, special. The first
    /// violated rule is reported.
    pub fn validate_strength(plain_text: &str) -> AppResult<()> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password is too short. Please create password with at least {} symbols length",
                MIN_PASSWORD_LENGTH
            )));
        }

        let mut has_upper = false;
        let mut has_lower = false;
        let mut has_digit = false;
        let mut has_special = false;

        for c in plain_text.chars() {
            if c.is_uppercase() {
                has_upper = true;
            } else if c.is_lowercase() {
                has_lower = true;
            } else if c.is_numeric() {
                has_digit = true;
            } else if is_special(c) {
                has_special = true;
            }
        }

        if !has_upper {
            return Err(AppError::validation(
                "Password must contain at least one uppercase letter",
            ));
        }
        if !has_lower {
            return Err(AppError::validation(
                "Password must contain at least one lowercase letter",
            ));
        }
        if !has_digit {
            return Err(AppError::validation(
                "Password must contain at least one number",
            ));
        }
        if !has_special {
            return Err(AppError::validation(
                "Password must contain at least one special character",
            ));
        }

        Ok(())
    }

    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(plain_text: &str) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Create a Password from an existing hash (from storage).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A malformed stored hash verifies as `false`.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Self::argon2()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is malformed: {}", e);
                false
            }
        }
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

/// Punctuation or symbol. ASCII punctuation plus the Latin-1, general
/// punctuation, currency, arrow, math and dingbat blocks; format characters
/// and combining marks never qualify.
fn is_special(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '\u{00A1}'..='\u{00AC}'
                | '\u{00AE}'..='\u{00BF}'
                | '\u{00D7}'
                | '\u{00F7}'
                | '\u{2010}'..='\u{2027}'
                | '\u{2030}'..='\u{205E}'
                | '\u{20A0}'..='\u{20CF}'
                | '\u{2100}'..='\u{23FF}'
                | '\u{2500}'..='\u{27BF}'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::hash(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123!"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123$";
        let hash = Password::hash(plain).unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123%";
        let pass1 = Password::hash(plain).unwrap();
        let pass2 = Password::hash(plain).unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(plain));
        assert!(pass2.verify(plain));
    }

    #[test]
    fn test_malformed_hash_does_not_verify() {
        assert!(!Password::from_hash("not-a-phc-string").verify("anything"));
    }

    #[test]
    fn test_strength_accepts_all_classes() {
        assert!(Password::validate_strength("Password1234$").is_ok());
    }

    #[test]
    fn test_strength_rejects_each_missing_class() {
        let cases = [
            ("Pass1$", "too short"),
            ("password1234$", "uppercase"),
            ("PASSWORD1234$", "lowercase"),
            ("Passwordabcd$", "number"),
            ("Password12345", "special"),
        ];

        for (candidate, expected) in cases {
            let err = Password::validate_strength(candidate).unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "{} should fail with '{}', got '{}'",
                candidate,
                expected,
                err
            );
        }
    }

    #[test]
    fn test_invisible_characters_are_not_special() {
        // zero-width space, combining acute accent, soft hyphen
        for candidate in ["Password123\u{200B}", "Password123\u{0301}", "Password123\u{00AD}"] {
            let err = Password::validate_strength(candidate).unwrap_err();
            assert!(err.to_string().contains("special"), "{:?}", candidate);
        }
    }

    #[test]
    fn test_symbols_count_as_special() {
        for candidate in ["Password123!", "Password123+", "Password123\u{20AC}", "Password123\u{00A7}"] {
            assert!(Password::validate_strength(candidate).is_ok(), "{:?}", candidate);
        }
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = Password::from_hash("$argon2id$secret");
        assert!(!format!("{:?}", password).contains("secret"));
    }
}
