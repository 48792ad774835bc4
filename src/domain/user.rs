//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Password;
use crate::config::MIN_LOGIN_LENGTH;
use crate::errors::{AppError, AppResult};

/// User domain entity
///
/// `password` holds the Argon2 hash once the user has been through
/// `UserService`; it is never part of an API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub login: String,
    pub password: String,
    pub timestamp: DateTime<Utc>,
}

impl User {
    /// Build a validated, unsaved user from plaintext input.
    ///
    /// Checks run in order: name, surname, login length, password policy.
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> AppResult<Self> {
        let (name, surname, login, password) =
            (name.into(), surname.into(), login.into(), password.into());

        Self::validate(&name, &surname, &login, &password)?;

        Ok(Self {
            id: 0,
            name,
            surname,
            login,
            password,
            timestamp: Utc::now(),
        })
    }

    fn validate(name: &str, surname: &str, login: &str, password: &str) -> AppResult<()> {
        if name.is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }
        if surname.is_empty() {
            return Err(AppError::validation("Surname cannot be empty"));
        }
        if login.chars().count() < MIN_LOGIN_LENGTH {
            return Err(AppError::validation(format!(
                "Login is too short. Please create login with at least {} symbols length",
                MIN_LOGIN_LENGTH
            )));
        }

        Password::validate_strength(password)
    }

    /// Overwrite the mutable profile fields with an already validated state.
    pub fn apply(&mut self, update: User) {
        self.login = update.login;
        self.password = update.password;
        self.name = update.name;
        self.surname = update.surname;
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "user123456")]
    pub login: String,
    #[schema(example = "John")]
    pub name: String,
    #[schema(example = "Doe")]
    pub surname: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
            name: user.name,
            surname: user.surname,
        }
    }
}
