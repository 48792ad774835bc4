//! User service - Handles user-related business logic.

use async_trait::async_trait;
use std::sync::Arc;

use super::HashService;
use crate::config::LOGIN_NOT_FREE;
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::infra::Repository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a user and return its id
    async fn create_user(
        &self,
        login: &str,
        password: &str,
        name: &str,
        surname: &str,
    ) -> AppResult<i32>;

    /// Replace login, password, name and surname of an existing user
    async fn update_user(
        &self,
        id: i32,
        login: &str,
        password: &str,
        name: &str,
        surname: &str,
    ) -> AppResult<()>;

    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Delete a user. Unlike folders and notes, a missing user is an error.
    async fn delete_user(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService
pub struct UserManager {
    repo: Arc<dyn Repository>,
    hasher: Arc<dyn HashService>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn Repository>, hasher: Arc<dyn HashService>) -> Self {
        Self { repo, hasher }
    }

    /// Fails if any user other than `own_id` already has `login`.
    async fn ensure_login_free(&self, login: &str, own_id: i32) -> AppResult<()> {
        let taken = self
            .repo
            .get_users()
            .await?
            .iter()
            .any(|user| user.login == login && user.id != own_id);

        if taken {
            return Err(AppError::validation(LOGIN_NOT_FREE));
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(
        &self,
        login: &str,
        password: &str,
        name: &str,
        surname: &str,
    ) -> AppResult<i32> {
        let mut user = User::new(name, surname, login, password)?;
        self.ensure_login_free(&user.login, user.id).await?;

        user.password = self.hasher.hash(password)?;
        let id = self.repo.save_entity(user.into()).await?;

        tracing::info!(user_id = id, "User created");
        Ok(id)
    }

    async fn update_user(
        &self,
        id: i32,
        login: &str,
        password: &str,
        name: &str,
        surname: &str,
    ) -> AppResult<()> {
        let mut update = User::new(name, surname, login, password)?;
        self.ensure_login_free(&update.login, id).await?;
        update.password = self.hasher.hash(password)?;

        let mut user = self.repo.get_user_by_id(id).await?;
        user.apply(update);
        self.repo.save_entity(user.into()).await?;

        tracing::info!(user_id = id, "User updated");
        Ok(())
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repo.get_user_by_id(id).await
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        let user = self.repo.get_user_by_id(id).await?;
        self.repo.delete_entity(user.into()).await?;

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnyEntity;
    use crate::errors::ErrorKind;
    use crate::infra::MockRepository;
    use crate::services::MockHashService;
    use mockall::predicate::eq;

    const PASSWORD: &str = "Password1234$";

    fn stored_user(id: i32, login: &str) -> User {
        let mut user = User::new("John", "Doe", login, PASSWORD).unwrap();
        user.id = id;
        user.password = "stored-hash".to_string();
        user
    }

    fn hasher() -> MockHashService {
        let mut hasher = MockHashService::new();
        hasher
            .expect_hash()
            .returning(|plain| Ok(format!("hashed:{}", plain)));
        hasher
    }

    fn service(repo: MockRepository, hasher: MockHashService) -> UserManager {
        UserManager::new(Arc::new(repo), Arc::new(hasher))
    }

    #[tokio::test]
    async fn test_create_user_hashes_before_save() {
        let mut repo = MockRepository::new();
        repo.expect_get_users()
            .returning(|| Ok(vec![stored_user(1, "otherlogin")]));
        repo.expect_save_entity()
            .withf(|entity| match entity {
                AnyEntity::User(user) => {
                    user.id == 0 && user.login == "johndoe42" && user.password == "hashed:Password1234$"
                }
                _ => false,
            })
            .times(1)
            .returning(|_| Ok(2));

        let id = service(repo, hasher())
            .create_user("johndoe42", PASSWORD, "John", "Doe")
            .await
            .unwrap();
        assert_eq!(id, 2);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_login() {
        let mut repo = MockRepository::new();
        repo.expect_get_users()
            .returning(|| Ok(vec![stored_user(1, "johndoe42")]));
        repo.expect_save_entity().never();

        let mut hasher = MockHashService::new();
        hasher.expect_hash().never();

        let err = service(repo, hasher)
            .create_user("johndoe42", PASSWORD, "John", "Doe")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), LOGIN_NOT_FREE);
    }

    #[tokio::test]
    async fn test_create_user_invalid_skips_repository() {
        let mut repo = MockRepository::new();
        repo.expect_get_users().never();
        repo.expect_save_entity().never();

        let err = service(repo, MockHashService::new())
            .create_user("short", PASSWORD, "John", "Doe")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_create_user_listing_failure_propagates() {
        let mut repo = MockRepository::new();
        repo.expect_get_users().returning(|| {
            Err(AppError::Storage(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk gone",
            )))
        });
        repo.expect_save_entity().never();

        let err = service(repo, MockHashService::new())
            .create_user("johndoe42", PASSWORD, "John", "Doe")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Database);
    }

    #[tokio::test]
    async fn test_update_user_keeps_own_login() {
        let mut repo = MockRepository::new();
        repo.expect_get_users()
            .returning(|| Ok(vec![stored_user(5, "johndoe42")]));
        repo.expect_get_user_by_id()
            .with(eq(5))
            .returning(|id| Ok(stored_user(id, "johndoe42")));
        repo.expect_save_entity()
            .withf(|entity| match entity {
                AnyEntity::User(user) => {
                    user.id == 5 && user.name == "Jane" && user.password == "hashed:Password1234$"
                }
                _ => false,
            })
            .times(1)
            .returning(|_| Ok(5));

        service(repo, hasher())
            .update_user(5, "johndoe42", PASSWORD, "Jane", "Doe")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_user_login_taken_by_other() {
        let mut repo = MockRepository::new();
        repo.expect_get_users()
            .returning(|| Ok(vec![stored_user(5, "johndoe42"), stored_user(6, "takenlogin")]));
        repo.expect_get_user_by_id().never();
        repo.expect_save_entity().never();

        let err = service(repo, hasher())
            .update_user(5, "takenlogin", PASSWORD, "John", "Doe")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_users().returning(|| Ok(vec![]));
        repo.expect_get_user_by_id()
            .returning(|_| Err(AppError::not_found("User not found")));
        repo.expect_save_entity().never();

        let err = service(repo, hasher())
            .update_user(9, "johndoe42", PASSWORD, "John", "Doe")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .returning(|id| Ok(stored_user(id, "johndoe42")));
        repo.expect_delete_entity()
            .withf(|entity| entity.id() == 3)
            .times(1)
            .returning(|_| Ok(()));

        service(repo, MockHashService::new())
            .delete_user(3)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_user_propagates() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_id()
            .returning(|_| Err(AppError::not_found("User not found")));
        repo.expect_delete_entity().never();

        let err = service(repo, MockHashService::new())
            .delete_user(3)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
