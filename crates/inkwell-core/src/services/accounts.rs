//! Account operations: registration, credential checks and admin seeding.

use std::sync::Arc;

use crate::domain::User;
use crate::error::{DomainError, RepoError};
use crate::forms::{FormErrors, RegistrationForm};
use crate::ports::{AuthError, PasswordService, UserRepository};

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    /// Create a regular (non-admin) account.
    pub async fn register(&self, form: RegistrationForm) -> Result<User, DomainError> {
        let fields = form.validate()?;

        if self.users.find_by_username(fields.username()).await?.is_some() {
            return Err(
                FormErrors::single("username", "A user with that username already exists.").into(),
            );
        }

        let password_hash = self.hash(fields.password())?;
        let user = User::new(fields.username().to_string(), password_hash);

        match self.users.save(user).await {
            Err(RepoError::Constraint(msg)) => Err(DomainError::Duplicate(msg)),
            other => Ok(other?),
        }
    }

    /// Check a username/password pair. Any mismatch is `Unauthorized`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let Some(user) = self.users.find_by_username(username.trim()).await? else {
            // Spend the same hashing work as a real check.
            let _ = self.passwords.hash(password);
            return Err(DomainError::Unauthorized);
        };

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|_| DomainError::Unauthorized)?;

        if valid { Ok(user) } else { Err(DomainError::Unauthorized) }
    }

    /// Make sure an admin account with these credentials exists.
    ///
    /// The credentials must pass the registration rules. An existing user with
    /// that name is promoted and keeps its password.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let fields = RegistrationForm {
            username: username.to_string(),
            password: password.to_string(),
        }
        .validate()?;

        if let Some(user) = self.users.find_by_username(fields.username()).await? {
            if user.is_admin {
                return Ok(user);
            }
            let mut user = user.with_admin(true);
            user.updated_at = chrono::Utc::now();
            return Ok(self.users.save(user).await?);
        }

        let password_hash = self.hash(fields.password())?;
        let user = User::new(fields.username().to_string(), password_hash).with_admin(true);
        Ok(self.users.save(user).await?)
    }

    fn hash(&self, password: &str) -> Result<String, DomainError> {
        self.passwords.hash(password).map_err(|e| match e {
            AuthError::HashingError(msg) => DomainError::Internal(msg),
            other => DomainError::Internal(other.to_string()),
        })
    }
}
