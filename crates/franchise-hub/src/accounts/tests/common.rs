use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use crate::accounts::domain::{NewUser, RegistrationRequest, StoredCredentials, User, UserId};
use crate::accounts::repository::UserRepository;
use crate::accounts::service::AccountService;
use crate::store::RepositoryError;

#[derive(Default)]
pub(super) struct MemoryUserRepository {
    rows: Mutex<HashMap<i64, StoredCredentials>>,
    sequence: AtomicI64,
}

impl MemoryUserRepository {
    pub(super) fn len(&self) -> usize {
        self.rows.lock().expect("repository mutex poisoned").len()
    }
}

impl UserRepository for MemoryUserRepository {
    fn insert(&self, new: NewUser) -> Result<User, RepositoryError> {
        let mut guard = self.rows.lock().expect("repository mutex poisoned");
        if guard
            .values()
            .any(|stored| stored.user.email == new.email)
        {
            return Err(RepositoryError::Conflict);
        }

        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let user = User {
            id: UserId(id),
            email: new.email,
            name: new.name,
            role: new.role,
        };
        guard.insert(
            id,
            StoredCredentials {
                user: user.clone(),
                password_hash: new.password_hash,
            },
        );
        Ok(user)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<StoredCredentials>, RepositoryError> {
        let guard = self.rows.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|stored| stored.user.email == email)
            .cloned())
    }
}

pub(super) struct UnavailableUserRepository;

impl UserRepository for UnavailableUserRepository {
    fn insert(&self, _new: NewUser) -> Result<User, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_email(&self, _email: &str) -> Result<Option<StoredCredentials>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (AccountService<MemoryUserRepository>, Arc<MemoryUserRepository>) {
    let repository = Arc::new(MemoryUserRepository::default());
    let service = AccountService::new(repository.clone());
    (service, repository)
}

pub(super) fn registration(email: &str) -> RegistrationRequest {
    RegistrationRequest {
        email: Some(email.to_string()),
        password: Some("p".to_string()),
        name: Some("A".to_string()),
    }
}
