//! In-process user repository for unit and router tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::user::{User, UserChanges},
    repository::UserRepository,
};

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<BTreeMap<i64, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> MutexGuard<'_, BTreeMap<i64, User>> {
        // No invariant spans a panic here; keep serving after one.
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let repo = Self::new();
        repo.rows()
            .extend(users.into_iter().map(|user| (user.id, user)));
        repo
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.rows().get(&id).cloned())
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> Result<Option<User>, AppError> {
        let mut rows = self.rows();
        let Some(user) = rows.get_mut(&id) else {
            return Ok(None);
        };

        *user = User {
            id,
            first_name: changes.first_name.clone(),
            last_name: changes.last_name.clone(),
            email: changes.email.clone(),
            mobile: changes.mobile.clone(),
            address: changes.address.clone(),
            city: changes.city.clone(),
            state: changes.state.clone(),
            zip_code: changes.zip_code.clone(),
        };

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i64) -> Result<u64, AppError> {
        Ok(u64::from(self.rows().remove(&id).is_some()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
