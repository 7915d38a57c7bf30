//! Storage access for user accounts.
//!
//! Services talk to the `users` table through [`UserRepository`] so the
//! pool is injected once at startup and unit tests can run without PostgreSQL.

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::user::{User, UserChanges},
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[cfg(test)]
pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;

/// Repository for the `users` table.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load the projected account fields for `id`.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Overwrite every editable column of `id`.
    ///
    /// Returns `None` when no row matched.
    async fn update(&self, id: i64, changes: &UserChanges) -> Result<Option<User>, AppError>;

    /// Delete `id`, returning the number of rows removed (0 or 1).
    async fn delete(&self, id: i64) -> Result<u64, AppError>;

    /// Verify the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
