//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;

use crate::{
    db::DbPool,
    error::AppError,
    models::user::{User, UserChanges},
    repository::UserRepository,
};

/// User repository backed by the shared connection pool.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: DbPool,
}

impl PgUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, mobile, address, city, state, zip_code
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: i64, changes: &UserChanges) -> Result<Option<User>, AppError> {
        // RETURNING yields no row when the id does not exist, which is how
        // callers learn that zero rows were affected.
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = $1,
                last_name = $2,
                email = $3,
                mobile = $4,
                address = $5,
                city = $6,
                state = $7,
                zip_code = $8,
                updated_at = NOW()
            WHERE id = $9
            RETURNING id, first_name, last_name, email, mobile, address, city, state, zip_code
            "#,
        )
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.mobile)
        .bind(&changes.address)
        .bind(&changes.city)
        .bind(&changes.state)
        .bind(&changes.zip_code)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<u64, AppError> {
        // A single DELETE commits atomically on its own
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
