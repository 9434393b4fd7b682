use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::models::User;
use crate::db::UserStore;
use crate::error::AppError;

/// PostgreSQL-backed [`UserStore`].
///
/// The uniqueness of `users.email` is enforced by a unique index (see
/// `migrations/`), so check-then-insert races resolve at the database.
pub struct DbOperations {
    pool: Arc<PgPool>,
}

impl DbOperations {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for DbOperations {
    async fn create_user(&self, user: &User) -> Result<User, AppError> {
        // A unique violation on the email index converts to
        // DatabaseError::Duplicate in the From<sqlx::Error> impl.
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, first_name, last_name, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, email, first_name, last_name, password_hash, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, first_name, last_name, password_hash, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }
}
