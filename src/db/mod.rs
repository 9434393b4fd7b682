//! Database module: user records and the store contract.

pub mod models;
pub mod operations;

use async_trait::async_trait;

use crate::error::AppError;

pub use models::User;
pub use operations::DbOperations;

/// Store contract for user records.
///
/// Email uniqueness is the store's transactional responsibility: when two
/// concurrent registrations race past the existence check, the insert on
/// one side must fail with `DatabaseError::Duplicate`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user record. Fails with `DatabaseError::Duplicate`
    /// when a record with the same email already exists.
    async fn create_user(&self, user: &User) -> Result<User, AppError>;

    /// Looks up a user by email, case-sensitively.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}
