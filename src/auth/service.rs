use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenIssuer;
use crate::auth::validation::{validate_login, validate_registration};
use crate::db::{User, UserStore};
use crate::error::{AppError, DatabaseError};

/// Token and user identifier handed to the HTTP layer after a successful
/// register or login, for it to place in the session cookie.
#[derive(Debug)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
}

pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    pub async fn register(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<Session, AppError> {
        validate_registration(email, first_name, last_name, password)?;

        if self.store.find_by_email(email).await?.is_some() {
            warn!("Registration rejected: email already taken");
            return Err(AppError::UserExists);
        }

        // bcrypt is CPU-bound; keep it off the request loop.
        let plaintext = password.to_owned();
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password(&plaintext)).await??;

        let user = User::new(
            email.to_owned(),
            first_name.to_owned(),
            last_name.to_owned(),
            password_hash,
        );
        let user = match self.store.create_user(&user).await {
            Ok(user) => user,
            // A concurrent registration can slip past the existence check;
            // the unique index on email decides the winner.
            Err(AppError::Database(DatabaseError::Duplicate)) => {
                warn!("Registration lost a concurrent insert race");
                return Err(AppError::UserExists);
            }
            Err(e) => return Err(e),
        };

        info!("User {} registered", user.id);
        let token = self.tokens.issue(user.id)?;
        Ok(Session {
            token,
            user_id: user.id,
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        validate_login(email, password)?;

        // Unknown email and wrong password are indistinguishable to the
        // caller, so a login probe cannot enumerate accounts.
        let user = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let plaintext = password.to_owned();
        let stored_hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&plaintext, &stored_hash))
                .await??;
        if !matches {
            return Err(AppError::InvalidCredentials);
        }

        info!("User {} logged in", user.id);
        let token = self.tokens.issue(user.id)?;
        Ok(Session {
            token,
            user_id: user.id,
        })
    }

    /// Verifies a session token and returns the user identifier embedded in
    /// it. Stateless: no store access, signature and expiry alone decide.
    pub fn validate_session(&self, token: &str) -> Result<Uuid, AppError> {
        self.tokens.verify(token)
    }
}
