use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, decode, Header, EncodingKey, DecodingKey, Validation, Algorithm};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // User ID
    pub exp: i64,     // Expiration time
    pub iat: i64,     // Issued at
}

/// Issues and verifies signed session tokens.
///
/// A token is either valid (signature correct, expiry in the future) or
/// invalid; there is no third state, and the only transition is the clock
/// passing the embedded expiry.
pub struct TokenIssuer {
    jwt_secret: String,
    expiry_hours: i64,
}

impl TokenIssuer {
    pub fn new(jwt_secret: String, expiry_hours: i64) -> Self {
        Self {
            jwt_secret,
            expiry_hours,
        }
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        self.issue_at(user_id, Utc::now())
    }

    pub fn verify(&self, token: &str) -> Result<Uuid, AppError> {
        self.verify_at(token, Utc::now())
    }

    pub fn issue_at(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Uuid, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the caller's clock, with no leeway.
        validation.validate_exp = false;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AppError::Unauthorized("Invalid token".into()))?;

        if data.claims.exp <= now.timestamp() {
            return Err(AppError::Unauthorized("Token expired".into()));
        }

        Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid token".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test_secret".to_string(), 24)
    }

    #[test]
    fn test_issued_token_verifies_to_the_same_user() {
        let user_id = Uuid::new_v4();
        let token = issuer().issue(user_id).unwrap();
        assert_eq!(issuer().verify(&token).unwrap(), user_id);
    }

    #[test]
    fn test_token_expires_once_the_clock_passes_expiry() {
        let user_id = Uuid::new_v4();
        let now = Utc::now();
        let token = issuer().issue_at(user_id, now).unwrap();

        // Still valid one hour before expiry
        assert!(issuer().verify_at(&token, now + Duration::hours(23)).is_ok());

        // Invalid at and after expiry
        let at_expiry = issuer().verify_at(&token, now + Duration::hours(24));
        assert!(matches!(at_expiry, Err(AppError::Unauthorized(_))));
        let past_expiry = issuer().verify_at(&token, now + Duration::hours(25));
        assert!(matches!(past_expiry, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_forged_signature_is_rejected() {
        let user_id = Uuid::new_v4();
        let forged = TokenIssuer::new("other_secret".to_string(), 24)
            .issue(user_id)
            .unwrap();
        assert!(matches!(
            issuer().verify(&forged),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        assert!(matches!(
            issuer().verify("not.a.token"),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(issuer().verify(""), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let now = Utc::now();
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            exp: (now + Duration::hours(24)).timestamp(),
            iat: now.timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret".as_bytes()),
        )
        .unwrap();
        assert!(matches!(
            issuer().verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }
}
