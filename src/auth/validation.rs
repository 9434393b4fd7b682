use crate::error::AppError;

const MIN_PASSWORD_LENGTH: usize = 5;

/// Checks the shape of a registration request, accumulating every violation
/// rather than stopping at the first.
pub fn validate_registration(
    email: &str,
    first_name: &str,
    last_name: &str,
    password: &str,
) -> Result<(), AppError> {
    let mut violations = Vec::new();

    if !is_valid_email(email) {
        violations.push("email must be a valid email address".to_string());
    }
    if first_name.trim().is_empty() {
        violations.push("firstName is required".to_string());
    }
    if last_name.trim().is_empty() {
        violations.push("lastName is required".to_string());
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        violations.push(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}

/// Checks the shape of a login request.
pub fn validate_login(email: &str, password: &str) -> Result<(), AppError> {
    let mut violations = Vec::new();

    if !is_valid_email(email) {
        violations.push("email must be a valid email address".to_string());
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        violations.push(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations))
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_registration_passes() {
        assert!(validate_registration("a@x.com", "A", "B", "secret").is_ok());
    }

    #[test]
    fn test_every_violation_is_reported() {
        let err = validate_registration("not-an-email", "", "", "abc").unwrap_err();
        match err {
            AppError::Validation(violations) => {
                assert_eq!(violations.len(), 4);
                assert!(violations.iter().any(|v| v.contains("email")));
                assert!(violations.iter().any(|v| v.contains("firstName")));
                assert!(violations.iter().any(|v| v.contains("lastName")));
                assert!(violations.iter().any(|v| v.contains("password")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_password_boundary() {
        // Exactly the minimum length is accepted
        assert!(validate_registration("a@x.com", "A", "B", "12345").is_ok());
        assert!(validate_registration("a@x.com", "A", "B", "1234").is_err());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@x."));
    }

    #[test]
    fn test_login_violations_accumulate() {
        let err = validate_login("nope", "abc").unwrap_err();
        match err {
            AppError::Validation(violations) => assert_eq!(violations.len(), 2),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
