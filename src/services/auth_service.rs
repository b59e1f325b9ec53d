use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::web::error::AppError;
use crate::web::models::{AuthenticatedUser, Claims, USER_ROLE};

/// Issues a 24 hour token for `user_id` carrying the given role.
pub fn create_jwt(
    user_id: i32,
    subject: &str,
    role: &str,
    jwt_secret: &str,
) -> Result<String, AppError> {
    let expiration = (Utc::now() + Duration::hours(24)).timestamp() as usize;

    let claims = Claims {
        sub: subject.to_string(),
        user_id,
        role: role.to_string(),
        exp: expiration,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(jwt_secret.as_ref()))
        .map_err(|e| AppError::TokenCreationError(e.to_string()))
}

/// Checks signature and expiry, then requires the `user` role.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<AuthenticatedUser, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {e}")))?;

    let claims = token_data.claims;
    if claims.role != USER_ROLE {
        return Err(AppError::Unauthorized(format!(
            "Role '{}' may not access this resource",
            claims.role
        )));
    }

    Ok(AuthenticatedUser { id: claims.user_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_and_validate() {
        let token = create_jwt(17, "ada", USER_ROLE, SECRET).unwrap();
        let user = validate_token(&token, SECRET).unwrap();
        assert_eq!(user.id, 17);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let token = create_jwt(17, "ada", USER_ROLE, SECRET).unwrap();
        let result = validate_token(&token, "other-secret");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_other_role_is_unauthorized() {
        let token = create_jwt(1, "root", "admin", SECRET).unwrap();
        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let claims = Claims {
            sub: "ada".to_string(),
            user_id: 17,
            role: USER_ROLE.to_string(),
            exp: (Utc::now() - Duration::hours(2)).timestamp() as usize,
        };
        let key = EncodingKey::from_secret(SECRET.as_ref());
        let token = encode(&Header::default(), &claims, &key).unwrap();
        assert!(matches!(validate_token(&token, SECRET), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(validate_token("not.a.jwt", SECRET), Err(AppError::Unauthorized(_))));
    }
}
