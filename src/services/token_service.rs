use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::errors::auth::AuthError;
use crate::types::internal::auth::Claims;

/// Manages JWT token generation and validation for admin sessions
pub struct TokenService {
    jwt_secret: String,
    jwt_expiration_minutes: i64,
}

impl TokenService {
    /// Create a new TokenService with the given JWT secret
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            jwt_expiration_minutes: 30,
        }
    }

    /// Generate a JWT for the given admin email
    ///
    /// # Arguments
    /// * `email` - The email of the authenticated admin, stored as `sub`
    ///
    /// # Returns
    /// * `Result<String, AuthError>` - The encoded JWT or an error
    pub fn generate_jwt(&self, email: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let expiration = now + (self.jwt_expiration_minutes * 60);

        let claims = Claims {
            sub: email.to_string(),
            exp: expiration,
            iat: now,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::internal_error(format!("Failed to generate JWT: {}", e)))?;

        Ok(token)
    }

    /// Validate a JWT and return the claims
    ///
    /// # Arguments
    /// * `token` - The JWT to validate
    ///
    /// # Returns
    /// * `Result<Claims, AuthError>` - The decoded claims or an error
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            // Check if the error is due to expiration
            if e.to_string().contains("ExpiredSignature") {
                AuthError::expired_token()
            } else {
                AuthError::invalid_token()
            }
        })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .finish()
    }
}

impl fmt::Display for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenService {{ jwt_expiration: {}min }}",
            self.jwt_expiration_minutes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    #[test]
    fn test_generate_jwt_creates_valid_jwt() {
        let token_service = TokenService::new("test-secret-key-minimum-32-characters-long".to_string());

        let result = token_service.generate_jwt("admin@test.com");

        assert!(result.is_ok());
        let token = result.unwrap();

        // Verify token can be decoded
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false; // Don't validate expiration in this test

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("test-secret-key-minimum-32-characters-long".as_bytes()),
            &validation,
        );

        assert!(decoded.is_ok());
    }

    #[test]
    fn test_jwt_contains_admin_email() {
        let token_service = TokenService::new("test-secret-key-minimum-32-characters-long".to_string());

        let token = token_service.generate_jwt("admin@test.com").unwrap();
        let claims = token_service.validate_jwt(&token).unwrap();

        assert_eq!(claims.sub, "admin@test.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_validate_jwt_rejects_garbage() {
        let token_service = TokenService::new("test-secret-key-minimum-32-characters-long".to_string());

        let result = token_service.validate_jwt("not-a-jwt");

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_validate_jwt_rejects_wrong_secret() {
        let token_service = TokenService::new("test-secret-key-minimum-32-characters-long".to_string());
        let other = TokenService::new("another-secret-key-minimum-32-characters".to_string());

        let token = token_service.generate_jwt("admin@test.com").unwrap();
        let result = other.validate_jwt(&token);

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }
}
