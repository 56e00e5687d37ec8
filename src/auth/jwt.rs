use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
    models::domain::User,
};

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_minutes: i64,
}

impl JwtService {
    pub fn new(secret: &SecretString, expiration_minutes: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
            expiration_minutes,
        }
    }

    pub fn expiration_seconds(&self) -> i64 {
        self.expiration_minutes * 60
    }

    pub fn create_token(&self, user: &User) -> AppResult<String> {
        let claims = Claims::new(user, self.expiration_minutes);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create JWT: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token has expired".to_string())
                }
                ErrorKind::InvalidSignature => {
                    AppError::Unauthorized("Token signature is invalid".to_string())
                }
                _ => AppError::Unauthorized(format!("Invalid token: {}", e)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, models::domain::UserRole};

    #[test]
    fn test_jwt_create_and_validate() {
        let config = Config::test_config();
        let jwt_service = JwtService::new(&config.jwt_secret, 30);

        let user = User::test_user("Juan", UserRole::Student);
        let token = jwt_service.create_token(&user).unwrap();

        assert!(!token.is_empty());

        let claims = jwt_service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, UserRole::Student);
        assert_eq!(jwt_service.expiration_seconds(), 1800);
    }

    #[test]
    fn test_jwt_invalid_token() {
        let config = Config::test_config();
        let jwt_service = JwtService::new(&config.jwt_secret, 30);

        let result = jwt_service.validate_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_jwt_expired_token() {
        let config = Config::test_config();
        // Far enough in the past to fall outside the default leeway.
        let jwt_service = JwtService::new(&config.jwt_secret, -10);

        let user = User::test_user("Juan", UserRole::Student);
        let token = jwt_service.create_token(&user).unwrap();

        match jwt_service.validate_token(&token) {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("expired")),
            other => panic!("Expected expired token error, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[test]
    fn test_jwt_rejects_foreign_secret() {
        let issuer = JwtService::new(&SecretString::from("one-secret".to_string()), 30);
        let verifier = JwtService::new(&SecretString::from("other-secret".to_string()), 30);

        let token = issuer
            .create_token(&User::test_user("Ana", UserRole::Admin))
            .unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }
}
