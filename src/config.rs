use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_minutes: i64,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "edumath-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_minutes: env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(30),
            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Rejects configuration that must never reach production: the default
    /// JWT secret or one shorter than 32 characters.
    pub fn validate_for_production(&self) -> AppResult<()> {
        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using default value! Set JWT_SECRET to a secure random string."
                    .to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}). Must be at least 32 characters.",
                jwt_secret.len()
            )));
        }

        if self.jwt_expiration_minutes <= 0 {
            return Err(AppError::InternalError(
                "JWT_EXPIRATION_MINUTES must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "edumath-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_minutes: 30,
            environment: "test".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(config.jwt_expiration_minutes > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_conn_string, "mongodb://localhost:27017");
        assert_eq!(config.mongo_db_name, "edumath-test");
        assert_eq!(config.jwt_expiration_minutes, 30);
        assert!(!config.is_production());
    }

    #[test]
    fn test_production_validation_rejects_weak_secrets() {
        let mut config = Config::test_config();
        assert!(config.validate_for_production().is_err());

        config.jwt_secret = SecretString::from(DEFAULT_JWT_SECRET.to_string());
        assert!(config.validate_for_production().is_err());

        config.jwt_secret = SecretString::from("a".repeat(48));
        assert!(config.validate_for_production().is_ok());
    }
}
