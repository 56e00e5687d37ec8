use std::sync::Arc;

use crate::{
    auth::{
        password::{hash_password, verify_password},
        JwtService,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{User, UserRole},
        dto::{
            request::{LoginRequest, RegisterRequest},
            response::LoginResponse,
        },
    },
    repositories::UserRepository,
};

const INVALID_CREDENTIALS: &str = "Incorrect email or password";

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_service: Arc<JwtService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_service: Arc<JwtService>) -> Self {
        Self { users, jwt_service }
    }

    /// Public sign-up. Admin accounts cannot be self-registered.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        let role = request.role.unwrap_or_default();
        if role == UserRole::Admin {
            return Err(AppError::Forbidden(
                "Admin accounts cannot be self-registered".to_string(),
            ));
        }

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Email '{}' is already registered",
                request.email.trim().to_lowercase()
            )));
        }

        let password_hash = hash_password(&request.password)?;
        let mut user = User::new(
            request.first_name.trim(),
            request.last_name.trim(),
            &request.email,
            &password_hash,
            role,
        );
        user.birth_date = request.birth_date;

        let user = self.users.create(user).await?;
        log::info!("Registered {} account {}", user.role.as_str(), user.id);
        Ok(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            log::warn!("Failed login for user {}", user.id);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        if !user.active {
            return Err(AppError::Unauthorized("Account is inactive".to_string()));
        }

        Ok(LoginResponse {
            access_token: self.jwt_service.create_token(&user)?,
            token_type: "bearer".to_string(),
            expires_in: self.jwt_service.expiration_seconds(),
        })
    }
}
