use std::sync::Arc;

use crate::{
    auth::policy::{authorize, Action, Actor, Target},
    errors::{AppError, AppResult},
    models::{domain::User, dto::request::UpdateUserRequest},
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))
    }

    /// The account behind a verified token. Deleted or deactivated accounts
    /// are treated as unauthenticated.
    pub async fn resolve_active_user(&self, id: &str) -> AppResult<User> {
        match self.repository.find_by_id(id).await? {
            Some(user) if user.active => Ok(user),
            _ => Err(AppError::Unauthorized("Account is inactive or no longer exists".to_string())),
        }
    }

    pub async fn view_user(&self, actor: &Actor, id: &str) -> AppResult<User> {
        let user = self.get_user(id).await?;
        authorize(actor, Action::ReadProfile, Target::User { user_id: &user.id }).into_result()?;
        Ok(user)
    }

    pub async fn update_profile(&self, actor: &Actor, id: &str, request: UpdateUserRequest) -> AppResult<User> {
        let mut user = self.get_user(id).await?;
        authorize(actor, Action::UpdateProfile, Target::User { user_id: &user.id }).into_result()?;

        if let Some(first_name) = request.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name;
        }
        if request.birth_date.is_some() {
            user.birth_date = request.birth_date;
        }
        if request.avatar_url.is_some() {
            user.avatar_url = request.avatar_url;
        }

        self.repository.update_profile(user).await
    }

    pub async fn list_users(&self, actor: &Actor, offset: i64, limit: i64) -> AppResult<(Vec<User>, i64)> {
        authorize(actor, Action::ManageUsers, Target::Platform).into_result()?;
        self.repository.find_all_paginated(offset, limit).await
    }

    /// Soft delete: the account stays, it can no longer authenticate.
    pub async fn deactivate_user(&self, actor: &Actor, id: &str) -> AppResult<User> {
        authorize(actor, Action::ManageUsers, Target::Platform).into_result()?;

        let mut user = self.get_user(id).await?;
        if !user.active {
            return Ok(user);
        }
        user.active = false;

        let user = self.repository.update_profile(user).await?;
        log::info!("User {} deactivated by {}", user.id, actor.user_id);
        Ok(user)
    }
}
