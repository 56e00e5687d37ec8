use async_graphql::Context;

use crate::{
    app_state::AppState,
    auth::{policy::Actor, Claims},
    errors::{AppError, AppResult},
    models::domain::User,
};

pub fn extract_claims_from_context(ctx: &Context<'_>) -> AppResult<Claims> {
    ctx.data::<Claims>()
        .cloned()
        .map_err(|_| AppError::Unauthorized("Authentication required".to_string()))
}

/// Resolves the GraphQL caller to a live account, as the REST extractor does.
pub async fn current_user(ctx: &Context<'_>) -> AppResult<User> {
    let claims = extract_claims_from_context(ctx)?;
    let state = ctx
        .data::<AppState>()
        .map_err(|_| AppError::InternalError("Application state not configured".to_string()))?;

    state.user_service.resolve_active_user(&claims.sub).await
}

pub async fn current_actor(ctx: &Context<'_>) -> AppResult<Actor> {
    Ok(Actor::from(&current_user(ctx).await?))
}
