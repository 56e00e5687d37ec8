use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateAchievementRequest, GrantAchievementRequest},
        response::{AchievementDto, UserAchievementDto},
    },
};

#[get("/achievements")]
async fn list_achievements(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let achievements: Vec<AchievementDto> = state
        .achievement_service
        .list()
        .await?
        .into_iter()
        .map(AchievementDto::from)
        .collect();
    Ok(HttpResponse::Ok().json(achievements))
}

#[post("/achievements")]
async fn create_achievement(
    state: web::Data<AppState>,
    request: web::Json<CreateAchievementRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let achievement = state
        .achievement_service
        .create(&auth.actor(), request)
        .await?;
    Ok(HttpResponse::Created().json(AchievementDto::from(achievement)))
}

#[get("/users/{id}/achievements")]
async fn user_achievements(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let held: Vec<UserAchievementDto> = state
        .achievement_service
        .list_for_user(&auth.actor(), &user_id)
        .await?
        .into_iter()
        .map(|(achievement, grant)| UserAchievementDto::new(achievement, &grant))
        .collect();
    Ok(HttpResponse::Ok().json(held))
}

#[post("/users/{id}/achievements")]
async fn grant_achievement(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    request: web::Json<GrantAchievementRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let (achievement, grant) = state
        .achievement_service
        .grant(&auth.actor(), &user_id, &request.achievement_id)
        .await?;
    Ok(HttpResponse::Created().json(UserAchievementDto::new(achievement, &grant)))
}
