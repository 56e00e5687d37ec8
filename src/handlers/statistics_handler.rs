use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, auth::AuthenticatedUser, errors::AppError};

#[get("/users/{id}/statistics")]
async fn user_statistics(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let statistics = state
        .statistics_service
        .user_statistics(&auth.actor(), &user_id)
        .await?;
    Ok(HttpResponse::Ok().json(statistics))
}

#[get("/statistics/platform")]
async fn platform_statistics(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let statistics = state
        .statistics_service
        .platform_statistics(&auth.actor())
        .await?;
    Ok(HttpResponse::Ok().json(statistics))
}
