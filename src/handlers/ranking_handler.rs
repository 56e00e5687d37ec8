use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{request::PaginationParams, response::Page},
};

#[get("/ranking")]
async fn leaderboard(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    let (entries, total) = state
        .ranking_service
        .leaderboard(pagination.offset(), pagination.limit())
        .await?;
    Ok(HttpResponse::Ok().json(Page::new(
        entries,
        total,
        pagination.offset(),
        pagination.limit(),
    )))
}

#[get("/ranking/users/{id}")]
async fn user_rank(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let entry = state.ranking_service.rank_of(&user_id).await?;
    Ok(HttpResponse::Ok().json(entry))
}
