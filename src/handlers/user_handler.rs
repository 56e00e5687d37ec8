use actix_web::{delete, get, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{PaginationParams, UpdateUserRequest},
        response::{Page, UserDto},
    },
};

#[get("/users/me")]
async fn get_me(auth: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(UserDto::from(auth.0)))
}

#[put("/users/me")]
async fn update_me(
    state: web::Data<AppState>,
    request: web::Json<UpdateUserRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let user = state
        .user_service
        .update_profile(&auth.actor(), &auth.0.id, request)
        .await?;
    Ok(HttpResponse::Ok().json(UserDto::from(user)))
}

#[get("/users")]
async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    let (users, total) = state
        .user_service
        .list_users(&auth.actor(), pagination.offset(), pagination.limit())
        .await?;

    let items = users.into_iter().map(UserDto::from).collect();
    Ok(HttpResponse::Ok().json(Page::new(
        items,
        total,
        pagination.offset(),
        pagination.limit(),
    )))
}

#[get("/users/{id}")]
async fn get_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.view_user(&auth.actor(), &id).await?;
    Ok(HttpResponse::Ok().json(UserDto::from(user)))
}

#[delete("/users/{id}")]
async fn deactivate_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.deactivate_user(&auth.actor(), &id).await?;
    Ok(HttpResponse::Ok().json(UserDto::from(user)))
}
