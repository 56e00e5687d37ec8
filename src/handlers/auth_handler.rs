use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{LoginRequest, RegisterRequest},
        response::UserDto,
    },
};

#[post("/register")]
async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let user = state.auth_service.register(request).await?;
    Ok(HttpResponse::Created().json(UserDto::from(user)))
}

#[post("/login")]
async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state.auth_service.login(request).await?;
    Ok(HttpResponse::Ok().json(response))
}
