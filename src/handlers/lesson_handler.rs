use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateLessonRequest, UpdateLessonRequest},
        response::LessonDto,
    },
};

#[post("/lessons")]
async fn create_lesson(
    state: web::Data<AppState>,
    request: web::Json<CreateLessonRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let lesson = state
        .lesson_service
        .create_lesson(&auth.actor(), request)
        .await?;
    Ok(HttpResponse::Created().json(LessonDto::from(lesson)))
}

#[get("/courses/{id}/lessons")]
async fn list_course_lessons(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let lessons: Vec<LessonDto> = state
        .lesson_service
        .list_lessons(&auth.actor(), &course_id)
        .await?
        .into_iter()
        .map(LessonDto::from)
        .collect();
    Ok(HttpResponse::Ok().json(lessons))
}

#[get("/lessons/{id}")]
async fn get_lesson(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let lesson = state.lesson_service.get_lesson(&auth.actor(), &id).await?;
    Ok(HttpResponse::Ok().json(LessonDto::from(lesson)))
}

#[put("/lessons/{id}")]
async fn update_lesson(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateLessonRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let lesson = state
        .lesson_service
        .update_lesson(&auth.actor(), &id, request)
        .await?;
    Ok(HttpResponse::Ok().json(LessonDto::from(lesson)))
}

#[delete("/lessons/{id}")]
async fn deactivate_lesson(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let lesson = state
        .lesson_service
        .deactivate_lesson(&auth.actor(), &id)
        .await?;
    Ok(HttpResponse::Ok().json(LessonDto::from(lesson)))
}

#[post("/lessons/{id}/start")]
async fn start_lesson(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let update = state
        .progress_service
        .start_lesson(&auth.actor(), &id)
        .await?;
    Ok(HttpResponse::Ok().json(update))
}

#[post("/lessons/{id}/complete")]
async fn complete_lesson(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let update = state
        .progress_service
        .complete_lesson(&auth.actor(), &id)
        .await?;
    Ok(HttpResponse::Ok().json(update))
}
