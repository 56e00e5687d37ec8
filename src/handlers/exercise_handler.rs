use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateExerciseRequest, SubmitAnswerRequest, UpdateExerciseRequest},
        response::{AttemptDto, ExerciseDto},
    },
};

#[post("/exercises")]
async fn create_exercise(
    state: web::Data<AppState>,
    request: web::Json<CreateExerciseRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let exercise = state
        .exercise_service
        .create_exercise(&auth.actor(), request)
        .await?;
    Ok(HttpResponse::Created().json(ExerciseDto::from_exercise(exercise, true)))
}

#[get("/lessons/{id}/exercises")]
async fn list_lesson_exercises(
    state: web::Data<AppState>,
    lesson_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let exercises: Vec<ExerciseDto> = state
        .exercise_service
        .list_exercises(&auth.actor(), &lesson_id)
        .await?
        .into_iter()
        .map(|(exercise, include_answer)| ExerciseDto::from_exercise(exercise, include_answer))
        .collect();
    Ok(HttpResponse::Ok().json(exercises))
}

#[get("/exercises/{id}")]
async fn get_exercise(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (exercise, include_answer) = state
        .exercise_service
        .get_exercise(&auth.actor(), &id)
        .await?;
    Ok(HttpResponse::Ok().json(ExerciseDto::from_exercise(exercise, include_answer)))
}

#[put("/exercises/{id}")]
async fn update_exercise(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateExerciseRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let exercise = state
        .exercise_service
        .update_exercise(&auth.actor(), &id, request)
        .await?;
    Ok(HttpResponse::Ok().json(ExerciseDto::from_exercise(exercise, true)))
}

#[delete("/exercises/{id}")]
async fn deactivate_exercise(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let exercise = state
        .exercise_service
        .deactivate_exercise(&auth.actor(), &id)
        .await?;
    Ok(HttpResponse::Ok().json(ExerciseDto::from_exercise(exercise, true)))
}

#[post("/exercises/{id}/attempts")]
async fn submit_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitAnswerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let result = state
        .attempt_service
        .submit(&auth.actor(), &id, &request.answer)
        .await?;
    Ok(HttpResponse::Created().json(result))
}

#[get("/exercises/{id}/attempts")]
async fn list_attempts(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let attempts: Vec<AttemptDto> = state
        .attempt_service
        .list_own(&auth.actor(), &id)
        .await?
        .into_iter()
        .map(AttemptDto::from)
        .collect();
    Ok(HttpResponse::Ok().json(attempts))
}
