use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateAssignmentRequest, LinkTeacherStudentRequest, UpdateAssignmentRequest},
        response::{AssignmentDto, TeacherStudentLinkDto, UserDto},
    },
};

#[post("/admin/teacher-students")]
async fn link_teacher_student(
    state: web::Data<AppState>,
    request: web::Json<LinkTeacherStudentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let link = state.teacher_service.link(&auth.actor(), request).await?;
    Ok(HttpResponse::Created().json(TeacherStudentLinkDto::from(link)))
}

#[get("/teachers/me/students")]
async fn my_students(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let students: Vec<UserDto> = state
        .teacher_service
        .roster(&auth.actor())
        .await?
        .into_iter()
        .map(UserDto::from)
        .collect();
    Ok(HttpResponse::Ok().json(students))
}

#[post("/teachers/me/assignments")]
async fn assign_course(
    state: web::Data<AppState>,
    request: web::Json<CreateAssignmentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let assignments: Vec<AssignmentDto> = state
        .teacher_service
        .assign(&auth.actor(), request)
        .await?
        .into_iter()
        .map(AssignmentDto::from)
        .collect();
    Ok(HttpResponse::Created().json(assignments))
}

#[get("/teachers/me/assignments")]
async fn my_assignments(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let assignments: Vec<AssignmentDto> = state
        .teacher_service
        .list_assignments(&auth.actor())
        .await?
        .into_iter()
        .map(AssignmentDto::from)
        .collect();
    Ok(HttpResponse::Ok().json(assignments))
}

#[put("/teachers/me/assignments/{id}")]
async fn update_assignment(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateAssignmentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let assignment = state
        .teacher_service
        .update_assignment(&auth.actor(), &id, request)
        .await?;
    Ok(HttpResponse::Ok().json(AssignmentDto::from(assignment)))
}

#[delete("/teachers/me/assignments/{id}")]
async fn remove_assignment(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let assignment = state
        .teacher_service
        .remove_assignment(&auth.actor(), &id)
        .await?;
    Ok(HttpResponse::Ok().json(AssignmentDto::from(assignment)))
}

#[get("/teachers/me/students/{student_id}/courses/{course_id}/progress")]
async fn student_course_progress(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (student_id, course_id) = path.into_inner();
    let progress = state
        .teacher_service
        .student_course_progress(&auth.actor(), &student_id, &course_id)
        .await?;
    Ok(HttpResponse::Ok().json(progress))
}

#[get("/students/me/assignments")]
async fn student_assignments(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let assignments: Vec<AssignmentDto> = state
        .teacher_service
        .student_assignments(&auth.actor())
        .await?
        .into_iter()
        .map(AssignmentDto::from)
        .collect();
    Ok(HttpResponse::Ok().json(assignments))
}

#[post("/students/me/assignments/{id}/start")]
async fn start_assignment(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let assignment = state
        .teacher_service
        .start_assignment(&auth.actor(), &id)
        .await?;
    Ok(HttpResponse::Ok().json(AssignmentDto::from(assignment)))
}
