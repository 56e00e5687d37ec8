use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::response::{CourseDto, EnrolledCourseDto, EnrollmentDto},
};

#[post("/courses/{id}/enroll")]
async fn enroll(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let enrollment = state
        .enrollment_service
        .enroll(&auth.actor(), &course_id)
        .await?;
    Ok(HttpResponse::Created().json(EnrollmentDto::from(enrollment)))
}

#[get("/users/me/courses")]
async fn my_courses(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let courses: Vec<EnrolledCourseDto> = state
        .enrollment_service
        .my_courses(&auth.0.id)
        .await?
        .into_iter()
        .map(|(course, enrollment)| EnrolledCourseDto {
            course: CourseDto::from(course),
            enrollment: EnrollmentDto::from(enrollment),
        })
        .collect();
    Ok(HttpResponse::Ok().json(courses))
}

#[get("/users/me/progress/{course_id}")]
async fn my_course_progress(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let progress = state
        .progress_service
        .course_progress(&auth.0.id, &course_id)
        .await?;
    Ok(HttpResponse::Ok().json(progress))
}
