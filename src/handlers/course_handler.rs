use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::CourseFilter,
        dto::{
            request::{CourseQueryParams, CreateAreaRequest, CreateCourseRequest, UpdateCourseRequest},
            response::{AreaDto, CourseDto, Page},
        },
    },
};

#[get("/areas")]
async fn list_areas(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let areas: Vec<AreaDto> = state
        .course_service
        .list_areas()
        .await?
        .into_iter()
        .map(AreaDto::from)
        .collect();
    Ok(HttpResponse::Ok().json(areas))
}

#[post("/areas")]
async fn create_area(
    state: web::Data<AppState>,
    request: web::Json<CreateAreaRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let area = state.course_service.create_area(&auth.actor(), request).await?;
    Ok(HttpResponse::Created().json(AreaDto::from(area)))
}

#[post("/courses")]
async fn create_course(
    state: web::Data<AppState>,
    request: web::Json<CreateCourseRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let course = state
        .course_service
        .create_course(&auth.actor(), request)
        .await?;
    Ok(HttpResponse::Created().json(CourseDto::from(course)))
}

#[get("/courses")]
async fn list_courses(
    state: web::Data<AppState>,
    query: web::Query<CourseQueryParams>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let pagination = query.pagination();
    let filter = CourseFilter {
        area_id: query.area_id,
        level: query.level,
        active: query.active,
        teacher_id: None,
    };

    let (courses, total) = state
        .course_service
        .list_courses(&filter, pagination.offset(), pagination.limit())
        .await?;

    let items = courses.into_iter().map(CourseDto::from).collect();
    Ok(HttpResponse::Ok().json(Page::new(
        items,
        total,
        pagination.offset(),
        pagination.limit(),
    )))
}

#[get("/courses/{id}")]
async fn get_course(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let course = state.course_service.get_course(&auth.actor(), &id).await?;
    Ok(HttpResponse::Ok().json(CourseDto::from(course)))
}

#[put("/courses/{id}")]
async fn update_course(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateCourseRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let course = state
        .course_service
        .update_course(&auth.actor(), &id, request)
        .await?;
    Ok(HttpResponse::Ok().json(CourseDto::from(course)))
}

#[delete("/courses/{id}")]
async fn deactivate_course(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let course = state
        .course_service
        .deactivate_course(&auth.actor(), &id)
        .await?;
    Ok(HttpResponse::Ok().json(CourseDto::from(course)))
}
