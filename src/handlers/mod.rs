pub mod achievement_handler;
pub mod auth_handler;
pub mod course_handler;
pub mod enrollment_handler;
pub mod exercise_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod lesson_handler;
pub mod ranking_handler;
pub mod statistics_handler;
pub mod teacher_handler;
pub mod user_handler;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::{auth::AuthMiddleware, errors::AppError};

pub const API_PREFIX: &str = "/api/v1";

/// Malformed JSON bodies surface as validation errors with the usual error body.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(err.to_string()).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(json_error_handler)
}

/// Registers every route. Callers provide `web::Data<AppState>` and
/// `web::Data<Schema>` on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health_handler::index)
        .service(health_handler::health_check)
        .service(health_handler::health_check_live)
        .service(health_handler::health_check_ready)
        .service(
            web::resource("/graphql")
                .route(web::post().to(graphql_handler::graphql))
                .route(web::get().to(graphql_handler::graphql_playground)),
        )
        .service(
            web::scope(&format!("{}/auth", API_PREFIX))
                .service(auth_handler::register)
                .service(auth_handler::login),
        )
        .service(
            web::scope(API_PREFIX)
                .wrap(AuthMiddleware)
                // users: the literal `me` routes must precede `{id}`
                .service(user_handler::get_me)
                .service(user_handler::update_me)
                .service(enrollment_handler::my_courses)
                .service(enrollment_handler::my_course_progress)
                .service(user_handler::list_users)
                .service(user_handler::get_user)
                .service(user_handler::deactivate_user)
                .service(statistics_handler::user_statistics)
                .service(achievement_handler::user_achievements)
                .service(achievement_handler::grant_achievement)
                // catalogue
                .service(course_handler::list_areas)
                .service(course_handler::create_area)
                .service(course_handler::create_course)
                .service(course_handler::list_courses)
                .service(course_handler::get_course)
                .service(course_handler::update_course)
                .service(course_handler::deactivate_course)
                .service(enrollment_handler::enroll)
                .service(lesson_handler::list_course_lessons)
                .service(lesson_handler::create_lesson)
                .service(lesson_handler::get_lesson)
                .service(lesson_handler::update_lesson)
                .service(lesson_handler::deactivate_lesson)
                .service(lesson_handler::start_lesson)
                .service(lesson_handler::complete_lesson)
                .service(exercise_handler::list_lesson_exercises)
                .service(exercise_handler::create_exercise)
                .service(exercise_handler::get_exercise)
                .service(exercise_handler::update_exercise)
                .service(exercise_handler::deactivate_exercise)
                .service(exercise_handler::submit_attempt)
                .service(exercise_handler::list_attempts)
                // relations
                .service(teacher_handler::link_teacher_student)
                .service(teacher_handler::my_students)
                .service(teacher_handler::assign_course)
                .service(teacher_handler::my_assignments)
                .service(teacher_handler::update_assignment)
                .service(teacher_handler::remove_assignment)
                .service(teacher_handler::student_course_progress)
                .service(teacher_handler::student_assignments)
                .service(teacher_handler::start_assignment)
                // gamification
                .service(achievement_handler::list_achievements)
                .service(achievement_handler::create_achievement)
                .service(ranking_handler::leaderboard)
                .service(ranking_handler::user_rank)
                .service(statistics_handler::platform_statistics),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::{assert_error_status, assert_success_status};
    use actix_web::{test, App, HttpResponse};

    async fn echo(body: web::Json<serde_json::Value>) -> HttpResponse {
        HttpResponse::Ok().json(body.into_inner())
    }

    #[actix_web::test]
    async fn test_malformed_json_is_a_validation_error() {
        let app = test::init_service(
            App::new()
                .app_data(json_config())
                .route("/echo", web::post().to(echo)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/echo")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_error_status(resp.status());
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_well_formed_json_passes_through() {
        let app = test::init_service(
            App::new()
                .app_data(json_config())
                .route("/echo", web::post().to(echo)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/echo")
            .set_json(serde_json::json!({"answer": "6x"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());
    }
}
