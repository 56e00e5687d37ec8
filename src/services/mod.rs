pub mod access_service;
pub mod achievement_service;
pub mod attempt_service;
pub mod auth_service;
pub mod course_service;
pub mod enrollment_service;
pub mod exercise_service;
pub mod grading_service;
pub mod lesson_service;
pub mod progress_service;
pub mod ranking_service;
pub mod statistics_service;
pub mod teacher_service;
pub mod user_service;

pub use access_service::AccessService;
pub use achievement_service::AchievementService;
pub use attempt_service::AttemptService;
pub use auth_service::AuthService;
pub use course_service::CourseService;
pub use enrollment_service::EnrollmentService;
pub use exercise_service::ExerciseService;
pub use grading_service::{Grade, GradingService};
pub use lesson_service::LessonService;
pub use progress_service::ProgressService;
pub use ranking_service::RankingService;
pub use statistics_service::StatisticsService;
pub use teacher_service::TeacherService;
pub use user_service::UserService;
