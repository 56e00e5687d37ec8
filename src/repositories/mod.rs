pub mod achievement_repository;
pub mod area_repository;
pub mod course_assignment_repository;
pub mod course_repository;
pub mod enrollment_repository;
pub mod exercise_attempt_repository;
pub mod exercise_repository;
pub mod lesson_progress_repository;
pub mod lesson_repository;
pub mod teacher_student_repository;
pub mod user_repository;

pub use achievement_repository::{AchievementRepository, MongoAchievementRepository};
pub use area_repository::{AreaRepository, MongoAreaRepository};
pub use course_assignment_repository::{CourseAssignmentRepository, MongoCourseAssignmentRepository};
pub use course_repository::{CourseRepository, MongoCourseRepository};
pub use enrollment_repository::{EnrollmentRepository, MongoEnrollmentRepository};
pub use exercise_attempt_repository::{AttemptCounts, ExerciseAttemptRepository, MongoExerciseAttemptRepository};
pub use exercise_repository::{ExerciseRepository, MongoExerciseRepository};
pub use lesson_progress_repository::{LessonProgressRepository, MongoLessonProgressRepository};
pub use lesson_repository::{LessonRepository, MongoLessonRepository};
pub use teacher_student_repository::{MongoTeacherStudentRepository, TeacherStudentRepository};
pub use user_repository::{MongoUserRepository, UserRepository};

#[cfg(test)]
pub use achievement_repository::MockAchievementRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
