pub mod achievement;
pub mod area;
pub mod course;
pub mod course_assignment;
pub mod enrollment;
pub mod exercise;
pub mod exercise_attempt;
pub mod lesson;
pub mod lesson_progress;
pub mod teacher_student;
pub mod user;

pub use achievement::{Achievement, UserAchievement};
pub use area::Area;
pub use course::{Course, CourseFilter, DifficultyLevel};
pub use course_assignment::{AssignmentState, CourseAssignment};
pub use enrollment::Enrollment;
pub use exercise::{Exercise, ExerciseKind};
pub use exercise_attempt::ExerciseAttempt;
pub use lesson::Lesson;
pub use lesson_progress::{LessonProgress, ProgressState};
pub use teacher_student::TeacherStudentLink;
pub use user::{User, UserRole};
