use async_graphql::SimpleObject;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::domain::{
    Achievement, Area, AssignmentState, Course, CourseAssignment, DifficultyLevel, Enrollment,
    Exercise, ExerciseAttempt, ExerciseKind, Lesson, LessonProgress, ProgressState,
    TeacherStudentLink, User, UserAchievement, UserRole,
};

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct UserDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub points: i64,
    pub level: i64,
    pub active: bool,
    pub registered_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            full_name: user.full_name(),
            level: user.level(),
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            birth_date: user.birth_date,
            avatar_url: user.avatar_url,
            points: user.points,
            active: user.active,
            registered_at: user.registered_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[graphql(concrete(name = "UserPage", params(UserDto)))]
#[graphql(concrete(name = "CoursePage", params(CourseDto)))]
#[graphql(concrete(name = "RankingPage", params(RankingEntry)))]
pub struct Page<T: async_graphql::OutputType> {
    pub items: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

impl<T: async_graphql::OutputType> Page<T> {
    pub fn new(items: Vec<T>, total: i64, offset: i64, limit: i64) -> Self {
        Page {
            items,
            total,
            offset,
            limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AreaDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub order: i32,
}

impl From<Area> for AreaDto {
    fn from(area: Area) -> Self {
        AreaDto {
            id: area.id,
            name: area.name,
            description: area.description,
            icon: area.icon,
            color: area.color,
            order: area.order,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct CourseDto {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub objectives: Option<String>,
    pub level: DifficultyLevel,
    pub estimated_hours: Option<i32>,
    pub cover_image: Option<String>,
    pub teacher_id: String,
    pub area_id: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Course> for CourseDto {
    fn from(course: Course) -> Self {
        CourseDto {
            id: course.id,
            title: course.title,
            description: course.description,
            objectives: course.objectives,
            level: course.level,
            estimated_hours: course.estimated_hours,
            cover_image: course.cover_image,
            teacher_id: course.teacher_id,
            area_id: course.area_id,
            active: course.active,
            created_at: course.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct LessonDto {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub video_url: Option<String>,
    pub position: i32,
    pub points: i64,
    pub estimated_minutes: Option<i32>,
    pub active: bool,
}

impl From<Lesson> for LessonDto {
    fn from(lesson: Lesson) -> Self {
        LessonDto {
            id: lesson.id,
            course_id: lesson.course_id,
            title: lesson.title,
            description: lesson.description,
            content: lesson.content,
            video_url: lesson.video_url,
            position: lesson.position,
            points: lesson.points,
            estimated_minutes: lesson.estimated_minutes,
            active: lesson.active,
        }
    }
}

/// Exercise as shown to a caller; the answer key is only present for
/// callers who may manage the exercise.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct ExerciseDto {
    pub id: String,
    pub lesson_id: String,
    pub title: String,
    pub statement: String,
    pub kind: ExerciseKind,
    pub level: DifficultyLevel,
    pub points: i64,
    pub time_limit_minutes: Option<i32>,
    pub position: i32,
    pub options_json: Option<String>,
    pub latex_formula: Option<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ExerciseDto {
    pub fn from_exercise(exercise: Exercise, include_answer: bool) -> Self {
        ExerciseDto {
            id: exercise.id,
            lesson_id: exercise.lesson_id,
            title: exercise.title,
            statement: exercise.statement,
            kind: exercise.kind,
            level: exercise.level,
            points: exercise.points,
            time_limit_minutes: exercise.time_limit_minutes,
            position: exercise.position,
            options_json: exercise.options_json,
            latex_formula: exercise.latex_formula,
            active: exercise.active,
            correct_answer: include_answer.then_some(exercise.correct_answer),
            explanation: if include_answer { exercise.explanation } else { None },
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct EnrollmentDto {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub progress_percentage: f64,
    pub points: i64,
}

impl From<Enrollment> for EnrollmentDto {
    fn from(enrollment: Enrollment) -> Self {
        EnrollmentDto {
            id: enrollment.id,
            user_id: enrollment.user_id,
            course_id: enrollment.course_id,
            enrolled_at: enrollment.enrolled_at,
            completed_at: enrollment.completed_at,
            progress_percentage: enrollment.progress_percentage,
            points: enrollment.points,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct EnrolledCourseDto {
    pub course: CourseDto,
    pub enrollment: EnrollmentDto,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct LessonProgressDto {
    pub lesson_id: String,
    pub lesson_title: String,
    pub position: i32,
    pub state: ProgressState,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub points: i64,
}

impl LessonProgressDto {
    pub fn new(lesson: &Lesson, progress: LessonProgress) -> Self {
        LessonProgressDto {
            lesson_id: lesson.id.clone(),
            lesson_title: lesson.title.clone(),
            position: lesson.position,
            state: progress.state,
            started_at: progress.started_at,
            completed_at: progress.completed_at,
            points: progress.points,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct CourseProgressDto {
    pub course_id: String,
    pub user_id: String,
    pub progress_percentage: f64,
    pub total_lessons: i64,
    pub completed_lessons: i64,
    pub points: i64,
    pub completed_at: Option<DateTime<Utc>>,
    pub lessons: Vec<LessonProgressDto>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct ProgressUpdateDto {
    pub lesson_id: String,
    pub state: ProgressState,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Points awarded by this call; 0 when the lesson was already completed.
    pub points_awarded: i64,
    pub course_progress_percentage: f64,
    pub user_points: i64,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AttemptDto {
    pub id: String,
    pub exercise_id: String,
    pub answer: String,
    pub is_correct: bool,
    pub points: i64,
    pub submitted_at: DateTime<Utc>,
}

impl From<ExerciseAttempt> for AttemptDto {
    fn from(attempt: ExerciseAttempt) -> Self {
        AttemptDto {
            id: attempt.id,
            exercise_id: attempt.exercise_id,
            answer: attempt.answer,
            is_correct: attempt.is_correct,
            points: attempt.points,
            submitted_at: attempt.submitted_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AttemptResultDto {
    pub attempt: AttemptDto,
    pub explanation: Option<String>,
    pub user_points: i64,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct TeacherStudentLinkDto {
    pub id: String,
    pub teacher_id: String,
    pub student_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<TeacherStudentLink> for TeacherStudentLinkDto {
    fn from(link: TeacherStudentLink) -> Self {
        TeacherStudentLinkDto {
            id: link.id,
            teacher_id: link.teacher_id,
            student_id: link.student_id,
            created_at: link.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AssignmentDto {
    pub id: String,
    pub teacher_id: String,
    pub student_id: String,
    pub course_id: String,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub state: AssignmentState,
    pub overdue: bool,
    pub assigned_at: DateTime<Utc>,
}

impl From<CourseAssignment> for AssignmentDto {
    fn from(assignment: CourseAssignment) -> Self {
        AssignmentDto {
            overdue: assignment.is_overdue(Utc::now()),
            id: assignment.id,
            teacher_id: assignment.teacher_id,
            student_id: assignment.student_id,
            course_id: assignment.course_id,
            due_date: assignment.due_date,
            notes: assignment.notes,
            state: assignment.state,
            assigned_at: assignment.assigned_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AchievementDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub points_required: Option<i64>,
}

impl From<Achievement> for AchievementDto {
    fn from(achievement: Achievement) -> Self {
        AchievementDto {
            id: achievement.id,
            name: achievement.name,
            description: achievement.description,
            icon: achievement.icon,
            points_required: achievement.points_required,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct UserAchievementDto {
    pub achievement: AchievementDto,
    pub awarded_at: DateTime<Utc>,
}

impl UserAchievementDto {
    pub fn new(achievement: Achievement, grant: &UserAchievement) -> Self {
        UserAchievementDto {
            achievement: achievement.into(),
            awarded_at: grant.awarded_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct RankingEntry {
    pub rank: i64,
    pub user_id: String,
    pub full_name: String,
    pub points: i64,
    pub level: i64,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct UserStatistics {
    pub user_id: String,
    pub points: i64,
    pub level: i64,
    pub enrolled_courses: i64,
    pub completed_courses: i64,
    pub completed_lessons: i64,
    pub total_attempts: i64,
    pub correct_attempts: i64,
    pub accuracy_percentage: f64,
    pub minutes_spent: i64,
    pub achievements: i64,
    pub streak_days: i64,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct PlatformStatistics {
    pub students: i64,
    pub teachers: i64,
    pub admins: i64,
    pub active_courses: i64,
    pub active_lessons: i64,
    pub active_exercises: i64,
    pub total_attempts: i64,
    pub correct_attempts: i64,
    pub accuracy_percentage: f64,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, SimpleObject)]
pub struct MessageResponse {
    pub message: String,
}

/// Correct / total as a percentage rounded to two decimals; 0 with no attempts.
pub fn accuracy_percentage(correct: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (correct as f64 / total as f64 * 10_000.0).round() / 100.0
}
