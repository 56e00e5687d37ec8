use std::sync::Arc;

use crate::{
    auth::policy::{Action, Actor, Target},
    errors::{AppError, AppResult},
    models::{
        domain::UserRole,
        dto::response::{accuracy_percentage, PlatformStatistics, UserStatistics},
    },
    repositories::{
        AchievementRepository, CourseRepository, EnrollmentRepository, ExerciseAttemptRepository,
        ExerciseRepository, LessonProgressRepository, LessonRepository, UserRepository,
    },
    services::access_service::AccessService,
};

pub struct StatisticsService {
    access: Arc<AccessService>,
    users: Arc<dyn UserRepository>,
    courses: Arc<dyn CourseRepository>,
    lessons: Arc<dyn LessonRepository>,
    exercises: Arc<dyn ExerciseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    progress: Arc<dyn LessonProgressRepository>,
    attempts: Arc<dyn ExerciseAttemptRepository>,
    achievements: Arc<dyn AchievementRepository>,
}

impl StatisticsService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        access: Arc<AccessService>,
        users: Arc<dyn UserRepository>,
        courses: Arc<dyn CourseRepository>,
        lessons: Arc<dyn LessonRepository>,
        exercises: Arc<dyn ExerciseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        progress: Arc<dyn LessonProgressRepository>,
        attempts: Arc<dyn ExerciseAttemptRepository>,
        achievements: Arc<dyn AchievementRepository>,
    ) -> Self {
        Self {
            access,
            users,
            courses,
            lessons,
            exercises,
            enrollments,
            progress,
            attempts,
            achievements,
        }
    }

    /// Visible to the user, admins, and teachers linked to the user.
    pub async fn user_statistics(&self, actor: &Actor, user_id: &str) -> AppResult<UserStatistics> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))?;
        self.access.authorize_statistics(actor, &user.id).await?;

        let enrollments = self.enrollments.list_active_by_user(&user.id).await?;
        let records = self.progress.list_by_user(&user.id).await?;
        let attempts = self.attempts.counts_by_user(&user.id).await?;
        let achievements = self.achievements.list_grants_by_user(&user.id).await?;

        let completed: Vec<_> = records.iter().filter(|r| r.is_completed()).collect();

        Ok(UserStatistics {
            user_id: user.id.clone(),
            points: user.points,
            level: user.level(),
            enrolled_courses: enrollments.len() as i64,
            completed_courses: enrollments.iter().filter(|e| e.is_complete()).count() as i64,
            completed_lessons: completed.len() as i64,
            total_attempts: attempts.total,
            correct_attempts: attempts.correct,
            accuracy_percentage: accuracy_percentage(attempts.correct, attempts.total),
            minutes_spent: completed.iter().map(|r| r.minutes_spent()).sum(),
            achievements: achievements.len() as i64,
            // Daily activity is not tracked, so there is no streak to report.
            streak_days: 0,
        })
    }

    pub async fn platform_statistics(&self, actor: &Actor) -> AppResult<PlatformStatistics> {
        self.access
            .check(actor, Action::ViewPlatformStatistics, Target::Platform)?;

        let attempts = self.attempts.counts().await?;

        Ok(PlatformStatistics {
            students: self.users.count_by_role(UserRole::Student).await?,
            teachers: self.users.count_by_role(UserRole::Teacher).await?,
            admins: self.users.count_by_role(UserRole::Admin).await?,
            active_courses: self.courses.count_active().await?,
            active_lessons: self.lessons.count_active().await?,
            active_exercises: self.exercises.count_active().await?,
            total_attempts: attempts.total,
            correct_attempts: attempts.correct,
            accuracy_percentage: accuracy_percentage(attempts.correct, attempts.total),
        })
    }
}
