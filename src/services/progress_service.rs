use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use chrono::{DateTime, Utc};

use crate::{
    auth::policy::{Action, Actor},
    errors::{AppError, AppResult},
    models::{
        domain::{
            enrollment::progress_percentage, Course, Enrollment, Lesson, LessonProgress,
            ProgressState, User,
        },
        dto::response::{CourseProgressDto, LessonProgressDto, ProgressUpdateDto},
    },
    repositories::{
        CourseAssignmentRepository, EnrollmentRepository, LessonProgressRepository,
        LessonRepository, UserRepository,
    },
    services::{access_service::AccessService, achievement_service::AchievementService},
};

/// Lesson state machine, point awards and enrollment percentages.
pub struct ProgressService {
    access: Arc<AccessService>,
    lessons: Arc<dyn LessonRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    progress: Arc<dyn LessonProgressRepository>,
    users: Arc<dyn UserRepository>,
    assignments: Arc<dyn CourseAssignmentRepository>,
    achievements: Arc<AchievementService>,
}

impl ProgressService {
    pub fn new(
        access: Arc<AccessService>,
        lessons: Arc<dyn LessonRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        progress: Arc<dyn LessonProgressRepository>,
        users: Arc<dyn UserRepository>,
        assignments: Arc<dyn CourseAssignmentRepository>,
        achievements: Arc<AchievementService>,
    ) -> Self {
        Self {
            access,
            lessons,
            enrollments,
            progress,
            users,
            assignments,
            achievements,
        }
    }

    /// NotStarted (or no record) moves to InProgress; anything else is left alone.
    pub async fn start_lesson(&self, actor: &Actor, lesson_id: &str) -> AppResult<ProgressUpdateDto> {
        let (lesson, course) = self.access.active_lesson(lesson_id).await?;
        let enrollment = self.require_enrollment(actor, &course).await?;
        let now = Utc::now();

        let record = match self.progress.find(&actor.user_id, &lesson.id).await? {
            Some(record) => self.start_existing(record, now).await?,
            None => {
                let record = LessonProgress::started(&actor.user_id, &lesson.id, &course.id, now);
                match self.progress.create(record).await {
                    Ok(record) => {
                        log::info!("User {} started lesson {}", actor.user_id, lesson.id);
                        record
                    }
                    Err(AppError::AlreadyExists(_)) => {
                        let record = self.record(&actor.user_id, &lesson.id).await?;
                        self.start_existing(record, now).await?
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        let user = self.user(&actor.user_id).await?;
        Ok(Self::update_dto(record, 0, enrollment.progress_percentage, &user))
    }

    /// Completes a lesson at most once per user. Only the call that performs
    /// the transition awards the lesson's points.
    pub async fn complete_lesson(&self, actor: &Actor, lesson_id: &str) -> AppResult<ProgressUpdateDto> {
        let (lesson, course) = self.access.active_lesson(lesson_id).await?;
        let enrollment = self.require_enrollment(actor, &course).await?;
        let now = Utc::now();

        let transitioned = match self.progress.find(&actor.user_id, &lesson.id).await? {
            Some(record) => self.complete_existing(&record, &lesson, now).await?,
            None => {
                let record = LessonProgress::completed(
                    &actor.user_id,
                    &lesson.id,
                    &course.id,
                    lesson.points,
                    now,
                );
                match self.progress.create(record).await {
                    Ok(_) => true,
                    Err(AppError::AlreadyExists(_)) => {
                        let record = self.record(&actor.user_id, &lesson.id).await?;
                        self.complete_existing(&record, &lesson, now).await?
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        let (points_awarded, percentage) = if transitioned {
            log::info!(
                "User {} completed lesson {} (+{} points)",
                actor.user_id,
                lesson.id,
                lesson.points
            );
            self.award_points(&actor.user_id, Some(&enrollment.id), lesson.points)
                .await?;
            let percentage = self.refresh_enrollment(&enrollment).await?;
            (lesson.points, percentage)
        } else {
            (0, enrollment.progress_percentage)
        };

        let record = self.record(&actor.user_id, &lesson.id).await?;
        let user = self.user(&actor.user_id).await?;
        Ok(Self::update_dto(record, points_awarded, percentage, &user))
    }

    /// Adds points to the user's total and, when given, to the enrollment's
    /// accumulated points, then unlocks any threshold achievements.
    pub async fn award_points(&self, user_id: &str, enrollment_id: Option<&str>, points: i64) -> AppResult<User> {
        if points <= 0 {
            return self.user(user_id).await;
        }

        let user = self.users.add_points(user_id, points).await?;
        if let Some(enrollment_id) = enrollment_id {
            self.enrollments.add_points(enrollment_id, points).await?;
        }
        self.achievements.award_thresholds(&user).await?;

        Ok(user)
    }

    /// Recomputes and stores the percentage from the course's active lessons.
    /// Reaching 100% stamps the completion date and completes the student's
    /// assignments for the course.
    pub async fn refresh_enrollment(&self, enrollment: &Enrollment) -> AppResult<f64> {
        let lessons = self.lessons.list_active_by_course(&enrollment.course_id).await?;
        let records = self
            .progress
            .list_by_user_and_course(&enrollment.user_id, &enrollment.course_id)
            .await?;

        let percentage = progress_percentage(Self::completed_count(&lessons, &records), lessons.len());

        let completed_at = if percentage >= 100.0 && enrollment.completed_at.is_none() {
            Some(Utc::now())
        } else {
            None
        };

        self.enrollments
            .update_progress(&enrollment.id, percentage, completed_at)
            .await?;

        if completed_at.is_some() {
            let completed = self
                .assignments
                .complete_for_student_course(&enrollment.user_id, &enrollment.course_id)
                .await?;
            log::info!(
                "User {} finished course {} ({} assignment(s) completed)",
                enrollment.user_id,
                enrollment.course_id,
                completed
            );
        }

        Ok(percentage)
    }

    /// Refreshes every active enrollment after the course's lesson set changed.
    pub async fn refresh_course(&self, course_id: &str) -> AppResult<()> {
        let enrollments = self.enrollments.list_active_by_course(course_id).await?;
        for enrollment in &enrollments {
            self.refresh_enrollment(enrollment).await?;
        }
        if !enrollments.is_empty() {
            log::info!(
                "Refreshed progress of {} enrollment(s) in course {}",
                enrollments.len(),
                course_id
            );
        }
        Ok(())
    }

    /// Per-course summary for one user. Callers check access first.
    pub async fn course_progress(&self, user_id: &str, course_id: &str) -> AppResult<CourseProgressDto> {
        let course = self.access.course(course_id).await?;
        let enrollment = self
            .enrollments
            .find_active(user_id, &course.id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No active enrollment in course '{}'", course.id))
            })?;

        let lessons = self.lessons.list_active_by_course(&course.id).await?;
        let mut records: HashMap<String, LessonProgress> = self
            .progress
            .list_by_user_and_course(user_id, &course.id)
            .await?
            .into_iter()
            .map(|r| (r.lesson_id.clone(), r))
            .collect();

        let lesson_progress: Vec<LessonProgressDto> = lessons
            .iter()
            .map(|lesson| {
                let record = records
                    .remove(&lesson.id)
                    .unwrap_or_else(|| LessonProgress::not_started(user_id, &lesson.id, &course.id));
                LessonProgressDto::new(lesson, record)
            })
            .collect();

        let completed = lesson_progress
            .iter()
            .filter(|l| l.state == ProgressState::Completed)
            .count();

        Ok(CourseProgressDto {
            course_id: course.id,
            user_id: user_id.to_string(),
            progress_percentage: progress_percentage(completed, lessons.len()),
            total_lessons: lessons.len() as i64,
            completed_lessons: completed as i64,
            points: enrollment.points,
            completed_at: enrollment.completed_at,
            lessons: lesson_progress,
        })
    }

    /// Progress actions need both content access and an active enrollment.
    pub async fn require_enrollment(&self, actor: &Actor, course: &Course) -> AppResult<Enrollment> {
        self.access
            .authorize_content(actor, course, Action::ViewContent)
            .await?;

        self.enrollments
            .find_active(&actor.user_id, &course.id)
            .await?
            .ok_or_else(|| AppError::Forbidden("You must be enrolled in this course".to_string()))
    }

    async fn start_existing(&self, mut record: LessonProgress, now: DateTime<Utc>) -> AppResult<LessonProgress> {
        if record.start(now) {
            return self.progress.update(record).await;
        }
        Ok(record)
    }

    async fn complete_existing(&self, record: &LessonProgress, lesson: &Lesson, now: DateTime<Utc>) -> AppResult<bool> {
        if record.is_completed() {
            return Ok(false);
        }
        self.progress
            .complete_if_pending(&record.id, lesson.points, now)
            .await
    }

    async fn record(&self, user_id: &str, lesson_id: &str) -> AppResult<LessonProgress> {
        self.progress
            .find(user_id, lesson_id)
            .await?
            .ok_or_else(|| AppError::InternalError("Lesson progress vanished".to_string()))
    }

    async fn user(&self, user_id: &str) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))
    }

    fn completed_count(lessons: &[Lesson], records: &[LessonProgress]) -> usize {
        let active: HashSet<&str> = lessons.iter().map(|l| l.id.as_str()).collect();
        records
            .iter()
            .filter(|r| r.is_completed() && active.contains(r.lesson_id.as_str()))
            .count()
    }

    fn update_dto(record: LessonProgress, points_awarded: i64, percentage: f64, user: &User) -> ProgressUpdateDto {
        ProgressUpdateDto {
            lesson_id: record.lesson_id,
            state: record.state,
            started_at: record.started_at,
            completed_at: record.completed_at,
            points_awarded,
            course_progress_percentage: percentage,
            user_points: user.points,
        }
    }
}
