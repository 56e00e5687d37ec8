use std::sync::Arc;

use crate::{
    auth::policy::{Action, Actor, Target},
    errors::AppResult,
    models::{
        domain::ExerciseAttempt,
        dto::response::{AttemptDto, AttemptResultDto},
    },
    repositories::{EnrollmentRepository, ExerciseAttemptRepository},
    services::{
        access_service::AccessService, grading_service::GradingService,
        progress_service::ProgressService,
    },
};

/// Answer submission: grade, record, award.
pub struct AttemptService {
    access: Arc<AccessService>,
    attempts: Arc<dyn ExerciseAttemptRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    progress: Arc<ProgressService>,
}

impl AttemptService {
    pub fn new(
        access: Arc<AccessService>,
        attempts: Arc<dyn ExerciseAttemptRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        progress: Arc<ProgressService>,
    ) -> Self {
        Self {
            access,
            attempts,
            enrollments,
            progress,
        }
    }

    /// Every submission is recorded. Each correct one adds the exercise's
    /// points, including repeats of an already solved exercise.
    pub async fn submit(&self, actor: &Actor, exercise_id: &str, answer: &str) -> AppResult<AttemptResultDto> {
        let (exercise, _, course) = self.access.active_exercise(exercise_id).await?;
        self.access
            .authorize_content(actor, &course, Action::AttemptExercise)
            .await?;

        let grade = GradingService::evaluate(&exercise, answer);
        let attempt = self
            .attempts
            .create(ExerciseAttempt::new(
                &actor.user_id,
                &exercise.id,
                answer,
                grade.is_correct,
                grade.points,
            ))
            .await?;

        let enrollment = self.enrollments.find_active(&actor.user_id, &course.id).await?;
        let user = self
            .progress
            .award_points(
                &actor.user_id,
                enrollment.as_ref().map(|e| e.id.as_str()),
                grade.points,
            )
            .await?;

        if grade.is_correct {
            log::info!(
                "User {} solved exercise {} (+{} points)",
                actor.user_id,
                exercise.id,
                grade.points
            );
        }

        Ok(AttemptResultDto {
            attempt: AttemptDto::from(attempt),
            explanation: exercise.explanation,
            user_points: user.points,
        })
    }

    /// The caller's own attempts on an exercise, newest first.
    pub async fn list_own(&self, actor: &Actor, exercise_id: &str) -> AppResult<Vec<ExerciseAttempt>> {
        let (exercise, _, _) = self.access.exercise(exercise_id).await?;
        self.access.check(
            actor,
            Action::ViewAttempts,
            Target::User {
                user_id: &actor.user_id,
            },
        )?;

        self.attempts
            .list_by_user_and_exercise(&actor.user_id, &exercise.id)
            .await
    }
}
