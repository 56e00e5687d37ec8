use std::sync::Arc;

use crate::{
    auth::policy::Actor,
    errors::{AppError, AppResult},
    models::domain::{Course, Enrollment},
    repositories::EnrollmentRepository,
    services::{access_service::AccessService, progress_service::ProgressService},
};

pub struct EnrollmentService {
    access: Arc<AccessService>,
    enrollments: Arc<dyn EnrollmentRepository>,
    progress: Arc<ProgressService>,
}

impl EnrollmentService {
    pub fn new(
        access: Arc<AccessService>,
        enrollments: Arc<dyn EnrollmentRepository>,
        progress: Arc<ProgressService>,
    ) -> Self {
        Self {
            access,
            enrollments,
            progress,
        }
    }

    /// Any role may enroll. One active enrollment per (user, course); a second
    /// attempt is a conflict.
    pub async fn enroll(&self, actor: &Actor, course_id: &str) -> AppResult<Enrollment> {
        let course = self.access.active_course(course_id).await?;
        self.enroll_user(&actor.user_id, &course).await
    }

    pub async fn enroll_user(&self, user_id: &str, course: &Course) -> AppResult<Enrollment> {
        if self.enrollments.find_active(user_id, &course.id).await?.is_some() {
            return Err(AppError::AlreadyExists(
                "You are already enrolled in this course".to_string(),
            ));
        }

        let mut enrollment = self
            .enrollments
            .create(Enrollment::new(user_id, &course.id))
            .await?;
        log::info!("User {} enrolled in course {}", user_id, course.id);

        enrollment.progress_percentage = self.progress.refresh_enrollment(&enrollment).await?;
        Ok(enrollment)
    }

    /// Active enrollments of a user with their courses, skipping courses
    /// that have since been deactivated.
    pub async fn my_courses(&self, user_id: &str) -> AppResult<Vec<(Course, Enrollment)>> {
        let mut courses = Vec::new();
        for enrollment in self.enrollments.list_active_by_user(user_id).await? {
            match self.access.active_course(&enrollment.course_id).await {
                Ok(course) => courses.push((course, enrollment)),
                Err(AppError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(courses)
    }
}
