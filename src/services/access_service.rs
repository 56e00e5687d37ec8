use std::sync::Arc;

use crate::{
    auth::policy::{authorize, Action, Actor, Target},
    errors::{AppError, AppResult},
    models::domain::{Course, Exercise, Lesson, UserRole},
    repositories::{
        CourseRepository, EnrollmentRepository, ExerciseRepository, LessonRepository,
        TeacherStudentRepository,
    },
};

/// Loads the entities an authorization decision is about and resolves the
/// relationship facts (enrollment, teacher-student link) before asking the
/// policy. Missing entities are reported as NotFound before any permission
/// check runs.
pub struct AccessService {
    courses: Arc<dyn CourseRepository>,
    lessons: Arc<dyn LessonRepository>,
    exercises: Arc<dyn ExerciseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    links: Arc<dyn TeacherStudentRepository>,
}

impl AccessService {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        lessons: Arc<dyn LessonRepository>,
        exercises: Arc<dyn ExerciseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        links: Arc<dyn TeacherStudentRepository>,
    ) -> Self {
        Self {
            courses,
            lessons,
            exercises,
            enrollments,
            links,
        }
    }

    pub fn check(&self, actor: &Actor, action: Action, target: Target<'_>) -> AppResult<()> {
        authorize(actor, action, target).into_result()
    }

    /// Any course, live or deactivated.
    pub async fn course(&self, course_id: &str) -> AppResult<Course> {
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course with id '{}' not found", course_id)))
    }

    pub async fn active_course(&self, course_id: &str) -> AppResult<Course> {
        let course = self.course(course_id).await?;
        if !course.active {
            return Err(AppError::NotFound(format!(
                "Course with id '{}' not found",
                course_id
            )));
        }
        Ok(course)
    }

    /// A lesson and its owning course, live or deactivated.
    pub async fn lesson(&self, lesson_id: &str) -> AppResult<(Lesson, Course)> {
        let lesson = self
            .lessons
            .find_by_id(lesson_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lesson with id '{}' not found", lesson_id)))?;
        let course = self.course(&lesson.course_id).await?;
        Ok((lesson, course))
    }

    pub async fn active_lesson(&self, lesson_id: &str) -> AppResult<(Lesson, Course)> {
        let (lesson, course) = self.lesson(lesson_id).await?;
        if !lesson.active || !course.active {
            return Err(AppError::NotFound(format!(
                "Lesson with id '{}' not found",
                lesson_id
            )));
        }
        Ok((lesson, course))
    }

    /// An exercise with its lesson and course, live or deactivated.
    pub async fn exercise(&self, exercise_id: &str) -> AppResult<(Exercise, Lesson, Course)> {
        let exercise = self
            .exercises
            .find_by_id(exercise_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Exercise with id '{}' not found", exercise_id))
            })?;
        let (lesson, course) = self.lesson(&exercise.lesson_id).await?;
        Ok((exercise, lesson, course))
    }

    pub async fn active_exercise(&self, exercise_id: &str) -> AppResult<(Exercise, Lesson, Course)> {
        let (exercise, lesson, course) = self.exercise(exercise_id).await?;
        if !exercise.active || !lesson.active || !course.active {
            return Err(AppError::NotFound(format!(
                "Exercise with id '{}' not found",
                exercise_id
            )));
        }
        Ok((exercise, lesson, course))
    }

    pub async fn is_enrolled(&self, user_id: &str, course_id: &str) -> AppResult<bool> {
        Ok(self.enrollments.find_active(user_id, course_id).await?.is_some())
    }

    /// Lesson and exercise detail: admins, the owning teacher and enrolled students.
    pub async fn authorize_content(&self, actor: &Actor, course: &Course, action: Action) -> AppResult<()> {
        let enrolled = actor.role == UserRole::Student
            && self.is_enrolled(&actor.user_id, &course.id).await?;

        self.check(
            actor,
            action,
            Target::CourseContent {
                owner_id: &course.teacher_id,
                enrolled,
            },
        )
    }

    pub async fn can_view_content(&self, actor: &Actor, course: &Course) -> AppResult<bool> {
        match self.authorize_content(actor, course, Action::ViewContent).await {
            Ok(()) => Ok(true),
            Err(AppError::Forbidden(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn can_manage_content(&self, actor: &Actor, course: &Course) -> bool {
        authorize(
            actor,
            Action::ManageContent,
            Target::Course {
                owner_id: &course.teacher_id,
            },
        )
        .is_allowed()
    }

    /// Statistics of another user: themselves, admins, or a linked teacher.
    pub async fn authorize_statistics(&self, actor: &Actor, student_id: &str) -> AppResult<()> {
        let linked = actor.role == UserRole::Teacher
            && self
                .links
                .find_active(&actor.user_id, student_id)
                .await?
                .is_some();

        self.check(
            actor,
            Action::ViewStatistics,
            Target::StudentStatistics { student_id, linked },
        )
    }
}
