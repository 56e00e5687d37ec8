use std::sync::Arc;

use crate::{
    auth::policy::{Action, Actor, Target},
    errors::{AppError, AppResult},
    models::{
        domain::{Course, Lesson},
        dto::request::{CreateLessonRequest, UpdateLessonRequest},
    },
    repositories::LessonRepository,
    services::{access_service::AccessService, progress_service::ProgressService},
};

pub struct LessonService {
    access: Arc<AccessService>,
    lessons: Arc<dyn LessonRepository>,
    progress: Arc<ProgressService>,
}

impl LessonService {
    pub fn new(
        access: Arc<AccessService>,
        lessons: Arc<dyn LessonRepository>,
        progress: Arc<ProgressService>,
    ) -> Self {
        Self {
            access,
            lessons,
            progress,
        }
    }

    /// Lessons may only be added to a live course. Enrollment percentages of
    /// the course are recomputed against the new lesson set.
    pub async fn create_lesson(&self, actor: &Actor, request: CreateLessonRequest) -> AppResult<Lesson> {
        let course = self.access.active_course(&request.course_id).await?;
        self.authorize_manage(actor, &course)?;

        let mut lesson = Lesson::new(&course.id, request.title.trim(), request.position);
        lesson.description = request.description;
        lesson.content = request.content;
        lesson.video_url = request.video_url;
        lesson.estimated_minutes = request.estimated_minutes;
        if let Some(points) = request.points {
            lesson.points = points;
        }

        let lesson = self.lessons.create(lesson).await?;
        log::info!("Created lesson {} in course {}", lesson.id, course.id);
        self.progress.refresh_course(&course.id).await?;
        Ok(lesson)
    }

    /// The syllabus is public to any signed-in user; body and video are
    /// withheld from callers without content access.
    pub async fn list_lessons(&self, actor: &Actor, course_id: &str) -> AppResult<Vec<Lesson>> {
        let course = self.access.active_course(course_id).await?;
        let full_access = self.access.can_view_content(actor, &course).await?;

        let mut lessons = self.lessons.list_active_by_course(&course.id).await?;
        if !full_access {
            for lesson in &mut lessons {
                lesson.content = None;
                lesson.video_url = None;
            }
        }
        Ok(lessons)
    }

    pub async fn get_lesson(&self, actor: &Actor, id: &str) -> AppResult<Lesson> {
        let (lesson, course) = self.access.lesson(id).await?;
        let live = lesson.active && course.active;

        if !live && !self.access.can_manage_content(actor, &course) {
            return Err(AppError::NotFound(format!("Lesson with id '{}' not found", id)));
        }
        self.access
            .authorize_content(actor, &course, Action::ViewContent)
            .await?;

        Ok(lesson)
    }

    pub async fn update_lesson(&self, actor: &Actor, id: &str, request: UpdateLessonRequest) -> AppResult<Lesson> {
        let (mut lesson, course) = self.access.lesson(id).await?;
        self.authorize_manage(actor, &course)?;

        let was_active = lesson.active;
        if let Some(title) = request.title {
            lesson.title = title;
        }
        if request.description.is_some() {
            lesson.description = request.description;
        }
        if request.content.is_some() {
            lesson.content = request.content;
        }
        if request.video_url.is_some() {
            lesson.video_url = request.video_url;
        }
        if let Some(position) = request.position {
            lesson.position = position;
        }
        if let Some(points) = request.points {
            lesson.points = points;
        }
        if request.estimated_minutes.is_some() {
            lesson.estimated_minutes = request.estimated_minutes;
        }
        if let Some(active) = request.active {
            lesson.active = active;
        }

        let lesson = self.lessons.update(lesson).await?;
        if lesson.active != was_active {
            self.progress.refresh_course(&course.id).await?;
        }
        Ok(lesson)
    }

    pub async fn deactivate_lesson(&self, actor: &Actor, id: &str) -> AppResult<Lesson> {
        let (mut lesson, course) = self.access.lesson(id).await?;
        self.authorize_manage(actor, &course)?;

        if !lesson.active {
            return Ok(lesson);
        }
        lesson.active = false;

        let lesson = self.lessons.update(lesson).await?;
        log::info!("Lesson {} deactivated by {}", lesson.id, actor.user_id);
        self.progress.refresh_course(&course.id).await?;
        Ok(lesson)
    }

    fn authorize_manage(&self, actor: &Actor, course: &Course) -> AppResult<()> {
        self.access.check(
            actor,
            Action::ManageContent,
            Target::Course {
                owner_id: &course.teacher_id,
            },
        )
    }
}
