use std::sync::Arc;

use crate::{
    auth::policy::{authorize, Action, Actor, Target},
    errors::{AppError, AppResult},
    models::{
        domain::{Area, Course, CourseFilter, UserRole},
        dto::request::{CreateAreaRequest, CreateCourseRequest, UpdateCourseRequest},
    },
    repositories::{AreaRepository, CourseRepository, UserRepository},
    services::access_service::AccessService,
};

/// Subject areas and courses.
pub struct CourseService {
    access: Arc<AccessService>,
    areas: Arc<dyn AreaRepository>,
    courses: Arc<dyn CourseRepository>,
    users: Arc<dyn UserRepository>,
}

impl CourseService {
    pub fn new(
        access: Arc<AccessService>,
        areas: Arc<dyn AreaRepository>,
        courses: Arc<dyn CourseRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            access,
            areas,
            courses,
            users,
        }
    }

    pub async fn list_areas(&self) -> AppResult<Vec<Area>> {
        self.areas.list().await
    }

    pub async fn create_area(&self, actor: &Actor, request: CreateAreaRequest) -> AppResult<Area> {
        authorize(actor, Action::ManageAreas, Target::Platform).into_result()?;

        let mut area = Area::new(request.name.trim(), request.order);
        area.description = request.description;
        area.icon = request.icon;
        area.color = request.color;

        let area = self.areas.create(area).await?;
        log::info!("Created area {} ({})", area.name, area.id);
        Ok(area)
    }

    pub async fn create_course(&self, actor: &Actor, request: CreateCourseRequest) -> AppResult<Course> {
        authorize(actor, Action::CreateCourse, Target::Platform).into_result()?;
        self.area(&request.area_id).await?;

        let teacher_id = match request.teacher_id {
            Some(teacher_id) if actor.is_admin() && teacher_id != actor.user_id => {
                self.require_teacher(&teacher_id).await?;
                teacher_id
            }
            _ => actor.user_id.clone(),
        };

        let mut course = Course::new(request.title.trim(), request.level, &teacher_id, &request.area_id);
        course.description = request.description;
        course.objectives = request.objectives;
        course.estimated_hours = request.estimated_hours;
        course.cover_image = request.cover_image;

        let course = self.courses.create(course).await?;
        log::info!("Created course {} owned by {}", course.id, course.teacher_id);
        Ok(course)
    }

    pub async fn list_courses(&self, filter: &CourseFilter, offset: i64, limit: i64) -> AppResult<(Vec<Course>, i64)> {
        self.courses.list(filter, offset, limit).await
    }

    /// Deactivated courses are only visible to those who may manage them.
    pub async fn get_course(&self, actor: &Actor, id: &str) -> AppResult<Course> {
        let course = self.access.course(id).await?;
        if !course.active && !self.may_manage(actor, &course) {
            return Err(AppError::NotFound(format!("Course with id '{}' not found", id)));
        }
        Ok(course)
    }

    pub async fn update_course(&self, actor: &Actor, id: &str, request: UpdateCourseRequest) -> AppResult<Course> {
        let mut course = self.access.course(id).await?;
        self.authorize_manage(actor, &course)?;

        if let Some(area_id) = request.area_id {
            self.area(&area_id).await?;
            course.area_id = area_id;
        }
        if let Some(title) = request.title {
            course.title = title;
        }
        if request.description.is_some() {
            course.description = request.description;
        }
        if request.objectives.is_some() {
            course.objectives = request.objectives;
        }
        if let Some(level) = request.level {
            course.level = level;
        }
        if request.estimated_hours.is_some() {
            course.estimated_hours = request.estimated_hours;
        }
        if request.cover_image.is_some() {
            course.cover_image = request.cover_image;
        }
        if let Some(active) = request.active {
            course.active = active;
        }

        self.courses.update(course).await
    }

    pub async fn deactivate_course(&self, actor: &Actor, id: &str) -> AppResult<Course> {
        let mut course = self.access.course(id).await?;
        self.authorize_manage(actor, &course)?;

        course.active = false;
        let course = self.courses.update(course).await?;
        log::info!("Course {} deactivated by {}", course.id, actor.user_id);
        Ok(course)
    }

    fn may_manage(&self, actor: &Actor, course: &Course) -> bool {
        self.authorize_manage(actor, course).is_ok()
    }

    fn authorize_manage(&self, actor: &Actor, course: &Course) -> AppResult<()> {
        authorize(
            actor,
            Action::ManageCourse,
            Target::Course {
                owner_id: &course.teacher_id,
            },
        )
        .into_result()
    }

    async fn area(&self, area_id: &str) -> AppResult<Area> {
        self.areas
            .find_by_id(area_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Area with id '{}' not found", area_id)))
    }

    async fn require_teacher(&self, user_id: &str) -> AppResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))?;

        if user.role != UserRole::Teacher || !user.active {
            return Err(AppError::ValidationError(format!(
                "User '{}' is not an active teacher",
                user_id
            )));
        }
        Ok(())
    }
}
