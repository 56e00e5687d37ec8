use std::sync::Arc;

use crate::{
    auth::policy::{Action, Actor, Target},
    errors::{AppError, AppResult},
    models::{
        domain::{Course, Exercise},
        dto::request::{CreateExerciseRequest, UpdateExerciseRequest},
    },
    repositories::ExerciseRepository,
    services::access_service::AccessService,
};

/// An exercise together with whether the caller may see its answer key.
pub type VisibleExercise = (Exercise, bool);

pub struct ExerciseService {
    access: Arc<AccessService>,
    exercises: Arc<dyn ExerciseRepository>,
}

impl ExerciseService {
    pub fn new(access: Arc<AccessService>, exercises: Arc<dyn ExerciseRepository>) -> Self {
        Self { access, exercises }
    }

    pub async fn create_exercise(&self, actor: &Actor, request: CreateExerciseRequest) -> AppResult<Exercise> {
        let (lesson, course) = self.access.active_lesson(&request.lesson_id).await?;
        self.authorize_manage(actor, &course)?;

        let mut exercise = Exercise::new(
            &lesson.id,
            request.title.trim(),
            &request.statement,
            &request.correct_answer,
            request.position,
        );
        exercise.kind = request.kind;
        if let Some(level) = request.level {
            exercise.level = level;
        }
        if let Some(points) = request.points {
            exercise.points = points;
        }
        exercise.time_limit_minutes = request.time_limit_minutes;
        exercise.options_json = request.options_json;
        exercise.explanation = request.explanation;
        exercise.latex_formula = request.latex_formula;

        let exercise = self.exercises.create(exercise).await?;
        log::info!("Created exercise {} in lesson {}", exercise.id, lesson.id);
        Ok(exercise)
    }

    pub async fn list_exercises(&self, actor: &Actor, lesson_id: &str) -> AppResult<Vec<VisibleExercise>> {
        let (lesson, course) = self.access.active_lesson(lesson_id).await?;
        self.access
            .authorize_content(actor, &course, Action::ViewContent)
            .await?;

        let include_answer = self.access.can_manage_content(actor, &course);
        let exercises = self.exercises.list_active_by_lesson(&lesson.id).await?;
        Ok(exercises.into_iter().map(|e| (e, include_answer)).collect())
    }

    pub async fn get_exercise(&self, actor: &Actor, id: &str) -> AppResult<VisibleExercise> {
        let (exercise, lesson, course) = self.access.exercise(id).await?;
        let include_answer = self.access.can_manage_content(actor, &course);
        let live = exercise.active && lesson.active && course.active;

        if !live && !include_answer {
            return Err(AppError::NotFound(format!("Exercise with id '{}' not found", id)));
        }
        self.access
            .authorize_content(actor, &course, Action::ViewContent)
            .await?;

        Ok((exercise, include_answer))
    }

    pub async fn update_exercise(&self, actor: &Actor, id: &str, request: UpdateExerciseRequest) -> AppResult<Exercise> {
        let (mut exercise, _, course) = self.access.exercise(id).await?;
        self.authorize_manage(actor, &course)?;

        if let Some(title) = request.title {
            exercise.title = title;
        }
        if let Some(statement) = request.statement {
            exercise.statement = statement;
        }
        if let Some(kind) = request.kind {
            exercise.kind = kind;
        }
        if let Some(level) = request.level {
            exercise.level = level;
        }
        if let Some(points) = request.points {
            exercise.points = points;
        }
        if request.time_limit_minutes.is_some() {
            exercise.time_limit_minutes = request.time_limit_minutes;
        }
        if let Some(position) = request.position {
            exercise.position = position;
        }
        if request.options_json.is_some() {
            exercise.options_json = request.options_json;
        }
        if let Some(correct_answer) = request.correct_answer {
            exercise.correct_answer = correct_answer;
        }
        if request.explanation.is_some() {
            exercise.explanation = request.explanation;
        }
        if request.latex_formula.is_some() {
            exercise.latex_formula = request.latex_formula;
        }
        if let Some(active) = request.active {
            exercise.active = active;
        }

        self.exercises.update(exercise).await
    }

    pub async fn deactivate_exercise(&self, actor: &Actor, id: &str) -> AppResult<Exercise> {
        let (mut exercise, _, course) = self.access.exercise(id).await?;
        self.authorize_manage(actor, &course)?;

        exercise.active = false;
        let exercise = self.exercises.update(exercise).await?;
        log::info!("Exercise {} deactivated by {}", exercise.id, actor.user_id);
        Ok(exercise)
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
