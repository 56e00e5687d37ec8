use async_graphql::{Context, Object, ID};

use crate::{
    auth::{current_actor, current_user},
    errors::AppResult,
    graphql::helpers::{app_state, pagination},
    models::{
        domain::{CourseFilter, DifficultyLevel},
        dto::response::{
            AchievementDto, AreaDto, CourseDto, CourseProgressDto, EnrolledCourseDto,
            EnrollmentDto, ExerciseDto, LessonDto, Page, RankingEntry, UserAchievementDto,
            UserDto, UserStatistics,
        },
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn me(&self, ctx: &Context<'_>) -> AppResult<UserDto> {
        Ok(current_user(ctx).await?.into())
    }

    async fn areas(&self, ctx: &Context<'_>) -> AppResult<Vec<AreaDto>> {
        let state = app_state(ctx)?;
        let areas = state.course_service.list_areas().await?;
        Ok(areas.into_iter().map(AreaDto::from).collect())
    }

    async fn courses(
        &self,
        ctx: &Context<'_>,
        area_id: Option<ID>,
        level: Option<DifficultyLevel>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<Page<CourseDto>> {
        let state = app_state(ctx)?;
        let page = pagination(offset, limit);
        let filter = CourseFilter {
            area_id: area_id.map(|id| id.to_string()),
            level,
            ..CourseFilter::default()
        };

        let (courses, total) = state
            .course_service
            .list_courses(&filter, page.offset(), page.limit())
            .await?;

        Ok(Page::new(
            courses.into_iter().map(CourseDto::from).collect(),
            total,
            page.offset(),
            page.limit(),
        ))
    }

    async fn course(&self, ctx: &Context<'_>, id: ID) -> AppResult<CourseDto> {
        let state = app_state(ctx)?;
        let actor = current_actor(ctx).await?;
        Ok(state.course_service.get_course(&actor, &id).await?.into())
    }

    async fn lessons(&self, ctx: &Context<'_>, course_id: ID) -> AppResult<Vec<LessonDto>> {
        let state = app_state(ctx)?;
        let actor = current_actor(ctx).await?;
        let lessons = state.lesson_service.list_lessons(&actor, &course_id).await?;
        Ok(lessons.into_iter().map(LessonDto::from).collect())
    }

    async fn exercises(&self, ctx: &Context<'_>, lesson_id: ID) -> AppResult<Vec<ExerciseDto>> {
        let state = app_state(ctx)?;
        let actor = current_actor(ctx).await?;
        let exercises = state
            .exercise_service
            .list_exercises(&actor, &lesson_id)
            .await?;
        Ok(exercises
            .into_iter()
            .map(|(exercise, include_answer)| ExerciseDto::from_exercise(exercise, include_answer))
            .collect())
    }

    async fn my_courses(&self, ctx: &Context<'_>) -> AppResult<Vec<EnrolledCourseDto>> {
        let state = app_state(ctx)?;
        let actor = current_actor(ctx).await?;
        let courses = state.enrollment_service.my_courses(&actor.user_id).await?;
        Ok(courses
            .into_iter()
            .map(|(course, enrollment)| EnrolledCourseDto {
                course: CourseDto::from(course),
                enrollment: EnrollmentDto::from(enrollment),
            })
            .collect())
    }

    async fn course_progress(&self, ctx: &Context<'_>, course_id: ID) -> AppResult<CourseProgressDto> {
        let state = app_state(ctx)?;
        let actor = current_actor(ctx).await?;
        state
            .progress_service
            .course_progress(&actor.user_id, &course_id)
            .await
    }

    async fn leaderboard(
        &self,
        ctx: &Context<'_>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> AppResult<Page<RankingEntry>> {
        let state = app_state(ctx)?;
        let page = pagination(offset, limit);
        let (entries, total) = state
            .ranking_service
            .leaderboard(page.offset(), page.limit())
            .await?;
        Ok(Page::new(entries, total, page.offset(), page.limit()))
    }

    async fn my_rank(&self, ctx: &Context<'_>) -> AppResult<RankingEntry> {
        let state = app_state(ctx)?;
        let actor = current_actor(ctx).await?;
        state.ranking_service.rank_of(&actor.user_id).await
    }

    async fn achievements(&self, ctx: &Context<'_>) -> AppResult<Vec<AchievementDto>> {
        let state = app_state(ctx)?;
        let achievements = state.achievement_service.list().await?;
        Ok(achievements.into_iter().map(AchievementDto::from).collect())
    }

    async fn my_achievements(&self, ctx: &Context<'_>) -> AppResult<Vec<UserAchievementDto>> {
        let state = app_state(ctx)?;
        let actor = current_actor(ctx).await?;
        let held = state
            .achievement_service
            .list_for_user(&actor, &actor.user_id)
            .await?;
        Ok(held
            .into_iter()
            .map(|(achievement, grant)| UserAchievementDto::new(achievement, &grant))
            .collect())
    }

    async fn my_statistics(&self, ctx: &Context<'_>) -> AppResult<UserStatistics> {
        let state = app_state(ctx)?;
        let actor = current_actor(ctx).await?;
        state
            .statistics_service
            .user_statistics(&actor, &actor.user_id)
            .await
    }
}
