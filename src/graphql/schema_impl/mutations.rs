use async_graphql::{Context, Object, ID};
use validator::Validate;

use crate::{
    auth::current_actor,
    errors::AppResult,
    graphql::helpers::app_state,
    models::dto::{
        request::{LoginRequest, RegisterRequest, SubmitAnswerRequest},
        response::{AttemptResultDto, EnrollmentDto, LoginResponse, ProgressUpdateDto, UserDto},
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn register(&self, ctx: &Context<'_>, input: RegisterRequest) -> AppResult<UserDto> {
        let state = app_state(ctx)?;
        input.validate()?;

        Ok(state.auth_service.register(input).await?.into())
    }

    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> AppResult<LoginResponse> {
        let state = app_state(ctx)?;
        let request = LoginRequest { email, password };
        request.validate()?;

        state.auth_service.login(request).await
    }

    async fn enroll(&self, ctx: &Context<'_>, course_id: ID) -> AppResult<EnrollmentDto> {
        let state = app_state(ctx)?;
        let actor = current_actor(ctx).await?;

        Ok(state.enrollment_service.enroll(&actor, &course_id).await?.into())
    }

    async fn start_lesson(&self, ctx: &Context<'_>, lesson_id: ID) -> AppResult<ProgressUpdateDto> {
        let state = app_state(ctx)?;
        let actor = current_actor(ctx).await?;

        state.progress_service.start_lesson(&actor, &lesson_id).await
    }

    async fn complete_lesson(&self, ctx: &Context<'_>, lesson_id: ID) -> AppResult<ProgressUpdateDto> {
        let state = app_state(ctx)?;
        let actor = current_actor(ctx).await?;

        state.progress_service.complete_lesson(&actor, &lesson_id).await
    }

    async fn submit_answer(
        &self,
        ctx: &Context<'_>,
        exercise_id: ID,
        input: SubmitAnswerRequest,
    ) -> AppResult<AttemptResultDto> {
        let state = app_state(ctx)?;
        let actor = current_actor(ctx).await?;
        input.validate()?;

        state
            .attempt_service
            .submit(&actor, &exercise_id, &input.answer)
            .await
    }
}
