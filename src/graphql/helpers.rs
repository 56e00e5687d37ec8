use async_graphql::Context;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    models::dto::request::PaginationParams,
};

pub fn app_state<'a>(ctx: &Context<'a>) -> AppResult<&'a AppState> {
    ctx.data::<AppState>()
        .map_err(|_| AppError::InternalError("Application state not configured".to_string()))
}

/// Applies the REST paging defaults and bounds to GraphQL arguments.
pub fn pagination(offset: Option<i64>, limit: Option<i64>) -> PaginationParams {
    PaginationParams { offset, limit }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_clamps_like_rest() {
        let page = pagination(Some(-5), Some(1000));
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 100);

        let page = pagination(None, None);
        assert_eq!(page.limit(), 20);
    }
}
