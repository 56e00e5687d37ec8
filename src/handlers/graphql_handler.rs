use actix_web::{web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::{app_state::AppState, graphql::Schema};

/// Executes a GraphQL request. The bearer token is optional here; resolvers
/// that act on behalf of a user reject requests without verified claims.
pub async fn graphql(
    schema: web::Data<Schema>,
    state: web::Data<AppState>,
    auth: Option<BearerAuth>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = request.into_inner();

    if let Some(auth) = auth {
        match state.jwt_service.validate_token(auth.token()) {
            Ok(claims) => request = request.data(claims),
            Err(e) => log::debug!("Ignoring invalid GraphQL bearer token: {}", e),
        }
    }

    schema.execute(request).await.into()
}

pub async fn graphql_playground() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
