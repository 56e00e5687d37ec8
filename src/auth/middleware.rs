use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;

use crate::{
    app_state::AppState,
    auth::{policy::Actor, Claims},
    errors::AppError,
    models::domain::User,
};

/// Rejects requests without a valid bearer token and stores the verified
/// claims in the request extensions.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = bearer_token(&req)
                .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

            let state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| AppError::InternalError("Application state not configured".to_string()))?;

            let claims = state.jwt_service.validate_token(&token)?;
            req.extensions_mut().insert(claims);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return None;
    }
    Some(token.trim().to_string())
}

/// The live account behind the request's token. Loading it on every request
/// means deactivation takes effect immediately, not at token expiry.
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn actor(&self) -> Actor {
        Actor::from(&self.0)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let claims = claims.ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))?;
            let state = state
                .ok_or_else(|| AppError::InternalError("Application state not configured".to_string()))?;

            let user = state.user_service.resolve_active_user(&claims.sub).await?;
            Ok(AuthenticatedUser(user))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App, HttpResponse};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let app = test::init_service(
            App::new().service(web::scope("/api").wrap(AuthMiddleware).route("/x", web::get().to(ok))),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/x").to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), 401);
    }

    #[actix_web::test]
    async fn test_non_bearer_scheme_is_unauthorized() {
        let app = test::init_service(
            App::new().service(web::scope("/api").wrap(AuthMiddleware).route("/x", web::get().to(ok))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/x")
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), 401);
    }
}
