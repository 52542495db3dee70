use std::future::{Ready, ready};

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
    body::EitherBody,
    cookie::{Cookie, SameSite, time::Duration},
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
    web,
};
use futures_util::future::LocalBoxFuture;

use crate::config::AppConfig;
use crate::errors::ShortenerError;
use crate::state::app_state::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Account id of the logged-in caller, set by [`SessionAuth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSubject(pub String);

impl SessionSubject {
    pub fn account_id(&self) -> &str {
        &self.0
    }
}

impl FromRequest for SessionSubject {
    type Error = ShortenerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionSubject>()
                .cloned()
                .ok_or(ShortenerError::Unauthenticated),
        )
    }
}

pub fn session_cookie(token: String, config: &AppConfig) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .max_age(Duration::days(config.session_ttl_days))
        .finish()
}

pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = SessionAuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware { service }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate_request(&req) {
            Ok(subject) => {
                req.extensions_mut().insert(subject);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(e) => {
                let response = req
                    .into_response(e.error_response())
                    .map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}

fn authenticate_request(req: &ServiceRequest) -> Result<SessionSubject, ShortenerError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ShortenerError::Internal("application state not configured".into()))?;

    // Browsers send the cookie, API clients may use a bearer token
    let token = req
        .cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| bearer_token(req))
        .ok_or(ShortenerError::Unauthenticated)?;

    let claims = state.sessions.validate(&token).map_err(|e| {
        log::debug!("Rejected session token: {}", e);
        ShortenerError::Unauthenticated
    })?;

    // Tokens can outlive the account after a restart wipes the directory
    if !state.users.is_authenticated(&claims.sub) {
        return Err(ShortenerError::Unauthenticated);
    }

    Ok(SessionSubject(claims.sub))
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
}
