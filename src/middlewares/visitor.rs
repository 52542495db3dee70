use std::future::{Ready, ready};

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    cookie::{Cookie, SameSite, time::Duration},
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;

use crate::errors::ShortenerError;

pub const VISITOR_COOKIE: &str = "visitor_id";
const VISITOR_COOKIE_DAYS: i64 = 365;

/// Anonymous per-browser identifier. Carries no authentication weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorId(pub String);

impl VisitorId {
    fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for VisitorId {
    type Error = ShortenerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<VisitorId>()
                .cloned()
                .ok_or_else(|| ShortenerError::Internal("visitor cookie middleware missing".into())),
        )
    }
}

/// Issues the long-lived visitor cookie on first contact.
pub struct VisitorCookie {
    pub secure: bool,
}

impl<S, B> Transform<S, ServiceRequest> for VisitorCookie
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = VisitorCookieMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(VisitorCookieMiddleware {
            service,
            secure: self.secure,
        }))
    }
}

pub struct VisitorCookieMiddleware<S> {
    service: S,
    secure: bool,
}

impl<S, B> Service<ServiceRequest> for VisitorCookieMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let existing = req
            .cookie(VISITOR_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty());

        let (visitor, issued) = match existing {
            Some(value) => (VisitorId(value), false),
            None => (VisitorId::generate(), true),
        };
        req.extensions_mut().insert(visitor.clone());

        let secure = self.secure;
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            if issued {
                let cookie = Cookie::build(VISITOR_COOKIE, visitor.0)
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .secure(secure)
                    .max_age(Duration::days(VISITOR_COOKIE_DAYS))
                    .finish();
                res.response_mut().add_cookie(&cookie)?;
            }

            Ok(res)
        })
    }
}
