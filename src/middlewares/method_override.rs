use std::future::{Ready, ready};

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
    web,
};
use futures_util::future::LocalBoxFuture;
use serde::Deserialize;

pub const METHOD_OVERRIDE_HEADER: &str = "x-http-method-override";

#[derive(Deserialize)]
struct OverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// Lets HTML forms, which can only POST, reach PUT/PATCH/DELETE routes via
/// `?_method=DELETE` or the `X-HTTP-Method-Override` header.
///
/// Must be registered on the `App` so it runs before routing.
pub struct MethodOverride;

impl<S, B> Transform<S, ServiceRequest> for MethodOverride
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = MethodOverrideMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MethodOverrideMiddleware { service }))
    }
}

pub struct MethodOverrideMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for MethodOverrideMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = requested_method(&req) {
                log::debug!("Overriding POST {} as {}", req.path(), method);
                req.head_mut().method = method;
            }
        }

        Box::pin(self.service.call(req))
    }
}

fn requested_method(req: &ServiceRequest) -> Option<Method> {
    let from_header = req
        .headers()
        .get(METHOD_OVERRIDE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(String::from);

    let from_query = || {
        web::Query::<OverrideQuery>::from_query(req.query_string())
            .ok()
            .and_then(|query| query.into_inner().method)
    };

    parse_override(&from_header.or_else(from_query)?)
}

fn parse_override(raw: &str) -> Option<Method> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
