use actix_web::{HttpResponse, Responder, http, web};
use validator::Validate;

use crate::errors::{Result, ShortenerError};
use crate::middlewares::authmw::SessionSubject;
use crate::middlewares::visitor::VisitorId;
use crate::state::app_state::AppState;
use crate::store::FlashLevel;
use crate::structs::url_request::{
    UrlAnalyticsResponse, UrlExport, UrlListResponse, UrlRequest, UrlResponse,
};
use crate::utils::url_validator::redirect_location;

fn check_url(req: &UrlRequest) -> Result<()> {
    req.validate()
        .map_err(|errors| ShortenerError::InvalidDestination(errors.to_string()))
}

/// Create a shortened URL
pub async fn create_short_url(
    app_state: web::Data<AppState>,
    subject: SessionSubject,
    web::Json(req): web::Json<UrlRequest>,
) -> Result<impl Responder> {
    check_url(&req)?;

    let short_code = app_state.links.add(subject.account_id(), &req.url)?;
    app_state.flash.push(
        subject.account_id(),
        FlashLevel::Success,
        format!("Short URL {} created", short_code),
    );

    let short_url = format!("{}/u/{}", app_state.config.public_host, short_code);

    Ok(HttpResponse::Created().json(UrlResponse {
        original_url: req.url,
        short_url,
        short_code,
    }))
}

/// List the caller's URLs along with any pending flash messages
pub async fn get_user_urls(
    app_state: web::Data<AppState>,
    subject: SessionSubject,
) -> Result<impl Responder> {
    let urls = app_state.links.list_for_owner(subject.account_id());
    let messages = app_state.flash.drain(subject.account_id());

    Ok(HttpResponse::Ok().json(UrlListResponse { messages, urls }))
}

/// Get analytics for a specific URL
pub async fn get_url_analytics(
    app_state: web::Data<AppState>,
    subject: SessionSubject,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let code = path.into_inner();
    let link = app_state.links.get(subject.account_id(), &code)?;

    Ok(HttpResponse::Ok().json(UrlAnalyticsResponse::new(
        link,
        &app_state.config.public_host,
    )))
}

pub async fn update_short_url(
    app_state: web::Data<AppState>,
    subject: SessionSubject,
    path: web::Path<String>,
    web::Json(req): web::Json<UrlRequest>,
) -> Result<impl Responder> {
    let code = path.into_inner();
    check_url(&req)?;

    let link = app_state
        .links
        .replace(subject.account_id(), &code, &req.url)?;
    app_state.flash.push(
        subject.account_id(),
        FlashLevel::Success,
        format!("Short URL {} updated", code),
    );

    Ok(HttpResponse::Ok().json(UrlAnalyticsResponse::new(
        link,
        &app_state.config.public_host,
    )))
}

/// Deleting an unknown code still answers 204
pub async fn delete_short_url(
    app_state: web::Data<AppState>,
    subject: SessionSubject,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let code = path.into_inner();
    app_state.links.delete(subject.account_id(), &code);
    app_state.flash.push(
        subject.account_id(),
        FlashLevel::Info,
        format!("Short URL {} deleted", code),
    );

    Ok(HttpResponse::NoContent().finish())
}

pub async fn export_urls(
    app_state: web::Data<AppState>,
    subject: SessionSubject,
) -> Result<impl Responder> {
    let urls: Vec<UrlExport> = app_state
        .links
        .export_for_owner(subject.account_id())
        .into_iter()
        .map(UrlExport::from)
        .collect();

    Ok(HttpResponse::Ok().json(urls))
}

/// Redirect to original URL
pub async fn redirect_to_url(
    app_state: web::Data<AppState>,
    visitor: VisitorId,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let code = path.into_inner();
    let original_url = app_state.links.visit(&code, visitor.as_str())?;

    Ok(HttpResponse::Found()
        .append_header((http::header::LOCATION, redirect_location(&original_url)))
        .finish())
}
