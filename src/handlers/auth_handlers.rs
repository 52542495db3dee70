use actix_web::{HttpResponse, http::StatusCode, web};
use validator::Validate;

use crate::errors::{Result, ShortenerError};
use crate::middlewares::authmw::{SessionSubject, removal_cookie, session_cookie};
use crate::models::user::AccountResponse;
use crate::state::app_state::AppState;
use crate::structs::user::{CredentialsRequest, SessionResponse};

/// Runs bcrypt-bound directory calls on the blocking pool
async fn blocking<F>(app_state: web::Data<AppState>, f: F) -> Result<String>
where
    F: FnOnce(&AppState) -> Result<String> + Send + 'static,
{
    web::block(move || f(app_state.get_ref()))
        .await
        .map_err(|e| ShortenerError::Internal(format!("Blocking task failed: {}", e)))?
}

fn start_session(
    app_state: &AppState,
    account_id: &str,
    status: StatusCode,
) -> Result<HttpResponse> {
    let account = app_state
        .users
        .find(account_id)
        .ok_or(ShortenerError::InvalidCredentials)?;
    let token = app_state.sessions.issue(account_id)?;
    let cookie = session_cookie(token.clone(), &app_state.config);

    let body = SessionResponse {
        account: AccountResponse::from(account),
        token,
    };

    Ok(HttpResponse::build(status).cookie(cookie).json(body))
}

pub async fn signup(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<CredentialsRequest>,
) -> Result<HttpResponse> {
    req.validate().map_err(|_| ShortenerError::MissingField)?;

    let CredentialsRequest { email, password } = req;
    let account_id = blocking(app_state.clone(), move |state| {
        state.users.register(&email, &password)
    })
    .await?;

    start_session(&app_state, &account_id, StatusCode::CREATED)
}

pub async fn login(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<CredentialsRequest>,
) -> Result<HttpResponse> {
    // Empty fields can never match, so they fail like any other bad login
    let CredentialsRequest { email, password } = req;
    let account_id = blocking(app_state.clone(), move |state| {
        state.users.authenticate(&email, &password)
    })
    .await?;

    start_session(&app_state, &account_id, StatusCode::OK)
}

pub async fn logout(
    app_state: web::Data<AppState>,
    subject: SessionSubject,
) -> Result<HttpResponse> {
    app_state.flash.drain(subject.account_id());

    Ok(HttpResponse::Ok()
        .cookie(removal_cookie())
        .json(serde_json::json!({ "success": true })))
}
