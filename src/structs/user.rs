use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::AccountResponse;

#[derive(Deserialize, Serialize, Validate)]
pub struct CredentialsRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct SessionResponse {
    pub account: AccountResponse,
    pub token: String,
}
