pub mod url_request;
pub mod user;
