pub mod jwt;
pub mod short_code;
pub mod url_validator;
