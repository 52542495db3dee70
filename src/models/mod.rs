pub mod url;
pub mod url_visitor;
pub mod user;
