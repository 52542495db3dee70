pub mod config;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod structs;
pub mod utils;

pub use errors::ShortenerError;
pub use state::app_state::AppState;
