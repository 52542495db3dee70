#[allow(clippy::module_inception)]
mod routes;

pub use routes::init_routes;
