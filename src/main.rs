use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware::Logger, web};
use anyhow::Context;
use dotenv::dotenv;
use env_logger::Env;

use linkledger::config::AppConfig;
use linkledger::middlewares::method_override::MethodOverride;
use linkledger::middlewares::visitor::VisitorCookie;
use linkledger::routes::init_routes;
use linkledger::state::app_state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let bind = (config.bind_address.clone(), config.port);
    let allowed_origins = config.allowed_origins.clone();
    let secure_cookies = config.secure_cookies;

    // Create shared state
    let app_state = web::Data::new(AppState::new(config));

    log::info!("Listening on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
            .allowed_headers(vec![http::header::AUTHORIZATION, http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .supports_credentials()
            .max_age(3600);
        App::new()
            .wrap(VisitorCookie {
                secure: secure_cookies,
            })
            .wrap(MethodOverride)
            .wrap(cors)
            .wrap(logger)
            .app_data(app_state.clone())
            .configure(init_routes)
    })
    .bind(&bind)
    .with_context(|| format!("Failed to bind {}:{}", bind.0, bind.1))?
    .run()
    .await
    .context("HTTP server terminated with an error")
}
