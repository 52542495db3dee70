use actix_web::web;

use crate::handlers::auth_handlers::{login, logout, signup};
use crate::handlers::health_handlers::health_check;
use crate::handlers::url_handlers::{
    create_short_url, delete_short_url, export_urls, get_url_analytics, get_user_urls,
    redirect_to_url, update_short_url,
};
use crate::middlewares::authmw::SessionAuth;

/// Configure the routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Public redirect, no session needed
    cfg.route("/u/{code}", web::get().to(redirect_to_url));
    cfg.route("/health/check", web::get().to(health_check));
    // Authentication routes - no auth required
    cfg.service(
        web::scope("/api/auth")
            .route("/login", web::post().to(login))
            .route("/register", web::post().to(signup)),
    );
    // API routes - require a session
    cfg.service(
        web::scope("/api")
            .wrap(SessionAuth)
            .route("/logout", web::post().to(logout))
            .route("/urls", web::get().to(get_user_urls))
            .route("/urls", web::post().to(create_short_url))
            .route("/urls.json", web::get().to(export_urls))
            .service(
                web::resource("/urls/{code}")
                    .route(web::get().to(get_url_analytics))
                    .route(web::put().to(update_short_url))
                    .route(web::patch().to(update_short_url))
                    .route(web::delete().to(delete_short_url)),
            ),
    );
}
