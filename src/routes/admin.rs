use actix_web::web;

use crate::handlers::admin;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/users", web::get().to(admin::get_users))
            .route("/users", web::post().to(admin::create_user))
            .route("/users/{id}", web::put().to(admin::update_user))
            .route("/users/{id}", web::delete().to(admin::delete_user))
            .route("/requests", web::get().to(admin::get_requests))
            .route(
                "/requests/{id}/approve",
                web::post().to(admin::approve_request),
            )
            .route("/requests/{id}/reject", web::post().to(admin::reject_request)),
    );
}
