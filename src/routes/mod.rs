use actix_web::{HttpResponse, Responder, get, web};

use crate::handlers::shared;

pub mod admin;
pub mod auth;
pub mod me;

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(shared::json_config())
        .app_data(shared::path_config())
        .service(health)
        .configure(auth::configure)
        .configure(me::configure)
        .configure(admin::configure);
}
