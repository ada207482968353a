use actix_web::web;

use crate::handlers::{auth, me};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/me")
            .route("", web::get().to(auth::me))
            .route("/requests", web::get().to(me::get_my_requests))
            .route("/requests", web::post().to(me::create_my_request)),
    );
}
