use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `{"ok": true}` acknowledgement body
#[derive(Debug, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
}

pub fn ok() -> HttpResponse {
    HttpResponse::Ok().json(Ack { ok: true })
}

/// Malformed JSON bodies get the same `{"error": ...}` shape as every other failure
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(format!("Invalid request body: {}", err)).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        AppError::Validation(format!("Invalid path parameter: {}", err)).into()
    })
}
