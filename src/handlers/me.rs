use actix_web::{HttpResponse, Result, web};

use crate::AppState;
use crate::database::models::VacationRequestInput;
use crate::error::AppError;
use crate::services::UserContext;

/// The caller's own requests, newest first
pub async fn get_my_requests(
    ctx: UserContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let requests = state.requests.list_mine(ctx.user_id()).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/// Submit a request for the caller; the owner always comes from the session
pub async fn create_my_request(
    ctx: UserContext,
    state: web::Data<AppState>,
    input: web::Json<VacationRequestInput>,
) -> Result<HttpResponse, AppError> {
    let created = state
        .requests
        .create(ctx.user_id(), input.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(created))
}
