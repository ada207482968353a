use actix_web::{HttpResponse, Result, web};

use crate::AppState;
use crate::database::models::{CreateUserInput, Decision, UpdateUserInput};
use crate::error::AppError;
use crate::handlers::shared;
use crate::services::UserContext;

// User management handlers
pub async fn get_users(
    ctx: UserContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    ctx.requires_manager()?;

    let users = state.users.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn create_user(
    ctx: UserContext,
    state: web::Data<AppState>,
    input: web::Json<CreateUserInput>,
) -> Result<HttpResponse, AppError> {
    ctx.requires_manager()?;

    let created = state.users.create_user(input.into_inner()).await?;
    log::info!("Manager {} created user {}", ctx.user_id(), created.id);

    Ok(HttpResponse::Created().json(created))
}

pub async fn update_user(
    path: web::Path<i64>,
    ctx: UserContext,
    state: web::Data<AppState>,
    input: web::Json<UpdateUserInput>,
) -> Result<HttpResponse, AppError> {
    ctx.requires_manager()?;

    state
        .users
        .update_user(path.into_inner(), input.into_inner())
        .await?;

    Ok(shared::ok())
}

pub async fn delete_user(
    path: web::Path<i64>,
    ctx: UserContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    ctx.requires_manager()?;

    let user_id_to_delete = path.into_inner();
    if user_id_to_delete == ctx.user_id() {
        return Err(AppError::validation("You cannot delete your own account"));
    }

    state.users.delete_user(user_id_to_delete).await?;

    Ok(HttpResponse::NoContent().finish())
}

// Request moderation handlers
pub async fn get_requests(
    ctx: UserContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    ctx.requires_manager()?;

    let requests = state.requests.list_all().await?;
    Ok(HttpResponse::Ok().json(requests))
}

pub async fn approve_request(
    path: web::Path<i64>,
    ctx: UserContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    decide(path.into_inner(), &ctx, &state, Decision::Approve).await
}

pub async fn reject_request(
    path: web::Path<i64>,
    ctx: UserContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    decide(path.into_inner(), &ctx, &state, Decision::Reject).await
}

async fn decide(
    request_id: i64,
    ctx: &UserContext,
    state: &AppState,
    decision: Decision,
) -> Result<HttpResponse, AppError> {
    ctx.requires_manager()?;

    state.requests.set_status(request_id, decision).await?;

    Ok(shared::ok())
}
