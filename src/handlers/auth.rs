use actix_web::{
    HttpRequest, HttpResponse, Result,
    cookie::{Cookie, SameSite},
    web,
};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::config::Config;
use crate::database::models::{LoginInput, RegisterInput, UserInfo, UserRole};
use crate::error::AppError;
use crate::handlers::shared;
use crate::middleware::RequestIdExt;
use crate::services::user_context::{UserContext, session_id_from};

/// What a signed-in user learns about themselves
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub employee_code: String,
}

impl From<UserInfo> for SessionUser {
    fn from(user: UserInfo) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            employee_code: user.employee_code,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub ok: bool,
    pub employee_code: String,
}

fn session_cookie(config: &Config, value: String) -> Cookie<'static> {
    Cookie::build(config.session_cookie_name.clone(), value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.is_production())
        .finish()
}

pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    input: web::Json<LoginInput>,
) -> Result<HttpResponse, AppError> {
    let user = state.users.authenticate(&input).await.inspect_err(|e| {
        if matches!(e, AppError::InvalidCredentials) {
            log::info!(
                "Failed login attempt (correlation_id: {})",
                req.correlation_id().unwrap_or_default()
            );
        }
    })?;

    let session_id = state.sessions.create(user.id).await;
    log::info!("User {} logged in", user.id);

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&state.config, session_id))
        .json(SessionUser::from(user)))
}

pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    if let Some(session_id) = session_id_from(&req, &state.config.session_cookie_name) {
        state.sessions.destroy(&session_id).await;
        log::info!("Session ended");
    }

    let mut removal = session_cookie(&state.config, String::new());
    removal.make_removal();

    Ok(HttpResponse::Ok()
        .cookie(removal)
        .json(shared::Ack { ok: true }))
}

pub async fn me(ctx: UserContext) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(SessionUser::from(ctx.user)))
}

pub async fn register(
    state: web::Data<AppState>,
    input: web::Json<RegisterInput>,
) -> Result<HttpResponse, AppError> {
    let created = state.users.register(input.into_inner()).await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        ok: true,
        employee_code: created.employee_code,
    }))
}
