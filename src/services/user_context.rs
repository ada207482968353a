use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures_util::future::LocalBoxFuture;

use crate::AppState;
use crate::database::models::{UserInfo, UserRole};
use crate::error::AppError;

/// The authenticated caller, resolved from the session cookie for each request.
/// Taking it as a handler argument makes the route require a session.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user: UserInfo,
    pub session_id: String,
}

impl UserContext {
    pub fn user_id(&self) -> i64 {
        self.user.id
    }

    pub fn is_manager(&self) -> bool {
        self.user.role == UserRole::Manager
    }

    /// Administrative operations are open to managers only
    pub fn requires_manager(&self) -> Result<(), AppError> {
        if self.is_manager() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Manager role required".to_string()))
        }
    }
}

/// The session id carried by the request's cookie, if any
pub fn session_id_from(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    req.cookie(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

impl FromRequest for UserContext {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let state = req.app_data::<Data<AppState>>().cloned().ok_or_else(|| {
                AppError::internal_server_error_message("Application state is not configured")
            })?;

            let session_id = session_id_from(&req, &state.config.session_cookie_name)
                .ok_or(AppError::Unauthorized)?;

            let user_id = state
                .sessions
                .user_id(&session_id)
                .await
                .ok_or(AppError::Unauthorized)?;

            match state.users.find_user(user_id).await? {
                Some(user) => Ok(UserContext {
                    user: user.into(),
                    session_id,
                }),
                None => {
                    // The account was deleted while the session was alive
                    state.sessions.destroy(&session_id).await;
                    Err(AppError::Unauthorized)
                }
            }
        })
    }
}
