#![allow(dead_code)]

use actix_web::{cookie::Cookie, dev::ServiceResponse, web};
use anyhow::Result;
use fake::Fake;
use fake::faker::name::en::Name;
use sqlx::SqlitePool;
use std::env;
use tempfile::TempDir;

use vacation_desk::database::init_database;
use vacation_desk::database::models::{CreateUserInput, CreatedUser, RegisterInput};
use vacation_desk::{AppState, Config};

pub const PASSWORD: &str = "secret1";

/// Fresh database in a temporary directory plus the application state built on it
pub struct TestContext {
    pub pool: SqlitePool,
    pub config: Config,
    pub state: web::Data<AppState>,
    _temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());

        let config = Config {
            database_url: database_url.clone(),
            ..Config::test_config()
        };

        let pool = init_database(&database_url).await?;
        let state = web::Data::new(AppState::new(config.clone(), pool.clone()));

        Ok(TestContext {
            pool,
            config,
            state,
            _temp_dir: temp_dir,
        })
    }

    /// Self-registered employee with a generated name
    pub async fn employee(&self, email: &str) -> CreatedUser {
        self.state
            .users
            .register(RegisterInput {
                name: Name().fake(),
                email: email.to_string(),
                password: PASSWORD.to_string(),
            })
            .await
            .expect("Failed to register employee")
    }

    pub async fn manager(&self, email: &str) -> CreatedUser {
        self.state
            .users
            .create_user(CreateUserInput {
                name: Name().fake(),
                email: email.to_string(),
                password: PASSWORD.to_string(),
                role: Some("manager".to_string()),
                employee_code: None,
            })
            .await
            .expect("Failed to create manager")
    }

    pub async fn count(&self, table: &str) -> i64 {
        let query = format!("SELECT COUNT(*) FROM {}", table);
        sqlx::query_scalar::<_, i64>(&query)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count records")
    }
}

/// The session cookie set by a response, if any
pub fn session_cookie<B>(resp: &ServiceResponse<B>, config: &Config) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == config.session_cookie_name)
        .map(|cookie| cookie.into_owned())
}

pub fn setup_test_env() {
    unsafe {
        env::set_var("RUST_LOG", "debug");
    }
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build the full application around a test context
#[allow(unused_macros)]
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($ctx.state.clone())
                .configure(vacation_desk::routes::configure),
        )
        .await
    };
}

/// Log in through the HTTP API and return the session cookie
#[allow(unused_macros)]
macro_rules! login {
    ($app:expr, $ctx:expr, $email:expr, $password:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/login")
            .set_json(serde_json::json!({ "email": $email, "password": $password }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK, "login failed");
        common::session_cookie(&resp, &$ctx.config).expect("login did not set a session cookie")
    }};
}
