use sqlx::SqlitePool;
use std::time::Duration;

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::AppError;
pub use services::{RequestLedger, SessionStore, UserDirectory};

use database::repositories::{UserRepository, VacationRequestRepository};

/// Shared, request-independent state handed to every handler.
pub struct AppState {
    pub config: Config,
    pub users: UserDirectory,
    pub requests: RequestLedger,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let users = UserDirectory::new(UserRepository::new(pool.clone()), config.bcrypt_cost);
        let requests = RequestLedger::new(VacationRequestRepository::new(pool));
        let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_minutes * 60));

        Self {
            config,
            users,
            requests,
            sessions,
        }
    }
}
