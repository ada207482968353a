pub mod request_ledger;
pub mod session;
pub mod user_context;
pub mod user_directory;
pub mod validation;

pub use request_ledger::RequestLedger;
pub use session::SessionStore;
pub use user_context::UserContext;
pub use user_directory::UserDirectory;
