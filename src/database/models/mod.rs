pub mod macros;
pub mod user;
pub mod vacation_request;

// Re-export all models for easy importing
pub use user::*;
pub use vacation_request::*;
