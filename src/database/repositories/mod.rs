pub mod user;
pub mod vacation_request;

pub use user::UserRepository;
pub use vacation_request::VacationRequestRepository;
