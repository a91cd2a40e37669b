pub mod actor;
pub mod cinema;
pub mod movie;
pub mod seat;
pub mod session;
pub mod theatre;
pub mod user;
