pub mod actor;
pub mod cinema;
pub mod common;
pub mod movie;
pub mod seat;
pub mod session;
pub mod theatre;
pub mod transaction;
pub mod user;

pub use actor::ActorRepository;
pub use cinema::CinemaRepository;
pub use movie::MovieRepository;
pub use seat::SeatRepository;
pub use session::{SessionFilters, SessionRepository};
pub use theatre::TheatreRepository;
pub use user::UserRepository;
