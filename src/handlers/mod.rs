pub mod auth;
pub mod cinemas;
pub mod movies;
pub mod sessions;
pub mod theatres;
