//! Backend for a cinema chain: movie catalog, cinemas and their theatres,
//! seat layouts, and session scheduling over PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod types;
pub mod utils;
pub mod validation;
