pub mod jwt;
pub mod pagination;
pub mod password;
pub mod time;
