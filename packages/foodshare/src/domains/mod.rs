pub mod auth;
pub mod donations;
