// FoodShare - marketplace core
//
// Donors list surplus food, shelters browse, filter and reserve it.
// This crate holds the listing model, the proximity ranker behind the map view,
// role-based dashboards, and the session/repository boundaries the front ends use.
//
// Domain logic lives in domains/*, swappable infrastructure in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod error;
pub mod kernel;

pub use config::*;
pub use error::{FoodShareError, Result};
