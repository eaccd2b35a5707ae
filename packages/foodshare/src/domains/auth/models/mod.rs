pub mod user;

pub use user::{ProfileUpdate, Registration, User, UserRole};
