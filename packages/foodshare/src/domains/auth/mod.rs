//! Members and the signed-in session.

pub mod models;
pub mod session;
pub mod store;

pub use models::{ProfileUpdate, Registration, User, UserRole};
pub use session::{Session, SESSION_KEY};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
