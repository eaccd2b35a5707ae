//! Donation domain actions
//!
//! Front ends call these directly with the session and kernel. Each one checks
//! who is asking, then goes through the repository, abandoning the call if the
//! cancellation token fires.

pub mod authorization;
pub mod discovery;
pub mod lifecycle;
pub mod publish;

pub use authorization::{check_can_manage, check_can_publish, check_can_reserve};
pub use discovery::{browse_donations, discover_nearby, MapView};
pub use lifecycle::{collect_donation, reserve_donation};
pub use publish::{create_donation, update_donation};
