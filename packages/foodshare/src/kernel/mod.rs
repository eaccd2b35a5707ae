//! Kernel module - marketplace infrastructure and dependencies.

pub mod cancel;
pub mod foodshare_kernel;
pub mod location;
pub mod memory;
pub mod test_dependencies;
pub mod traits;

pub use cancel::with_cancel;
pub use foodshare_kernel::FoodShareKernel;
pub use location::{FixedLocationProvider, UnavailableLocationProvider};
pub use memory::{MemoryDonationRepository, MockAuthService, SimulatedLatency};
pub use test_dependencies::TestDependencies;
pub use traits::*;
