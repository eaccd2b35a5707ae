// FoodShareKernel - every swappable dependency in one place
//
// Front ends (CLI, tests) build a kernel once and hand it to domain actions.
// Swapping a stub for a real client means changing only how the kernel is
// built.

use std::sync::Arc;

use super::{
    memory::{MemoryDonationRepository, MockAuthService},
    location::{FixedLocationProvider, UnavailableLocationProvider},
    BaseAuthService, BaseDonationRepository, BaseLocationProvider,
};
use crate::common::Coordinates;
use crate::config::Config;
use crate::domains::auth::store::{FileSessionStore, MemorySessionStore, SessionStore};

/// FoodShareKernel holds all marketplace dependencies
pub struct FoodShareKernel {
    pub donations: Arc<dyn BaseDonationRepository>,
    pub auth: Arc<dyn BaseAuthService>,
    pub location: Arc<dyn BaseLocationProvider>,
    pub session_store: Arc<dyn SessionStore>,
    /// Reference used when the location provider has no answer
    pub fallback_reference: Coordinates,
}

impl FoodShareKernel {
    /// Creates a new FoodShareKernel with the given dependencies
    pub fn new(
        donations: Arc<dyn BaseDonationRepository>,
        auth: Arc<dyn BaseAuthService>,
        location: Arc<dyn BaseLocationProvider>,
        session_store: Arc<dyn SessionStore>,
        fallback_reference: Coordinates,
    ) -> Self {
        Self {
            donations,
            auth,
            location,
            session_store,
            fallback_reference,
        }
    }

    /// Kernel backed by the in-memory stubs, shaped by `config`.
    pub fn from_config(config: &Config) -> Self {
        let donations =
            Arc::new(MemoryDonationRepository::seeded().with_latency(config.simulated_latency));
        let auth = Arc::new(MockAuthService::new().with_latency(config.simulated_latency.auth));

        let location: Arc<dyn BaseLocationProvider> = match config.device_location {
            Some(position) => Arc::new(FixedLocationProvider::new(position)),
            None => Arc::new(UnavailableLocationProvider),
        };

        let session_store: Arc<dyn SessionStore> = match &config.session_dir {
            Some(dir) => Arc::new(FileSessionStore::new(dir.clone())),
            None => Arc::new(MemorySessionStore::new()),
        };

        Self::new(
            donations,
            auth,
            location,
            session_store,
            config.fallback_reference,
        )
    }
}
