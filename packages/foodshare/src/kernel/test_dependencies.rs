// TestDependencies - mock implementations for testing
//
// Provides ready-made dependencies that can be injected into FoodShareKernel
// for tests, while keeping typed handles so tests can inspect them afterwards.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{
    memory::{MemoryDonationRepository, MockAuthService},
    BaseAuthService, BaseLocationProvider, FoodShareKernel,
};
use crate::common::Coordinates;
use crate::domains::auth::models::{ProfileUpdate, Registration, User};
use crate::domains::auth::store::MemorySessionStore;
use crate::domains::donations::models::Donation;
use crate::error::{FoodShareError, Result};

// =============================================================================
// Mock Location Provider
// =============================================================================

/// Location provider with a scripted answer.
pub enum MockLocationProvider {
    At(Coordinates),
    Unknown,
    /// Lookup fails outright, like a denied permission prompt
    Denied,
}

#[async_trait]
impl BaseLocationProvider for MockLocationProvider {
    async fn current_location(&self) -> Result<Option<Coordinates>> {
        match self {
            MockLocationProvider::At(position) => Ok(Some(*position)),
            MockLocationProvider::Unknown => Ok(None),
            MockLocationProvider::Denied => Err(FoodShareError::Validation(
                "location permission denied".to_string(),
            )),
        }
    }
}

// =============================================================================
// Spy Auth Service
// =============================================================================

/// Record of a call made to the auth service.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthCall {
    Login { email: String },
    Register { email: String },
    UpdateProfile { email: String },
}

/// Wraps [`MockAuthService`] and records every call.
#[derive(Default)]
pub struct SpyAuthService {
    inner: MockAuthService,
    calls: Mutex<Vec<AuthCall>>,
}

impl SpyAuthService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all calls made so far
    pub fn calls(&self) -> Vec<AuthCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: AuthCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BaseAuthService for SpyAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<User> {
        self.record(AuthCall::Login {
            email: email.to_string(),
        });
        self.inner.login(email, password).await
    }

    async fn register(&self, registration: &Registration) -> Result<User> {
        self.record(AuthCall::Register {
            email: registration.email.clone(),
        });
        self.inner.register(registration).await
    }

    async fn update_profile(&self, user: &User, update: &ProfileUpdate) -> Result<User> {
        self.record(AuthCall::UpdateProfile {
            email: user.email.clone(),
        });
        self.inner.update_profile(user, update).await
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builder for a kernel wired entirely to in-memory mocks.
///
/// Defaults: seeded repository with no latency, spy auth, unknown location,
/// empty memory session store, São Paulo fallback.
pub struct TestDependencies {
    pub donations: Arc<MemoryDonationRepository>,
    pub auth: Arc<SpyAuthService>,
    pub location: Arc<MockLocationProvider>,
    pub session_store: Arc<MemorySessionStore>,
    pub fallback_reference: Coordinates,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            donations: Arc::new(MemoryDonationRepository::seeded()),
            auth: Arc::new(SpyAuthService::new()),
            location: Arc::new(MockLocationProvider::Unknown),
            session_store: Arc::new(MemorySessionStore::new()),
            fallback_reference: Coordinates::SAO_PAULO_CENTER,
        }
    }

    pub fn with_donations(mut self, donations: Vec<Donation>) -> Self {
        self.donations = Arc::new(MemoryDonationRepository::with_donations(donations));
        self
    }

    pub fn with_repository(mut self, repository: MemoryDonationRepository) -> Self {
        self.donations = Arc::new(repository);
        self
    }

    pub fn with_location(mut self, location: MockLocationProvider) -> Self {
        self.location = Arc::new(location);
        self
    }

    pub fn with_fallback_reference(mut self, fallback: Coordinates) -> Self {
        self.fallback_reference = fallback;
        self
    }

    /// Build a kernel sharing this builder's handles.
    pub fn kernel(&self) -> FoodShareKernel {
        FoodShareKernel::new(
            self.donations.clone(),
            self.auth.clone(),
            self.location.clone(),
            self.session_store.clone(),
            self.fallback_reference,
        )
    }
}
