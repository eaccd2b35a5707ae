//! In-memory stand-ins for the marketplace backend.
//!
//! Useful for development, the CLI and tests. State lives for the lifetime of
//! the value; nothing is persisted.

use async_trait::async_trait;
use std::sync::RwLock;
use std::time::Duration;
use tracing::{debug, info, instrument};

use super::traits::{BaseAuthService, BaseDonationRepository};
use crate::common::{DonationId, MemberId};
use crate::domains::auth::models::user::validate_credentials;
use crate::domains::auth::models::{ProfileUpdate, Registration, User, UserRole};
use crate::domains::donations::data::mock_donations;
use crate::domains::donations::models::{Donation, DonationUpdate};
use crate::error::{FoodShareError, Result};

/// Artificial round-trip delays, standing in for a real backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulatedLatency {
    pub read: Duration,
    pub reserve: Duration,
    pub create: Duration,
    pub update: Duration,
    pub auth: Duration,
}

impl SimulatedLatency {
    /// No delays at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// The delays of the prototype front end: one second for most writes and
    /// auth, a second and a half for publishing a listing.
    pub fn prototype() -> Self {
        Self {
            read: Duration::ZERO,
            reserve: Duration::from_millis(1000),
            create: Duration::from_millis(1500),
            update: Duration::from_millis(1000),
            auth: Duration::from_millis(1000),
        }
    }

    /// The same delay for every call.
    pub fn uniform(delay: Duration) -> Self {
        Self {
            read: delay,
            reserve: delay,
            create: delay,
            update: delay,
            auth: delay,
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

// =============================================================================
// Donation repository
// =============================================================================

/// Listings held in a `Vec` behind a lock, in publication order.
pub struct MemoryDonationRepository {
    donations: RwLock<Vec<Donation>>,
    latency: SimulatedLatency,
}

impl Default for MemoryDonationRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDonationRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::with_donations(Vec::new())
    }

    /// Repository pre-filled with the seed listings.
    pub fn seeded() -> Self {
        Self::with_donations(mock_donations())
    }

    pub fn with_donations(donations: Vec<Donation>) -> Self {
        Self {
            donations: RwLock::new(donations),
            latency: SimulatedLatency::none(),
        }
    }

    pub fn with_latency(mut self, latency: SimulatedLatency) -> Self {
        self.latency = latency;
        self
    }

    pub fn len(&self) -> usize {
        self.donations.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current listings, bypassing the simulated latency.
    pub fn snapshot(&self) -> Vec<Donation> {
        self.donations.read().unwrap().clone()
    }

    /// Run `f` against one listing under the write lock.
    fn modify<F>(&self, id: DonationId, f: F) -> Result<Donation>
    where
        F: FnOnce(&mut Donation) -> Result<()>,
    {
        let mut donations = self.donations.write().unwrap();
        let donation = donations
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(FoodShareError::DonationNotFound { id })?;

        // Work on a copy so a rejected change leaves the stored record intact
        let mut updated = donation.clone();
        f(&mut updated)?;
        *donation = updated.clone();
        Ok(updated)
    }
}

#[async_trait]
impl BaseDonationRepository for MemoryDonationRepository {
    async fn list(&self) -> Result<Vec<Donation>> {
        pause(self.latency.read).await;
        Ok(self.donations.read().unwrap().clone())
    }

    async fn find_by_id(&self, id: DonationId) -> Result<Option<Donation>> {
        pause(self.latency.read).await;
        Ok(self
            .donations
            .read()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    #[instrument(skip(self, donation), fields(donation_id = %donation.id))]
    async fn create(&self, donation: Donation) -> Result<Donation> {
        pause(self.latency.create).await;

        let mut donations = self.donations.write().unwrap();
        if donations.iter().any(|d| d.id == donation.id) {
            return Err(FoodShareError::Validation(format!(
                "donation {} already exists",
                donation.id
            )));
        }
        donations.push(donation.clone());
        debug!(total = donations.len(), "Donation stored");
        Ok(donation)
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: DonationId, update: DonationUpdate) -> Result<Donation> {
        pause(self.latency.update).await;
        self.modify(id, |d| d.apply_update(update))
    }

    #[instrument(skip(self))]
    async fn reserve(&self, id: DonationId, reserved_by: &str) -> Result<Donation> {
        pause(self.latency.reserve).await;
        self.modify(id, |d| d.reserve(reserved_by))
    }

    #[instrument(skip(self))]
    async fn mark_collected(&self, id: DonationId) -> Result<Donation> {
        pause(self.latency.update).await;
        self.modify(id, |d| d.mark_collected())
    }
}

// =============================================================================
// Auth service
// =============================================================================

/// Accepts any well-formed credentials.
///
/// Login always yields the same demo donor (member 1, the owner of the first
/// seed listing) under the email that was typed; registration mints a new
/// member id.
pub struct MockAuthService {
    latency: Duration,
    default_location: String,
}

impl Default for MockAuthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAuthService {
    pub const DEMO_MEMBER_ID: MemberId = MemberId::from_u128(1);
    pub const DEMO_NAME: &'static str = "João Silva";
    const AVATAR: &'static str = "/diverse-user-avatars.png";

    pub fn new() -> Self {
        Self {
            latency: Duration::ZERO,
            default_location: "São Paulo, SP".to_string(),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl BaseAuthService for MockAuthService {
    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<User> {
        validate_credentials(email, password)?;
        pause(self.latency).await;

        let user = User {
            id: Self::DEMO_MEMBER_ID,
            name: Self::DEMO_NAME.to_string(),
            email: email.trim().to_string(),
            role: UserRole::Donor,
            avatar: Some(Self::AVATAR.to_string()),
            location: Some(self.default_location.clone()),
            phone: None,
            bio: None,
        };
        info!(member_id = %user.id, "Member signed in");
        Ok(user)
    }

    #[instrument(skip(self, registration), fields(email = %registration.email, role = %registration.role))]
    async fn register(&self, registration: &Registration) -> Result<User> {
        registration.validate()?;
        pause(self.latency).await;

        let user = User {
            id: MemberId::new(),
            name: registration.name.trim().to_string(),
            email: registration.email.trim().to_string(),
            role: registration.role,
            avatar: Some(Self::AVATAR.to_string()),
            location: Some(self.default_location.clone()),
            phone: None,
            bio: None,
        };
        info!(member_id = %user.id, "Member registered");
        Ok(user)
    }

    #[instrument(skip(self, user, update), fields(member_id = %user.id))]
    async fn update_profile(&self, user: &User, update: &ProfileUpdate) -> Result<User> {
        let updated = update.apply_to(user)?;
        pause(self.latency).await;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::donations::models::DonationStatus;

    fn first_seed_id() -> DonationId {
        DonationId::from_u128(1)
    }

    #[tokio::test]
    async fn test_seeded_repository_lists_seed_in_order() {
        let repo = MemoryDonationRepository::seeded();
        let listed = repo.list().await.unwrap();
        assert_eq!(listed, mock_donations());
    }

    #[tokio::test]
    async fn test_reserve_then_collect() {
        let repo = MemoryDonationRepository::seeded();

        let reserved = repo.reserve(first_seed_id(), "Abrigo Esperança").await.unwrap();
        assert_eq!(reserved.status, DonationStatus::Reserved);

        let stored = repo.get(first_seed_id()).await.unwrap();
        assert_eq!(stored.reserved_by.as_deref(), Some("Abrigo Esperança"));

        let collected = repo.mark_collected(first_seed_id()).await.unwrap();
        assert_eq!(collected.status, DonationStatus::Collected);
    }

    #[tokio::test]
    async fn test_rejected_change_leaves_record_untouched() {
        let repo = MemoryDonationRepository::seeded();
        repo.reserve(first_seed_id(), "Abrigo Esperança").await.unwrap();

        let err = repo.reserve(first_seed_id(), "ONG Alimentar").await.unwrap_err();
        assert!(matches!(err, FoodShareError::InvalidTransition { .. }));

        let stored = repo.get(first_seed_id()).await.unwrap();
        assert_eq!(stored.reserved_by.as_deref(), Some("Abrigo Esperança"));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let repo = MemoryDonationRepository::seeded();
        let missing = DonationId::new();

        assert!(repo.find_by_id(missing).await.unwrap().is_none());
        assert!(matches!(
            repo.get(missing).await,
            Err(FoodShareError::DonationNotFound { .. })
        ));
        assert!(matches!(
            repo.reserve(missing, "Abrigo").await,
            Err(FoodShareError::DonationNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let repo = MemoryDonationRepository::seeded();
        let existing = mock_donations().remove(0);

        assert!(repo.create(existing).await.is_err());
        assert_eq!(repo.len(), 6);
    }

    #[tokio::test]
    async fn test_mock_login_returns_demo_donor() {
        let auth = MockAuthService::new();
        let user = auth.login("joao@example.com", "secret").await.unwrap();

        assert_eq!(user.id, MockAuthService::DEMO_MEMBER_ID);
        assert_eq!(user.email, "joao@example.com");
        assert!(user.is_donor());
    }

    #[tokio::test]
    async fn test_mock_login_rejects_malformed_email() {
        let auth = MockAuthService::new();
        assert!(matches!(
            auth.login("nobody", "secret").await,
            Err(FoodShareError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_register_mints_new_id() {
        let auth = MockAuthService::new();
        let registration =
            Registration::new("Abrigo Esperança", "abrigo@example.org", "pw", UserRole::Shelter);

        let first = auth.register(&registration).await.unwrap();
        let second = auth.register(&registration).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.role, UserRole::Shelter);
        assert_eq!(first.location.as_deref(), Some("São Paulo, SP"));
    }
}
