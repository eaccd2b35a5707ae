// Trait definitions for dependency injection
//
// These are the remote-call boundaries of the marketplace. Today every one of
// them is backed by an in-memory stub; a real HTTP client slots in behind the
// same trait. Business rules (who may reserve what) stay in domain actions.
//
// Naming convention: Base* for trait names (e.g., BaseDonationRepository)

use async_trait::async_trait;

use crate::common::{Coordinates, DonationId};
use crate::domains::auth::models::{ProfileUpdate, Registration, User};
use crate::domains::donations::models::{Donation, DonationFilter, DonationUpdate};
use crate::error::{FoodShareError, Result};

// =============================================================================
// Donation Repository Trait
// =============================================================================

/// Storage for donation listings.
///
/// Calls suspend the caller until the backend answers. Wrap them in
/// [`with_cancel`](super::with_cancel) to abandon a call when the viewer
/// navigates away.
#[async_trait]
pub trait BaseDonationRepository: Send + Sync {
    /// All listings, in publication order
    async fn list(&self) -> Result<Vec<Donation>>;

    async fn find_by_id(&self, id: DonationId) -> Result<Option<Donation>>;

    /// Store a newly published listing
    async fn create(&self, donation: Donation) -> Result<Donation>;

    /// Apply donor edits to a listing
    async fn update(&self, id: DonationId, update: DonationUpdate) -> Result<Donation>;

    /// Move an available listing to reserved, recording who holds it
    async fn reserve(&self, id: DonationId, reserved_by: &str) -> Result<Donation>;

    /// Move a reserved listing to collected
    async fn mark_collected(&self, id: DonationId) -> Result<Donation>;

    /// Fetch a listing, failing with `DonationNotFound` if it does not exist
    async fn get(&self, id: DonationId) -> Result<Donation> {
        self.find_by_id(id)
            .await?
            .ok_or(FoodShareError::DonationNotFound { id })
    }

    /// Listings matching a browse filter, in publication order
    async fn search(&self, filter: &DonationFilter) -> Result<Vec<Donation>> {
        let all = self.list().await?;
        Ok(all.into_iter().filter(|d| filter.matches(d)).collect())
    }
}

// =============================================================================
// Auth Service Trait
// =============================================================================

/// Account backend. Returns the member record to persist in the session.
#[async_trait]
pub trait BaseAuthService: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<User>;

    async fn register(&self, registration: &Registration) -> Result<User>;

    async fn update_profile(&self, user: &User, update: &ProfileUpdate) -> Result<User>;
}

// =============================================================================
// Location Provider Trait
// =============================================================================

/// Source of the viewer's current position (device geolocation).
#[async_trait]
pub trait BaseLocationProvider: Send + Sync {
    /// `Ok(None)` when no position is available; `Err` when the lookup failed
    /// outright (e.g. permission denied).
    async fn current_location(&self) -> Result<Option<Coordinates>>;
}
