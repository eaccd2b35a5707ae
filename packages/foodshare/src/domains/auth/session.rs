//! The signed-in member, persisted across restarts.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::models::{ProfileUpdate, Registration, User};
use super::store::SessionStore;
use crate::error::{FoodShareError, Result};
use crate::kernel::BaseAuthService;

/// Storage key of the session record.
pub const SESSION_KEY: &str = "foodshare_user";

/// Current member plus the store their record is written to.
///
/// Every successful login, registration or profile edit replaces the stored
/// record; logout removes it.
pub struct Session {
    store: Arc<dyn SessionStore>,
    user: Option<User>,
}

impl Session {
    /// Signed-out session that persists to `store`.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store, user: None }
    }

    /// Load whatever member was signed in last time.
    ///
    /// An unreadable record is discarded and the session starts signed out.
    pub fn restore(store: Arc<dyn SessionStore>) -> Result<Self> {
        let user = match store.load(SESSION_KEY)? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Discarding corrupt session record");
                    store.remove(SESSION_KEY)?;
                    None
                }
            },
            None => None,
        };
        Ok(Self { store, user })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// The signed-in member, or `AuthenticationRequired`.
    pub fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(FoodShareError::AuthenticationRequired)
    }

    #[instrument(skip(self, auth, password))]
    pub async fn login(
        &mut self,
        auth: &dyn BaseAuthService,
        email: &str,
        password: &str,
    ) -> Result<&User> {
        let user = auth.login(email, password).await?;
        self.replace(user)
    }

    #[instrument(skip(self, auth, registration), fields(email = %registration.email))]
    pub async fn register(
        &mut self,
        auth: &dyn BaseAuthService,
        registration: Registration,
    ) -> Result<&User> {
        let user = auth.register(&registration).await?;
        self.replace(user)
    }

    pub async fn update_profile(
        &mut self,
        auth: &dyn BaseAuthService,
        update: ProfileUpdate,
    ) -> Result<&User> {
        let current = self.require_user()?;
        let user = auth.update_profile(current, &update).await?;
        self.replace(user)
    }

    pub fn logout(&mut self) -> Result<()> {
        if let Some(user) = self.user.take() {
            info!(member_id = %user.id, "Member signed out");
        }
        self.store.remove(SESSION_KEY)
    }

    fn replace(&mut self, user: User) -> Result<&User> {
        let record = serde_json::to_string(&user)?;
        self.store.save(SESSION_KEY, &record)?;
        Ok(self.user.insert(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::models::UserRole;
    use crate::domains::auth::store::MemorySessionStore;
    use crate::kernel::MockAuthService;

    fn store() -> Arc<MemorySessionStore> {
        Arc::new(MemorySessionStore::new())
    }

    #[tokio::test]
    async fn test_login_persists_record() {
        let store = store();
        let mut session = Session::new(store.clone());
        let auth = MockAuthService::new();

        session
            .login(&auth, "joao@example.com", "secret")
            .await
            .unwrap();
        assert!(session.is_signed_in());

        let restored = Session::restore(store).unwrap();
        assert_eq!(restored.user(), session.user());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_state() {
        let mut session = Session::new(store());
        let auth = MockAuthService::new();

        assert!(session.login(&auth, "", "secret").await.is_err());
        assert!(!session.is_signed_in());
    }

    #[tokio::test]
    async fn test_logout_clears_store() {
        let store = store();
        let mut session = Session::new(store.clone());
        let auth = MockAuthService::new();
        session
            .login(&auth, "joao@example.com", "secret")
            .await
            .unwrap();

        session.logout().unwrap();

        assert!(!session.is_signed_in());
        assert!(store.is_empty());
        assert!(matches!(
            session.require_user(),
            Err(FoodShareError::AuthenticationRequired)
        ));
    }

    #[tokio::test]
    async fn test_register_signs_in_with_chosen_role() {
        let mut session = Session::new(store());
        let auth = MockAuthService::new();

        let user = session
            .register(
                &auth,
                Registration::new("Abrigo Esperança", "abrigo@example.org", "pw", UserRole::Shelter),
            )
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Shelter);
    }

    #[tokio::test]
    async fn test_update_profile_requires_sign_in() {
        let mut session = Session::new(store());
        let auth = MockAuthService::new();

        let result = session.update_profile(&auth, ProfileUpdate::default()).await;
        assert!(matches!(result, Err(FoodShareError::AuthenticationRequired)));
    }

    #[test]
    fn test_corrupt_record_is_discarded() {
        let store = store();
        store.save(SESSION_KEY, "{not json").unwrap();

        let session = Session::restore(store.clone()).unwrap();
        assert!(!session.is_signed_in());
        assert!(store.is_empty());
    }
}
