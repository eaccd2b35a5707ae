//! Session persistence through the file-backed store.

mod common;

use std::path::PathBuf;
use std::sync::Arc;

use foodshare_core::domains::auth::{
    FileSessionStore, ProfileUpdate, Registration, Session, SessionStore, UserRole, SESSION_KEY,
};
use foodshare_core::kernel::{MockAuthService, TestDependencies};
use foodshare_core::FoodShareError;
use uuid::Uuid;

use crate::common::TestHarness;

/// Unique scratch directory under the OS temp dir.
fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("foodshare-session-{}", Uuid::new_v4()))
}

fn file_store(dir: &PathBuf) -> Arc<dyn SessionStore> {
    Arc::new(FileSessionStore::new(dir.clone()))
}

#[tokio::test]
async fn login_survives_restart() {
    let dir = scratch_dir();
    let auth = MockAuthService::new();

    let mut session = Session::restore(file_store(&dir)).unwrap();
    assert!(!session.is_signed_in());
    session
        .login(&auth, "joao@example.com", "secret")
        .await
        .unwrap();

    assert!(dir.join(format!("{}.json", SESSION_KEY)).exists());

    let restored = Session::restore(file_store(&dir)).unwrap();
    let user = restored.require_user().unwrap();
    assert_eq!(user.id, MockAuthService::DEMO_MEMBER_ID);
    assert_eq!(user.email, "joao@example.com");

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn logout_removes_the_record() {
    let dir = scratch_dir();
    let auth = MockAuthService::new();

    let mut session = Session::restore(file_store(&dir)).unwrap();
    session
        .register(
            &auth,
            Registration::new("Abrigo Esperança", "abrigo@example.org", "pw", UserRole::Shelter),
        )
        .await
        .unwrap();
    session.logout().unwrap();

    assert!(!dir.join(format!("{}.json", SESSION_KEY)).exists());
    assert!(!Session::restore(file_store(&dir)).unwrap().is_signed_in());

    // Logging out twice is harmless
    session.logout().unwrap();

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn corrupt_record_on_disk_starts_signed_out() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{}.json", SESSION_KEY));
    std::fs::write(&path, "{\"id\": 42").unwrap();

    let session = Session::restore(file_store(&dir)).unwrap();

    assert!(!session.is_signed_in());
    assert!(!path.exists());

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn profile_update_is_persisted() {
    let mut harness = TestHarness::with_deps(TestDependencies::new());
    harness.login_as_donor().await.unwrap();

    let update = ProfileUpdate {
        name: Some("João P. Silva".to_string()),
        location: Some("Campinas, SP".to_string()),
        phone: Some("(19) 3333-4444".to_string()),
        ..ProfileUpdate::default()
    };
    harness
        .session
        .update_profile(harness.kernel.auth.as_ref(), update)
        .await
        .unwrap();

    let store: Arc<dyn SessionStore> = harness.deps.session_store.clone();
    let restored = Session::restore(store).unwrap();
    let user = restored.require_user().unwrap();
    assert_eq!(user.name, "João P. Silva");
    assert_eq!(user.location.as_deref(), Some("Campinas, SP"));
    assert_eq!(user.phone.as_deref(), Some("(19) 3333-4444"));
    assert_eq!(user.bio, None);
}

#[tokio::test]
async fn invalid_profile_update_keeps_the_old_record() {
    let mut harness = TestHarness::new();
    let before = harness.login_as_donor().await.unwrap();

    let update = ProfileUpdate {
        email: Some("not-an-email".to_string()),
        ..ProfileUpdate::default()
    };
    let result = harness
        .session
        .update_profile(harness.kernel.auth.as_ref(), update)
        .await;

    assert!(matches!(result, Err(FoodShareError::Validation(_))));
    assert_eq!(harness.session.user(), Some(&before));
}
