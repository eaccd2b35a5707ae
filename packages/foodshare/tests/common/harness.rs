//! Test harness: a kernel on in-memory mocks plus a session sharing its store.

#![allow(dead_code)]

use anyhow::Result;
use foodshare_core::domains::auth::{Registration, Session, User};
use foodshare_core::kernel::{FoodShareKernel, TestDependencies};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct TestHarness {
    pub deps: TestDependencies,
    pub kernel: FoodShareKernel,
    pub session: Session,
    pub cancel: CancellationToken,
}

impl TestHarness {
    /// Seeded repository, nobody signed in.
    pub fn new() -> Self {
        Self::with_deps(TestDependencies::new())
    }

    pub fn with_deps(deps: TestDependencies) -> Self {
        let kernel = deps.kernel();
        let store: Arc<dyn foodshare_core::domains::auth::SessionStore> =
            deps.session_store.clone();
        Self {
            session: Session::new(store),
            kernel,
            deps,
            cancel: CancellationToken::new(),
        }
    }

    /// Sign in as the demo donor (member 1, owner of listing 1).
    pub async fn login_as_donor(&mut self) -> Result<User> {
        let user = self
            .session
            .login(self.kernel.auth.as_ref(), "joao@example.com", "secret")
            .await?;
        Ok(user.clone())
    }

    /// Register and sign in as `user`'s name and role.
    pub async fn login_as(&mut self, user: &User) -> Result<User> {
        let registration = Registration::new(
            user.name.clone(),
            user.email.clone(),
            "secret",
            user.role,
        );
        let signed_in = self
            .session
            .register(self.kernel.auth.as_ref(), registration)
            .await?;
        Ok(signed_in.clone())
    }
}
