//! Role selection for first-time federated signers.

use std::sync::{Arc, PoisonError, RwLock};

use exjobnet_domain::{
    AuthError, AuthResult, AuthenticatedUser, FederatedProfile, SessionMarkers, UserRole,
};

use crate::auth::SessionStore;
use crate::ports::CredentialService;

/// Holds a provider-confirmed profile while the user picks a role, and
/// finalizes account creation once they have.
///
/// The profile lives in memory only - it is never written to durable
/// storage. It is destroyed by successful finalization or by dismissal;
/// a finalization failure keeps it so the user can retry.
pub struct PendingRegistrationResolver {
    service: Arc<dyn CredentialService>,
    store: Arc<SessionStore>,
    pending: RwLock<Option<FederatedProfile>>,
}

impl PendingRegistrationResolver {
    /// Creates a resolver over the backend service and session store.
    #[must_use]
    pub fn new(service: Arc<dyn CredentialService>, store: Arc<SessionStore>) -> Self {
        Self {
            service,
            store,
            pending: RwLock::new(None),
        }
    }

    /// Parks a profile reported as "new identity, no account".
    pub fn stash(&self, profile: FederatedProfile) {
        *self
            .pending
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(profile);
    }

    /// The profile currently awaiting a role, if any.
    #[must_use]
    pub fn pending(&self) -> Option<FederatedProfile> {
        self.pending
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drops the pending profile; called when the role-selection modal is
    /// dismissed.
    pub fn dismiss(&self) {
        *self
            .pending
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Finalizes account creation with the chosen role and treats the
    /// response exactly like a successful login.
    ///
    /// The role is one of the closed enumeration; no other client-side
    /// validation happens here.
    ///
    /// # Errors
    /// The backend's rejection (for example a duplicate email) propagates
    /// verbatim, and the pending profile is retained so the user may retry
    /// with different input or cancel.
    pub async fn complete_registration(&self, role: UserRole) -> AuthResult<AuthenticatedUser> {
        let profile = self
            .pending()
            .ok_or_else(|| AuthError::backend("no federated registration is pending"))?;

        let _loading = self.store.begin_loading();
        let session = self.service.complete_registration(&profile, role).await?;

        let user = session.user.clone();
        self.store
            .establish(session, SessionMarkers::federated())
            .await?;
        self.dismiss();

        Ok(user)
    }
}
