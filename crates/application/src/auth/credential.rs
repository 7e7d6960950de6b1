//! Password-credential sign-in operations.

use std::sync::Arc;

use exjobnet_domain::{AuthResult, RegistrationRequest, SessionMarkers};

use crate::auth::SessionStore;
use crate::ports::CredentialService;

/// Thin wrapper over the remote credential endpoints.
///
/// Success paths store the session; failures are rethrown unmodified so the
/// login form can render the backend's own message and suggestion. No retry
/// is attempted here. Each operation raises the shared loading flag for its
/// duration; overlapping submissions are the UI's job to suppress.
pub struct CredentialAuthenticator {
    service: Arc<dyn CredentialService>,
    store: Arc<SessionStore>,
}

impl CredentialAuthenticator {
    /// Creates an authenticator over the backend service and session store.
    #[must_use]
    pub fn new(service: Arc<dyn CredentialService>, store: Arc<SessionStore>) -> Self {
        Self { service, store }
    }

    /// Signs in with email and password and stores the resulting session.
    ///
    /// # Errors
    /// The backend error passes through verbatim; nothing is stored on
    /// failure.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<()> {
        let _loading = self.store.begin_loading();
        let session = self.service.login(email, password).await?;
        self.store
            .establish(session, SessionMarkers::credential())
            .await
    }

    /// Creates an account and signs it in, with the same contract as
    /// [`Self::login`].
    ///
    /// # Errors
    /// The backend error passes through verbatim.
    pub async fn register(&self, request: &RegistrationRequest) -> AuthResult<()> {
        let _loading = self.store.begin_loading();
        let session = self.service.register(request).await?;
        self.store
            .establish(session, SessionMarkers::credential())
            .await
    }

    /// Requests a password-reset email. No session data comes back; the
    /// caller handles the post-request redirect.
    ///
    /// # Errors
    /// Returns an error if the backend refuses the request.
    pub async fn request_password_reset(&self, email: &str) -> AuthResult<()> {
        let _loading = self.store.begin_loading();
        self.service.forgot_password(email).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::super::support::{sample_session, MockClock, MockCredentialService, MockStorage};
    use super::*;
    use crate::auth::keys;
    use crate::ports::SessionStorage;
    use exjobnet_domain::{AuthError, UserRole};
    use pretty_assertions::assert_eq;

    struct Fixture {
        storage: Arc<MockStorage>,
        service: Arc<MockCredentialService>,
        store: Arc<SessionStore>,
        authenticator: CredentialAuthenticator,
    }

    fn fixture() -> Fixture {
        let storage = Arc::new(MockStorage::default());
        let service = Arc::new(MockCredentialService::default());
        let store = Arc::new(SessionStore::new(
            Arc::clone(&storage) as Arc<dyn crate::ports::SessionStorage>,
            Arc::clone(&service) as Arc<dyn CredentialService>,
            Arc::new(MockClock::default()),
        ));
        let authenticator = CredentialAuthenticator::new(
            Arc::clone(&service) as Arc<dyn CredentialService>,
            Arc::clone(&store),
        );
        Fixture {
            storage,
            service,
            store,
            authenticator,
        }
    }

    #[tokio::test]
    async fn test_login_success_stores_credential_session() {
        let f = fixture();
        f.service
            .set_login_response(Ok(sample_session(UserRole::JobSeeker, "t-login")))
            .await;

        f.authenticator.login("a@b.com", "secret").await.unwrap();

        assert!(f.store.is_authenticated());
        assert!(!f.store.markers().renewable());
        assert_eq!(
            f.storage.get(keys::TOKEN).await.unwrap().as_deref(),
            Some("t-login")
        );
    }

    #[tokio::test]
    async fn test_rejected_login_mutates_nothing() {
        let f = fixture();
        f.service
            .set_login_response(Err(AuthError::Credentials {
                message: "Invalid email or password".to_string(),
                suggestion: None,
            }))
            .await;

        let err = f.authenticator.login("a@b.com", "wrong").await.unwrap_err();

        assert_eq!(
            err,
            AuthError::Credentials {
                message: "Invalid email or password".to_string(),
                suggestion: None,
            }
        );
        assert!(!f.store.is_authenticated());
        assert_eq!(f.storage.write_count(), 0);
        assert!(!f.store.is_loading());
    }

    #[tokio::test]
    async fn test_register_behaves_like_login() {
        let f = fixture();
        f.service
            .set_register_response(Ok(sample_session(UserRole::Employer, "t-reg")))
            .await;

        let request = RegistrationRequest {
            first_name: "Aline".to_string(),
            last_name: "Uwase".to_string(),
            email: "aline@example.com".to_string(),
            password: "secret".to_string(),
            role: UserRole::Employer,
            company: Some("Acme Ltd".to_string()),
            job_title: None,
        };
        f.authenticator.register(&request).await.unwrap();

        assert!(f.store.is_authenticated());
        assert_eq!(f.store.current_user().unwrap().role, UserRole::Employer);
    }

    #[tokio::test]
    async fn test_password_reset_returns_no_session() {
        let f = fixture();

        f.authenticator
            .request_password_reset("a@b.com")
            .await
            .unwrap();

        assert!(!f.store.is_authenticated());
        assert_eq!(f.service.forgot_emails().await, vec!["a@b.com".to_string()]);
    }
}
