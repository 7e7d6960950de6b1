//! Credential service port

use async_trait::async_trait;
use exjobnet_domain::{
    AuthResult, AuthenticatedUser, FederatedProfile, ProfileUpdate, RegistrationRequest, Session,
    UserRole,
};

/// Port for the backend credential and account API.
///
/// Implementations talk to the remote auth endpoints; the core treats the
/// backend as a black box that returns sessions and user records or fails
/// with a typed [`AuthError`](exjobnet_domain::AuthError).
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Authenticates with email and password.
    ///
    /// # Errors
    /// `Credentials` when the backend rejects the pair; the message (and
    /// optional suggestion) are the backend's own text.
    async fn login(&self, email: &str, password: &str) -> AuthResult<Session>;

    /// Creates a new account and signs it in.
    ///
    /// # Errors
    /// Backend rejection text is passed through verbatim.
    async fn register(&self, request: &RegistrationRequest) -> AuthResult<Session>;

    /// Requests a password-reset email. Fire-and-forget; no session data.
    ///
    /// # Errors
    /// Returns an error if the backend refuses the request.
    async fn forgot_password(&self, email: &str) -> AuthResult<()>;

    /// Asks the backend to invalidate a token.
    ///
    /// # Errors
    /// Returns an error if the backend is unreachable; callers are expected
    /// to treat logout as locally successful regardless.
    async fn logout(&self, token: &str) -> AuthResult<()>;

    /// Applies a profile patch and returns the updated user record.
    ///
    /// # Errors
    /// Backend rejection is propagated verbatim.
    async fn update_profile(
        &self,
        token: &str,
        patch: &ProfileUpdate,
    ) -> AuthResult<AuthenticatedUser>;

    /// Finalizes a federated identity by creating the account with the
    /// chosen role; the response is a full session, exactly like login.
    ///
    /// # Errors
    /// `RegistrationConflict` when the account cannot be created (for
    /// example a duplicate email).
    async fn complete_registration(
        &self,
        profile: &FederatedProfile,
        role: UserRole,
    ) -> AuthResult<Session>;
}
