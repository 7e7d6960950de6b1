//! Identity broker service port

use async_trait::async_trait;
use exjobnet_domain::{AuthResult, BrokerDecision};

/// Port for the backend federated-identity exchange endpoint.
///
/// The endpoint accepts either a provider assertion (popup or embedded
/// button) or a redirect `code`/`state` pair and answers with the same
/// decision shape for both: an established session, or a request to pick a
/// role for a brand-new identity.
#[async_trait]
pub trait IdentityBrokerService: Send + Sync {
    /// Exchanges a signed provider assertion obtained from the widget.
    ///
    /// # Errors
    /// Provider or backend failures mapped to the structured error
    /// vocabulary; never free-text classification.
    async fn exchange_assertion(&self, assertion: &str) -> AuthResult<BrokerDecision>;

    /// Exchanges a redirect-callback authorization code.
    ///
    /// Codes are single-use; the backend rejects replays, which is what
    /// makes repeated mount-time callback handling safe.
    ///
    /// # Errors
    /// Same failure space as [`Self::exchange_assertion`].
    async fn exchange_code(&self, code: &str, state: &str) -> AuthResult<BrokerDecision>;
}
