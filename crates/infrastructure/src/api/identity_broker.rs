//! Federated exchange API client over HTTP.

use async_trait::async_trait;
use exjobnet_application::ports::IdentityBrokerService;
use exjobnet_domain::{AuthError, AuthResult, BrokerDecision};
use serde_json::json;
use url::Url;

use super::types::{decision_from_exchange, Envelope, ExchangePayload};

/// Platform tag sent with every exchange so the backend can route the
/// decision to the right product surface.
const PLATFORM: &str = "job-portal";

const EXCHANGE_PATH: &str = "auth/google/exchange-code";

/// [`IdentityBrokerService`] implementation backed by the ExJobNet REST
/// API. Assertions and redirect codes go to the same endpoint and come
/// back as the same decision payload.
pub struct HttpIdentityBroker {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpIdentityBroker {
    /// Creates a broker client for the API rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url,
        }
    }

    /// Creates a broker client reusing an existing connection pool.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    async fn exchange(&self, body: &serde_json::Value) -> AuthResult<BrokerDecision> {
        let url = self
            .base_url
            .join(EXCHANGE_PATH)
            .map_err(|e| AuthError::backend(format!("invalid endpoint {EXCHANGE_PATH}: {e}")))?;
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::network(e.to_string()))?;
        let envelope = response
            .json::<Envelope<ExchangePayload>>()
            .await
            .map_err(|e| AuthError::network(format!("malformed response: {e}")))?;
        match envelope.data {
            Some(payload) if envelope.success => decision_from_exchange(payload),
            _ => Err(envelope.into_error()),
        }
    }
}

impl std::fmt::Debug for HttpIdentityBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpIdentityBroker")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IdentityBrokerService for HttpIdentityBroker {
    async fn exchange_assertion(&self, assertion: &str) -> AuthResult<BrokerDecision> {
        self.exchange(&json!({
            "idToken": assertion,
            "platform": PLATFORM,
        }))
        .await
    }

    async fn exchange_code(&self, code: &str, state: &str) -> AuthResult<BrokerDecision> {
        self.exchange(&json!({
            "code": code,
            "state": state,
            "platform": PLATFORM,
        }))
        .await
    }
}
