//! Federated sign-in entry points.
//!
//! Three structurally different flows - consent popup, embedded button for
//! mobile browsers, and redirect callback - funnel into one decision handler
//! so the caller sees a single result shape regardless of how the user got
//! here.

use std::sync::Arc;

use exjobnet_domain::{
    AuthError, AuthResult, BrokerDecision, FederatedOutcome, SessionMarkers,
};
use url::Url;

use crate::auth::{PendingRegistrationResolver, SessionStore};
use crate::ports::{IdentityBrokerService, IdentityProviderClient};

/// Suffix every client id issued by the provider carries.
const CLIENT_ID_SUFFIX: &str = ".apps.googleusercontent.com";

/// Minimum plausible client id length, suffix included.
const CLIENT_ID_MIN_LEN: usize = 20;

/// Static federated sign-in configuration, validated before any flow runs.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// OAuth client id registered with the identity provider.
    pub client_id: String,
    /// Origin the page is served from, e.g. `https://exjobnet.com`.
    pub origin: String,
    /// Origins registered with the provider for this client id. Empty means
    /// "not checked client-side".
    pub allowed_origins: Vec<String>,
}

impl BrokerConfig {
    /// Creates a config that skips the client-side origin check.
    #[must_use]
    pub fn new(client_id: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            origin: origin.into(),
            allowed_origins: Vec::new(),
        }
    }

    /// Restricts the config to the given registered origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// Checks the configuration the way the provider will.
    ///
    /// A bad client id or an unregistered origin would otherwise surface as
    /// free-text provider failures mid-flow; validating up front turns them
    /// into structured errors before any provider interaction.
    ///
    /// # Errors
    /// `MissingClientId`, `InvalidClientId` or `OriginMismatch`.
    pub fn validate(&self) -> AuthResult<()> {
        if self.client_id.is_empty() {
            return Err(AuthError::MissingClientId);
        }
        if !self.client_id.ends_with(CLIENT_ID_SUFFIX)
            || self.client_id.len() <= CLIENT_ID_MIN_LEN
        {
            return Err(AuthError::InvalidClientId {
                client_id: self.client_id.clone(),
            });
        }
        if !self.allowed_origins.is_empty() && !self.allowed_origins.contains(&self.origin) {
            return Err(AuthError::OriginMismatch {
                origin: self.origin.clone(),
            });
        }
        Ok(())
    }
}

/// Owns all interaction with the third-party identity provider.
///
/// Every flow resolves to the same [`FederatedOutcome`]: either a persisted
/// session, or "pick a role" with the profile parked in the
/// [`PendingRegistrationResolver`].
pub struct FederatedIdentityBroker {
    provider: Arc<dyn IdentityProviderClient>,
    exchange: Arc<dyn IdentityBrokerService>,
    store: Arc<SessionStore>,
    resolver: Arc<PendingRegistrationResolver>,
    config: BrokerConfig,
}

impl FederatedIdentityBroker {
    /// Creates a broker over the provider widget, the backend exchange
    /// endpoint, the session store and the pending-registration resolver.
    #[must_use]
    pub fn new(
        provider: Arc<dyn IdentityProviderClient>,
        exchange: Arc<dyn IdentityBrokerService>,
        store: Arc<SessionStore>,
        resolver: Arc<PendingRegistrationResolver>,
        config: BrokerConfig,
    ) -> Self {
        Self {
            provider,
            exchange,
            store,
            resolver,
            config,
        }
    }

    /// Popup flow: opens the provider's consent UI and resolves when the
    /// user completes or cancels.
    ///
    /// # Errors
    /// Configuration errors before any provider interaction; `Cancelled`,
    /// `PopupBlocked`, `ScriptLoadFailed`, `ProviderUnavailable` or
    /// `Network` from the flow itself. Each is a distinct variant so the UI
    /// can word its guidance per cause.
    pub async fn sign_in(&self) -> AuthResult<FederatedOutcome> {
        let _loading = self.store.begin_loading();
        self.config.validate()?;
        self.provider.ensure_loaded().await?;
        let assertion = self.provider.prompt_popup().await?;
        let decision = self.exchange.exchange_assertion(&assertion).await?;
        self.settle(decision).await
    }

    /// Mobile-button flow: renders the provider's interactive element into
    /// `container` instead of opening a popup, then proceeds exactly like
    /// [`Self::sign_in`].
    ///
    /// # Errors
    /// Same taxonomy as [`Self::sign_in`].
    pub async fn sign_in_mobile(&self, container: &str) -> AuthResult<FederatedOutcome> {
        let _loading = self.store.begin_loading();
        self.config.validate()?;
        self.provider.ensure_loaded().await?;
        let assertion = self.provider.render_button(container).await?;
        let decision = self.exchange.exchange_assertion(&assertion).await?;
        self.settle(decision).await
    }

    /// Redirect-callback flow, invoked unconditionally on page mount.
    ///
    /// Returns `Ok(None)` without touching anything unless the URL carries
    /// **both** `code` and `state` - an ordinary page load is not a callback
    /// and not an error. Repeated mounts of a consumed callback are safe
    /// because the backend rejects a replayed code.
    ///
    /// # Errors
    /// Exchange failures, with the same taxonomy as [`Self::sign_in`].
    pub async fn handle_oauth_callback(&self, url: &Url) -> AuthResult<Option<FederatedOutcome>> {
        let Some((code, state)) = Self::callback_params(url) else {
            return Ok(None);
        };

        let _loading = self.store.begin_loading();
        let decision = self.exchange.exchange_code(&code, &state).await?;
        self.settle(decision).await.map(Some)
    }

    /// Extracts the `code`/`state` pair; `None` unless both are present.
    fn callback_params(url: &Url) -> Option<(String, String)> {
        let mut code = None;
        let mut state = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                _ => {}
            }
        }
        Some((code?, state?))
    }

    /// Identical decision handling for all three flows.
    async fn settle(&self, decision: BrokerDecision) -> AuthResult<FederatedOutcome> {
        match decision {
            BrokerDecision::Established(session) => {
                let user = session.user.clone();
                self.store
                    .establish(session, SessionMarkers::federated())
                    .await?;
                tracing::debug!(role = %user.role, "federated session established");
                Ok(FederatedOutcome::SessionEstablished(user))
            }
            BrokerDecision::RoleRequired(profile) => {
                // No session exists until the resolver finalizes.
                self.resolver.stash(profile);
                Ok(FederatedOutcome::RoleSelectionRequired)
            }
        }
    }
}
