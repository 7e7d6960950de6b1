//! The authentication error vocabulary.
//!
//! Every sign-in entry point and session operation reports failures from this
//! one enumeration so the UI can branch on structure instead of matching
//! substrings of provider prose.

use thiserror::Error;

/// Errors surfaced by the authentication and session core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The backend rejected the supplied credentials.
    ///
    /// The message is the backend's own text, passed through verbatim so the
    /// login form can render provider-specific guidance.
    #[error("{message}")]
    Credentials {
        /// Backend error text.
        message: String,
        /// Optional backend hint rendered under the form field.
        suggestion: Option<String>,
    },

    /// The user closed or declined the identity provider's consent UI.
    #[error("Sign-in was cancelled")]
    Cancelled,

    /// No federated client id is configured.
    #[error("Identity provider client id is not configured")]
    MissingClientId,

    /// The configured client id is not in the provider's expected format.
    #[error("Identity provider client id is invalid: {client_id}")]
    InvalidClientId {
        /// The rejected client id.
        client_id: String,
    },

    /// The current origin is not authorized for the configured client id.
    #[error("Origin {origin} is not authorized for this client id")]
    OriginMismatch {
        /// The origin the page is served from.
        origin: String,
    },

    /// The browser refused to open the provider popup.
    #[error("Popup was blocked. Allow popups for this site and try again")]
    PopupBlocked,

    /// The identity provider script never became available.
    #[error("Identity provider failed to load. Check your connection and refresh")]
    ScriptLoadFailed,

    /// The identity provider answered with an error or timed out.
    #[error("Identity provider is unavailable: {message}")]
    ProviderUnavailable {
        /// Provider-reported detail.
        message: String,
    },

    /// Account finalization for a federated identity was rejected.
    ///
    /// The pending registration data is kept so the user can retry.
    #[error("{message}")]
    RegistrationConflict {
        /// Backend rejection text, e.g. a duplicate-email notice.
        message: String,
    },

    /// Durable session storage could not be read back.
    ///
    /// Never rendered to the user; the store wipes storage and falls back to
    /// the signed-out state.
    #[error("Session storage is corrupted: {message}")]
    StorageCorrupted {
        /// Underlying storage failure.
        message: String,
    },

    /// A network-level failure talking to the backend.
    #[error("Network error: {message}")]
    Network {
        /// Transport error detail.
        message: String,
    },

    /// Any other backend failure.
    #[error("{message}")]
    Backend {
        /// Backend error text.
        message: String,
    },
}

/// Result alias for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Coarse classification of an [`AuthError`], matching how the UI reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Wrong email or password; the user retries.
    Credentials,
    /// The user backed out; silent retry is fine.
    Cancelled,
    /// Operator-side misconfiguration; retrying will not help.
    Configuration,
    /// Browser or provider environment problem; user action can fix it.
    Environment,
    /// Finalization rejected; retry with different input.
    Conflict,
    /// Restoration-time storage failure; handled internally.
    Storage,
    /// Transport failure.
    Network,
}

impl AuthError {
    /// Classifies the error for UI handling.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Credentials { .. } => ErrorClass::Credentials,
            Self::Cancelled => ErrorClass::Cancelled,
            Self::MissingClientId
            | Self::InvalidClientId { .. }
            | Self::OriginMismatch { .. } => ErrorClass::Configuration,
            Self::PopupBlocked | Self::ScriptLoadFailed | Self::ProviderUnavailable { .. } => {
                ErrorClass::Environment
            }
            Self::RegistrationConflict { .. } => ErrorClass::Conflict,
            Self::StorageCorrupted { .. } => ErrorClass::Storage,
            Self::Network { .. } | Self::Backend { .. } => ErrorClass::Network,
        }
    }

    /// Whether the user can recover without operator intervention.
    ///
    /// Configuration failures need a deployment fix; storage corruption is
    /// resolved internally and never shown.
    #[must_use]
    pub const fn user_recoverable(&self) -> bool {
        !matches!(
            self.class(),
            ErrorClass::Configuration | ErrorClass::Storage
        )
    }

    /// Convenience constructor for backend rejection text.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }
}
