//! Wire representations shared by the API clients.
//!
//! The backend wraps every response in a `success`/`data`/`error`
//! envelope. Failures additionally carry a machine-readable `code`
//! which is mapped onto [`AuthError`] here, so client code never
//! inspects error message text.

use exjobnet_domain::{
    AuthError, AuthResult, AuthenticatedUser, BrokerDecision, FederatedProfile, Session,
};
use serde::{Deserialize, Serialize};

/// Response envelope used by every backend endpoint.
///
/// `data` must not carry `#[serde(default)]`: that would make the derive
/// require `T: Default`, and an absent `Option` field deserializes as
/// `None` anyway.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl<T> Envelope<T> {
    /// Consumes a failed envelope into the matching [`AuthError`].
    pub(crate) fn into_error(self) -> AuthError {
        let message = self
            .error
            .unwrap_or_else(|| "request rejected by the server".to_owned());
        error_from_code(self.code.as_deref(), message, self.suggestion, self.detail)
    }
}

/// `{ user, token }` payload returned by login, registration and the
/// federated finalization endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct SessionPayload {
    pub user: AuthenticatedUser,
    pub token: String,
}

impl From<SessionPayload> for Session {
    fn from(payload: SessionPayload) -> Self {
        Self::new(payload.token, payload.user)
    }
}

/// `{ user }` payload returned by the profile update endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct UserPayload {
    pub user: AuthenticatedUser,
}

/// Payload of the federated assertion/code exchange endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExchangePayload {
    #[serde(default)]
    pub requires_role_selection: bool,
    #[serde(default)]
    pub user: Option<AuthenticatedUser>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub google_user_data: Option<GoogleUserData>,
}

/// Identity profile as the backend serializes it.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleUserData {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub google_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

impl From<GoogleUserData> for FederatedProfile {
    fn from(data: GoogleUserData) -> Self {
        Self {
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            provider_id: data.google_id,
            avatar: data.profile_picture,
            verified: data.verified,
        }
    }
}

impl From<&FederatedProfile> for GoogleUserData {
    fn from(profile: &FederatedProfile) -> Self {
        Self {
            email: profile.email.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            google_id: profile.provider_id.clone(),
            profile_picture: profile.avatar.clone(),
            verified: profile.verified,
        }
    }
}

/// Interprets a successful exchange payload as a broker decision.
pub(crate) fn decision_from_exchange(payload: ExchangePayload) -> AuthResult<BrokerDecision> {
    if payload.requires_role_selection {
        let profile = payload.google_user_data.ok_or_else(|| {
            AuthError::backend("role selection requested without an identity profile")
        })?;
        return Ok(BrokerDecision::RoleRequired(profile.into()));
    }
    match (payload.user, payload.token) {
        (Some(user), Some(token)) => Ok(BrokerDecision::Established(Session::new(token, user))),
        _ => Err(AuthError::backend(
            "exchange response carried neither a session nor a role request",
        )),
    }
}

/// Maps a backend error code onto the matching [`AuthError`] variant.
///
/// Unknown or absent codes fall through to [`AuthError::Backend`]. The
/// `invalid_client` and `unauthorized_origin` variants carry the offending
/// value itself, which the backend sends in `detail`; when `detail` is
/// absent there is no value to report and the prose stays a `Backend`
/// error rather than masquerading as one.
pub(crate) fn error_from_code(
    code: Option<&str>,
    message: String,
    suggestion: Option<String>,
    detail: Option<String>,
) -> AuthError {
    match (code, detail) {
        (Some("invalid_credentials"), _) => AuthError::Credentials {
            message,
            suggestion,
        },
        (Some("access_denied" | "popup_closed_by_user"), _) => AuthError::Cancelled,
        (Some("popup_blocked"), _) => AuthError::PopupBlocked,
        (Some("invalid_client"), Some(client_id)) => AuthError::InvalidClientId { client_id },
        (Some("unauthorized_origin" | "redirect_uri_mismatch"), Some(origin)) => {
            AuthError::OriginMismatch { origin }
        }
        (Some("server_error" | "temporarily_unavailable"), _) => {
            AuthError::ProviderUnavailable { message }
        }
        (Some("duplicate_account" | "email_exists"), _) => {
            AuthError::RegistrationConflict { message }
        }
        _ => AuthError::Backend { message },
    }
}
