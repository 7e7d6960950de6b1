//! Federated identity types.
//!
//! Three structurally different entry points (popup, embedded button,
//! redirect callback) collapse into the same small set of shapes defined
//! here, so callers never care which path produced a result.

use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::user::AuthenticatedUser;

/// Provider-confirmed profile of a federated identity that has no backing
/// account yet.
///
/// Held in memory only while the user picks a role; never written to durable
/// storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedProfile {
    /// Given name from the provider profile.
    pub first_name: String,
    /// Family name from the provider profile.
    pub last_name: String,
    /// Provider-verified email address.
    pub email: String,
    /// Stable identifier assigned by the identity provider.
    pub provider_id: String,
    /// Profile picture URL, when the provider shares one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Whether the provider attests the email as verified.
    #[serde(default)]
    pub verified: bool,
}

/// Backend decision for a provider-verified identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokerDecision {
    /// An account exists; the backend issued a session.
    Established(Session),
    /// New identity with no account; a role must be chosen before one is
    /// created.
    RoleRequired(FederatedProfile),
}

/// What a federated sign-in entry point reports to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FederatedOutcome {
    /// A session was established and persisted.
    SessionEstablished(AuthenticatedUser),
    /// The identity is new; the pending-registration resolver now holds the
    /// profile and the UI should collect a role.
    RoleSelectionRequired,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_profile_deserializes_from_broker_payload() {
        let json = r#"{
            "firstName": "Grace",
            "lastName": "Ingabire",
            "email": "grace@example.com",
            "providerId": "109-aa-77",
            "verified": true
        }"#;

        let profile: FederatedProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.email, "grace@example.com");
        assert_eq!(profile.avatar, None);
        assert!(profile.verified);
    }
}
