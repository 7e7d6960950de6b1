//! Session types.

use serde::{Deserialize, Serialize};

use crate::user::AuthenticatedUser;

/// Proof of identity for the current client: a bearer token paired with the
/// user it authenticates.
///
/// The pair is created and destroyed together; nothing in the core can hold
/// a token without its user or vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer credential issued by the backend.
    pub token: String,
    /// The authenticated user record.
    pub user: AuthenticatedUser,
}

impl Session {
    /// Creates a session from a freshly issued token and user record.
    #[must_use]
    pub const fn new(token: String, user: AuthenticatedUser) -> Self {
        Self { token, user }
    }
}

/// How the current session was established, recorded durably at login time.
///
/// Activity-based renewal only runs when both flags are set; plain credential
/// sessions are never silently extended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionMarkers {
    /// The session came from a federated sign-in flow.
    pub federated: bool,
    /// The session should be kept alive by user activity.
    pub persistent: bool,
}

impl SessionMarkers {
    /// Markers for a plain credential login.
    #[must_use]
    pub const fn credential() -> Self {
        Self {
            federated: false,
            persistent: false,
        }
    }

    /// Markers for a federated sign-in, which is always long-lived.
    #[must_use]
    pub const fn federated() -> Self {
        Self {
            federated: true,
            persistent: true,
        }
    }

    /// Whether this session qualifies for activity-based renewal.
    #[must_use]
    pub const fn renewable(self) -> bool {
        self.federated && self.persistent
    }
}
