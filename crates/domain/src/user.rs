//! User account types and the role enumeration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role, fixed at registration time.
///
/// Role changes after creation go through the profile-update path on the
/// backend, never through this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Platform administrator.
    Admin,
    /// Coaching-side teacher account.
    Teacher,
    /// Coaching-side student account.
    Student,
    /// Established professional profile.
    Professional,
    /// Company account posting jobs.
    Employer,
    /// Candidate account applying to jobs.
    JobSeeker,
}

impl UserRole {
    /// Every role the backend accepts, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Admin,
        Self::Teacher,
        Self::Student,
        Self::Professional,
        Self::Employer,
        Self::JobSeeker,
    ];

    /// Wire representation used by the REST API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Professional => "professional",
            Self::Employer => "employer",
            Self::JobSeeker => "job_seeker",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Error returned when parsing a role string the backend does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// An authenticated user record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// Backend account identifier.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email, unique per account.
    pub email: String,
    /// Account role.
    pub role: UserRole,
    /// Company name, set for employer accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Job title, set for professional accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Whether the account is active (deactivated accounts cannot sign in).
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last modified.
    pub updated_at: DateTime<Utc>,
}

const fn default_active() -> bool {
    true
}

impl AuthenticatedUser {
    /// Display name assembled from the name parts.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for credential-based account creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
    /// Plain password, transported over TLS and hashed backend-side.
    pub password: String,
    /// Requested account role.
    pub role: UserRole,
    /// Company name for employer registrations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Job title for professional registrations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

/// Partial profile patch; `None` fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New company name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// New job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

impl ProfileUpdate {
    /// Returns true if the patch would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.company.is_none()
            && self.job_title.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_role_wire_format_is_snake_case() {
        let json = serde_json::to_string(&UserRole::JobSeeker).unwrap();
        assert_eq!(json, "\"job_seeker\"");

        let parsed: UserRole = serde_json::from_str("\"employer\"").unwrap();
        assert_eq!(parsed, UserRole::Employer);
    }

    #[test]
    fn test_role_round_trips_through_from_str() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
        }
        assert!("recruiter".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_user_deserializes_from_backend_camel_case() {
        let json = r#"{
            "id": "8f9f2c5e-6a3b-4f0d-9a1e-2b7c8d9e0f11",
            "firstName": "Aline",
            "lastName": "Uwase",
            "email": "aline@example.com",
            "role": "employer",
            "company": "Acme Ltd",
            "isActive": true,
            "createdAt": "2024-03-01T08:30:00Z",
            "updatedAt": "2024-03-02T10:00:00Z"
        }"#;

        let user: AuthenticatedUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, UserRole::Employer);
        assert_eq!(user.company.as_deref(), Some("Acme Ltd"));
        assert_eq!(user.job_title, None);
        assert_eq!(user.full_name(), "Aline Uwase");
    }

    #[test]
    fn test_missing_active_flag_defaults_to_true() {
        let json = r#"{
            "id": "8f9f2c5e-6a3b-4f0d-9a1e-2b7c8d9e0f11",
            "firstName": "Eric",
            "lastName": "Mugisha",
            "email": "eric@example.com",
            "role": "job_seeker",
            "createdAt": "2024-03-01T08:30:00Z",
            "updatedAt": "2024-03-01T08:30:00Z"
        }"#;

        let user: AuthenticatedUser = serde_json::from_str(json).unwrap();
        assert!(user.is_active);
    }

    #[test]
    fn test_empty_patch_is_detected() {
        assert!(ProfileUpdate::default().is_empty());
        let patch = ProfileUpdate {
            job_title: Some("Backend Engineer".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(!patch.is_empty());
    }
}
