//! ExJobNet Domain - Core authentication types
//!
//! This crate defines the domain model for the ExJobNet authentication
//! and session core. All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod federated;
pub mod session;
pub mod user;

pub use error::{AuthError, AuthResult, ErrorClass};
pub use federated::{BrokerDecision, FederatedOutcome, FederatedProfile};
pub use session::{Session, SessionMarkers};
pub use user::{AuthenticatedUser, ProfileUpdate, RegistrationRequest, UserRole};
