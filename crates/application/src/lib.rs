//! ExJobNet Application - Authentication and session lifecycle core
//!
//! This crate holds the five components that make up the sign-in core of the
//! job portal, and the ports they depend on:
//!
//! - [`CredentialAuthenticator`] - password login, registration, reset
//! - [`FederatedIdentityBroker`] - popup, embedded-button and redirect flows
//! - [`PendingRegistrationResolver`] - role selection for first-time
//!   federated signers
//! - [`SessionStore`] and [`SessionRenewer`] - durable session state and
//!   activity-based renewal
//! - [`AccessGuard`] - synchronous authentication/role predicates
//!
//! All external collaborators (backend API, identity provider widget,
//! durable storage, wall clock) are injected through the traits in
//! [`ports`]; nothing here performs I/O of its own.

pub mod auth;
pub mod ports;

pub use auth::{
    AccessGuard, ActivitySignal, BrokerConfig, CredentialAuthenticator, FederatedIdentityBroker,
    PendingRegistrationResolver, RouteDecision, SessionRenewer, SessionStore,
};
pub use ports::{
    Clock, CredentialService, IdentityBrokerService, IdentityProviderClient, SessionStorage,
    StorageError,
};
