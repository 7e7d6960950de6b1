//! Authentication components.
//!
//! This module wires the sign-in entry points, the pending-registration
//! resolver, the session store and renewer, and the access guard. All of
//! them share one [`SessionStore`], which is the only writer of durable
//! storage.

mod broker;
mod credential;
mod guard;
mod pending;
mod renewal;
mod session;

#[cfg(test)]
pub(crate) mod support;

pub use broker::{BrokerConfig, FederatedIdentityBroker};
pub use credential::CredentialAuthenticator;
pub use guard::{AccessGuard, RouteDecision};
pub use pending::PendingRegistrationResolver;
pub use renewal::{ActivitySignal, SessionRenewer};
pub use session::{keys, LoadingGuard, SessionStore};
