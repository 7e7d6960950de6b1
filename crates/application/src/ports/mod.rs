//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the authentication core and external
//! systems. Each port is a trait implemented by an adapter in the
//! infrastructure layer (or by the embedding UI, for the provider widget).

mod clock;
mod credential_service;
mod identity_broker;
mod identity_provider;
mod storage;

pub use clock::Clock;
pub use credential_service::CredentialService;
pub use identity_broker::IdentityBrokerService;
pub use identity_provider::IdentityProviderClient;
pub use storage::{SessionStorage, StorageError};
