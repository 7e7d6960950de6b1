//! Backend API clients.

mod credential_service;
mod identity_broker;
mod types;

pub use credential_service::HttpCredentialService;
pub use identity_broker::HttpIdentityBroker;
