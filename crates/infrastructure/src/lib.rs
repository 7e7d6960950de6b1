//! ExJobNet Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in the
//! application layer: the reqwest-backed backend API clients, durable
//! session storage, and the system clock.
//!
//! The identity provider widget itself has no adapter here - it runs in the
//! embedding UI process, which implements
//! [`IdentityProviderClient`](exjobnet_application::IdentityProviderClient)
//! over the real widget.

pub mod adapters;
pub mod api;
pub mod persistence;

pub use adapters::SystemClock;
pub use api::{HttpCredentialService, HttpIdentityBroker};
pub use persistence::{FileSessionStorage, MemorySessionStorage};
