//! Identity provider boundary.
//!
//! Aria never talks to the identity service directly from the domain layer;
//! everything goes through the [`AuthProvider`] trait. Implementations live in
//! `aria-client`.
//!
//! # Module Structure
//!
//! - `model`: Identity and federated-flow types (`Identity`, `FederatedIntent`)
//! - `provider`: The `AuthProvider` trait and its wire-level error type

mod model;
mod provider;

pub use model::{FederatedIntent, Identity};
pub use provider::{AuthProvider, ProviderError, ProviderErrorCode};
