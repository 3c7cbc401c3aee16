//! Aria infrastructure layer.
//!
//! Concrete implementations of the `aria-core` trait seams: the reqwest
//! backend client, the REST identity provider, and the TOML preference
//! repository.

pub mod backend_client;
pub mod preferences;
pub mod rest_auth_provider;

pub use crate::backend_client::BackendClient;
pub use crate::preferences::TomlPreferenceRepository;
pub use crate::rest_auth_provider::RestAuthProvider;
