//! Aria domain layer.
//!
//! Two cooperating components make up the client: the session gate, which
//! owns authentication state and screen visibility, and the command channel,
//! which owns the chat transcript and the request/response cycle to the
//! backend. They share no mutable state; the gate's visibility decision is a
//! precondition the user experiences before the command channel becomes
//! reachable.
//!
//! All I/O goes through the trait seams in [`auth`], [`command`], and
//! [`config`]; implementations live in `aria-client`.

pub mod auth;
pub mod command;
pub mod config;
pub mod error;
pub mod session;
pub mod transcript;

// Re-export common error types
pub use error::{AriaError, AuthError, Result};
