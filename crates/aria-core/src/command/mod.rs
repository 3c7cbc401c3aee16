//! Command channel module.
//!
//! The command channel serializes user intents into backend requests and
//! backend responses into transcript entries, one request per send action,
//! with no client-side retry or queueing.
//!
//! # Module Structure
//!
//! - `backend`: The `CommandBackend` trait and wire types
//! - `channel`: The submit round trip (`CommandChannel`)
//! - `status`: The system-info display state and its poll helper

mod backend;
mod channel;
mod status;

pub use backend::{CommandBackend, CommandReply, SystemInfo};
pub use channel::CommandChannel;
pub use status::{StatusPanel, SystemMonitor};
