//! Chat transcript module.
//!
//! The transcript is the ordered chat history: append-only during a session,
//! cleared wholesale only by an explicit user action. Arrival order is the
//! only ordering guarantee.
//!
//! # Module Structure
//!
//! - `message`: Message types (`Message`, `MessageKind`, `Sender`)
//! - `model`: The transcript itself and its pending placeholders

mod message;
mod model;

pub use message::{Message, MessageKind, Sender};
pub use model::{PendingId, Transcript, TranscriptItem};
