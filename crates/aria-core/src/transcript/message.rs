//! Chat message types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed by the user.
    User,
    /// Produced by the assistant side, including synthesized errors.
    Ai,
}

/// The kind of a message.
///
/// The backend's `type` field is open-ended (`"diagnostics"`, `"joke"`,
/// `"network"`, ...), so unknown kinds round-trip as strings instead of
/// being forced into a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageKind {
    /// Plain chat text.
    Text,
    /// System-side notice (voice mode toggles, join/leave style notes).
    System,
    /// A failure surfaced to the user.
    Error,
    /// Any backend-supplied kind outside the fixed set.
    Other(String),
}

impl MessageKind {
    pub fn as_str(&self) -> &str {
        match self {
            MessageKind::Text => "text",
            MessageKind::System => "system",
            MessageKind::Error => "error",
            MessageKind::Other(kind) => kind,
        }
    }
}

impl From<String> for MessageKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "text" => MessageKind::Text,
            "system" => MessageKind::System,
            "error" => MessageKind::Error,
            _ => MessageKind::Other(kind),
        }
    }
}

impl From<MessageKind> for String {
    fn from(kind: MessageKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced the message.
    pub sender: Sender,
    /// The kind of the message.
    pub kind: MessageKind,
    /// The message text.
    pub text: String,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl Message {
    fn new(sender: Sender, kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            sender,
            kind,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// A user-typed chat message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, MessageKind::Text, text)
    }

    /// An assistant message of the given kind.
    pub fn ai(kind: MessageKind, text: impl Into<String>) -> Self {
        Self::new(Sender::Ai, kind, text)
    }

    /// A system notice, rendered on the assistant side.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Sender::Ai, MessageKind::System, text)
    }

    /// A synthesized failure message.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Sender::Ai, MessageKind::Error, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_unknown_strings() {
        let kind: MessageKind = serde_json::from_str("\"diagnostics\"").unwrap();
        assert_eq!(kind, MessageKind::Other("diagnostics".to_string()));
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"diagnostics\"");

        let kind: MessageKind = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(kind, MessageKind::Text);
    }

    #[test]
    fn constructors_set_sender_and_kind() {
        assert_eq!(Message::user("hi").sender, Sender::User);
        assert_eq!(Message::error("bad").kind, MessageKind::Error);
        assert_eq!(Message::system("note").sender, Sender::Ai);
    }
}
