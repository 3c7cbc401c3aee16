//! The transcript and its pending placeholders.

use serde::{Deserialize, Serialize};

use super::message::Message;

/// Identifies one loading placeholder.
///
/// Each placeholder pairs only with its own originating request, never with
/// "the most recent placeholder", so concurrent requests resolving out of
/// order cannot remove each other's entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingId(u64);

/// One slot in the transcript: a real message or a loading placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TranscriptItem {
    Message(Message),
    Pending { id: PendingId },
}

/// The ordered chat history.
///
/// Append-only during a session; cleared wholesale only by an explicit user
/// action. Insertion order is the only ordering guarantee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    items: Vec<TranscriptItem>,
    next_pending: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message.
    pub fn push(&mut self, message: Message) {
        self.items.push(TranscriptItem::Message(message));
    }

    /// Appends a loading placeholder and returns its id.
    pub fn begin_pending(&mut self) -> PendingId {
        let id = PendingId(self.next_pending);
        self.next_pending += 1;
        self.items.push(TranscriptItem::Pending { id });
        id
    }

    /// Removes the placeholder with the given id and appends the message.
    ///
    /// A placeholder never outlives its originating request: this is called
    /// on both the success and the failure path. If the transcript was
    /// cleared while the request was in flight the placeholder is already
    /// gone and only the append happens.
    pub fn resolve_pending(&mut self, id: PendingId, message: Message) {
        self.items
            .retain(|item| !matches!(item, TranscriptItem::Pending { id: pending } if *pending == id));
        self.items.push(TranscriptItem::Message(message));
    }

    /// Clears the whole transcript.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[TranscriptItem] {
        &self.items
    }

    /// Iterates over resolved messages, skipping placeholders.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.items.iter().filter_map(|item| match item {
            TranscriptItem::Message(message) => Some(message),
            TranscriptItem::Pending { .. } => None,
        })
    }

    /// Number of unresolved placeholders.
    pub fn pending_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, TranscriptItem::Pending { .. }))
            .count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::message::{MessageKind, Sender};

    #[test]
    fn arrival_order_is_preserved() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("one"));
        transcript.push(Message::ai(MessageKind::Text, "two"));

        let texts: Vec<_> = transcript.messages().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two"]);
    }

    #[test]
    fn resolve_removes_only_the_matching_placeholder() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("first"));
        let first = transcript.begin_pending();
        transcript.push(Message::user("second"));
        let second = transcript.begin_pending();
        assert_eq!(transcript.pending_count(), 2);

        // The second request completes before the first.
        transcript.resolve_pending(second, Message::ai(MessageKind::Text, "reply two"));
        assert_eq!(transcript.pending_count(), 1);

        transcript.resolve_pending(first, Message::ai(MessageKind::Text, "reply one"));
        assert_eq!(transcript.pending_count(), 0);

        let texts: Vec<_> = transcript.messages().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["first", "second", "reply two", "reply one"]);
    }

    #[test]
    fn resolve_after_clear_still_appends() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("hello"));
        let pending = transcript.begin_pending();
        transcript.clear();
        assert!(transcript.is_empty());

        transcript.resolve_pending(pending, Message::ai(MessageKind::Text, "late reply"));
        assert_eq!(transcript.pending_count(), 0);
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages().next().unwrap().sender, Sender::Ai);
    }
}
