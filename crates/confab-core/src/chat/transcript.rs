//! Append-only conversation history.

use confab_types::chat::ChatMessage;
use confab_types::llm::Message;

/// Ordered sequence of messages owned by one session.
///
/// Grows monotonically: there is no removal and no clear. Insertion order
/// is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the end of the conversation.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Messages appended at or after `cursor`.
    ///
    /// A cursor past the end yields an empty slice.
    pub fn since(&self, cursor: usize) -> &[ChatMessage] {
        &self.messages[cursor.min(self.messages.len())..]
    }

    /// Map every message to its wire form, preserving order.
    pub fn to_wire(&self) -> Vec<Message> {
        self.messages
            .iter()
            .map(|m| Message {
                role: m.sender.role(),
                content: m.text.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_types::llm::MessageRole;

    fn sample() -> Transcript {
        let mut t = Transcript::new();
        t.push(ChatMessage::user("first"));
        t.push(ChatMessage::bot("second"));
        t.push(ChatMessage::user("third"));
        t
    }

    #[test]
    fn test_to_wire_preserves_order_and_roles() {
        let wire = sample().to_wire();
        let pairs: Vec<(MessageRole, &str)> =
            wire.iter().map(|m| (m.role, m.content.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                (MessageRole::User, "first"),
                (MessageRole::Assistant, "second"),
                (MessageRole::User, "third"),
            ]
        );
    }

    #[test]
    fn test_since_cursor() {
        let t = sample();
        assert_eq!(t.since(0).len(), 3);
        assert_eq!(t.since(2)[0].text, "third");
        assert!(t.since(3).is_empty());
        assert!(t.since(10).is_empty());
    }
}
