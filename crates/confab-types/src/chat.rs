//! Transcript message types for Confab.
//!
//! A [`ChatMessage`] is one turn of the conversation, tagged with its
//! author. Messages are immutable once appended to a transcript; the
//! insertion order is the display order.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::llm::MessageRole;

/// Author of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Wire role for this sender: users speak as `user`, the bot as `assistant`.
    pub fn role(self) -> MessageRole {
        match self {
            Sender::User => MessageRole::User,
            Sender::Bot => MessageRole::Assistant,
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// How a bot message came to be.
///
/// The text of `Fallback` and `Error` messages is a fixed placeholder; the
/// tag exists so a renderer can style them apart from genuine answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Text typed by the user or returned by the endpoint.
    #[default]
    Reply,
    /// The endpoint answered but the reply carried no content.
    Fallback,
    /// The round-trip failed (transport, non-JSON body, decode fault).
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Reply => write!(f, "reply"),
            MessageKind::Fallback => write!(f, "fallback"),
            MessageKind::Error => write!(f, "error"),
        }
    }
}

/// A single message within a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    #[serde(default)]
    pub kind: MessageKind,
}

impl ChatMessage {
    /// A message typed by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            kind: MessageKind::Reply,
        }
    }

    /// A genuine reply from the bot.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::bot_with_kind(text, MessageKind::Reply)
    }

    /// A bot message with an explicit origin tag.
    pub fn bot_with_kind(text: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            kind,
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}
