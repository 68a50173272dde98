//! Chat session state and the request dispatcher.
//!
//! A `ChatSession` owns the transcript, the draft, and the loading flag.
//! Sending is split into two state transitions so a render surface can
//! show the user's turn before the network call resolves:
//!
//! 1. [`ChatSession::begin_send`] appends the user message, clears the
//!    draft, raises `loading`, and returns a [`PendingTurn`] carrying the
//!    wire request.
//! 2. [`ChatSession::resolve`] appends exactly one bot message for the
//!    outcome and lowers `loading`.
//!
//! [`ChatSession::send`] composes both around a provider call.

use confab_types::chat::{ChatMessage, MessageKind};
use confab_types::llm::{CompletionRequest, CompletionResponse, LlmError};
use tracing::debug;

use crate::llm::box_provider::BoxLlmProvider;

use super::transcript::Transcript;

/// Bot text used when the endpoint answered without any content.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process that.";

/// Bot text used when the round-trip failed.
pub const ERROR_REPLY: &str = "Error: Unable to fetch response.";

/// An in-flight turn: the request that must be resolved before the next send.
#[derive(Debug)]
#[must_use = "a pending turn must be resolved or the session stays loading"]
pub struct PendingTurn {
    request: CompletionRequest,
}

impl PendingTurn {
    /// The wire request to issue for this turn.
    pub fn request(&self) -> &CompletionRequest {
        &self.request
    }
}

/// One conversation with a fixed model.
#[derive(Debug, Clone)]
pub struct ChatSession {
    model: String,
    transcript: Transcript,
    draft: String,
    loading: bool,
}

impl ChatSession {
    /// Create an empty session that will request `model`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            transcript: Transcript::new(),
            draft: String::new(),
            loading: false,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft (bound to the input control).
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Whether a request is unresolved.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the send affordance should be enabled.
    pub fn can_send(&self) -> bool {
        !self.loading && !self.draft.trim().is_empty()
    }

    /// Start a turn from the current draft.
    ///
    /// Returns `None` and changes nothing when the draft is blank after
    /// trimming or a request is already in flight. The user message keeps
    /// the draft text exactly as typed.
    pub fn begin_send(&mut self) -> Option<PendingTurn> {
        if !self.can_send() {
            return None;
        }

        let text = std::mem::take(&mut self.draft);
        self.transcript.push(ChatMessage::user(text));
        self.loading = true;

        Some(PendingTurn {
            request: CompletionRequest {
                model: self.model.clone(),
                messages: self.transcript.to_wire(),
            },
        })
    }

    /// Finish a turn with the provider outcome.
    ///
    /// Appends exactly one bot message and clears `loading` whatever the
    /// outcome. Failures are folded into the transcript and never returned.
    /// A turn handed to a session with nothing in flight is dropped and
    /// `None` is returned.
    pub fn resolve(
        &mut self,
        turn: PendingTurn,
        outcome: Result<CompletionResponse, LlmError>,
    ) -> Option<&ChatMessage> {
        if !self.loading {
            debug!("dropping turn for a session with no request in flight");
            return None;
        }

        let reply = reply_for(outcome);
        debug!(
            kind = %reply.kind,
            history = turn.request.messages.len(),
            "turn resolved"
        );
        self.transcript.push(reply);
        self.loading = false;
        self.transcript.last()
    }

    /// Send the draft through `provider` and wait for the reply.
    ///
    /// Returns the appended bot message, or `None` when the draft was
    /// blank (nothing is sent or appended).
    pub async fn send(&mut self, provider: &BoxLlmProvider) -> Option<&ChatMessage> {
        let turn = self.begin_send()?;
        let outcome = provider.complete(turn.request()).await;
        self.resolve(turn, outcome)
    }
}

/// Map a provider outcome to the bot message it produces.
///
/// An empty content string counts as missing.
fn reply_for(outcome: Result<CompletionResponse, LlmError>) -> ChatMessage {
    match outcome {
        Ok(CompletionResponse {
            content: Some(text),
            ..
        }) if !text.is_empty() => ChatMessage::bot(text),
        Ok(_) => ChatMessage::bot_with_kind(FALLBACK_REPLY, MessageKind::Fallback),
        Err(e) => {
            debug!(error = %e, "completion request failed");
            ChatMessage::bot_with_kind(ERROR_REPLY, MessageKind::Error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use confab_types::chat::Sender;
    use confab_types::llm::MessageRole;

    use crate::llm::provider::LlmProvider;

    /// Provider double that records requests and replays a fixed outcome.
    #[derive(Clone)]
    struct ScriptedProvider {
        reply: Result<Option<String>, String>,
        seen: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    impl ScriptedProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(Some(text.to_string())),
                seen: Arc::default(),
            }
        }

        fn empty() -> Self {
            Self {
                reply: Ok(None),
                seen: Arc::default(),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err("connection refused".to_string()),
                seen: Arc::default(),
            }
        }
    }

    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(content) => Ok(CompletionResponse {
                    content: content.clone(),
                    ..Default::default()
                }),
                Err(msg) => Err(LlmError::Transport(msg.clone())),
            }
        }
    }

    fn session_with_draft(draft: &str) -> ChatSession {
        let mut session = ChatSession::new("openai/gpt-3.5-turbo");
        session.set_draft(draft);
        session
    }

    #[tokio::test]
    async fn test_hi_hello_scenario() {
        let provider = BoxLlmProvider::new(ScriptedProvider::replying("Hello!"));
        let mut session = session_with_draft("Hi");

        let reply = session.send(&provider).await.unwrap();
        assert_eq!(reply.text, "Hello!");

        assert_eq!(
            session.transcript().messages(),
            &[ChatMessage::user("Hi"), ChatMessage::bot("Hello!")]
        );
        assert_eq!(session.draft(), "");
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_each_cycle_appends_exactly_two() {
        let provider = BoxLlmProvider::new(ScriptedProvider::replying("ok"));
        let mut session = ChatSession::new("m");

        for (i, text) in ["one", "two", "three"].iter().enumerate() {
            session.set_draft(*text);
            session.send(&provider).await.unwrap();
            assert_eq!(session.transcript().len(), (i + 1) * 2);
        }
    }

    #[tokio::test]
    async fn test_blank_draft_is_noop() {
        let provider = ScriptedProvider::replying("unused");
        let seen = provider.seen.clone();
        let provider = BoxLlmProvider::new(provider);

        for draft in ["", "   ", "\n\t "] {
            let mut session = session_with_draft(draft);
            assert!(session.send(&provider).await.is_none());
            assert!(session.transcript().is_empty());
            assert!(!session.is_loading());
            assert_eq!(session.draft(), draft);
        }
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_loading_only_between_clear_and_reply() {
        let mut session = session_with_draft("Hi");
        assert!(!session.is_loading());

        let turn = session.begin_send().unwrap();
        assert!(session.is_loading());
        assert_eq!(session.draft(), "");
        assert_eq!(session.transcript().len(), 1);
        assert!(session.transcript().messages()[0].is_user());

        session.resolve(turn, Ok(CompletionResponse::default()));
        assert!(!session.is_loading());
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn test_begin_send_rejected_while_loading() {
        let mut session = session_with_draft("first");
        let turn = session.begin_send().unwrap();

        session.set_draft("second");
        assert!(!session.can_send());
        assert!(session.begin_send().is_none());
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.draft(), "second");

        session.resolve(turn, Ok(CompletionResponse::default()));
        assert!(session.begin_send().is_some());
    }

    #[test]
    fn test_user_text_kept_as_typed() {
        let mut session = session_with_draft("  padded  ");
        let turn = session.begin_send().unwrap();
        assert_eq!(session.transcript().messages()[0].text, "  padded  ");
        assert_eq!(turn.request().messages[0].content, "  padded  ");
    }

    #[tokio::test]
    async fn test_missing_content_uses_fallback() {
        let provider = BoxLlmProvider::new(ScriptedProvider::empty());
        let mut session = session_with_draft("Hi");

        let reply = session.send(&provider).await.unwrap();
        assert_eq!(reply.text, FALLBACK_REPLY);
        assert_eq!(reply.kind, MessageKind::Fallback);
        assert_eq!(reply.sender, Sender::Bot);
    }

    #[test]
    fn test_empty_content_uses_fallback() {
        let mut session = session_with_draft("Hi");
        let turn = session.begin_send().unwrap();
        let reply = session.resolve(
            turn,
            Ok(CompletionResponse {
                content: Some(String::new()),
                ..Default::default()
            }),
        );
        assert_eq!(reply.unwrap().text, "Sorry, I couldn't process that.");
    }

    #[test]
    fn test_resolve_without_request_in_flight_is_dropped() {
        let mut session = session_with_draft("Hi");
        let mut copy = session.clone();
        let turn = session.begin_send().unwrap();

        // `copy` was cloned before the send, so it has nothing in flight.
        assert!(copy.resolve(turn, Ok(CompletionResponse::default())).is_none());
        assert!(copy.transcript().is_empty());
        assert!(!copy.is_loading());
        assert!(session.is_loading());
    }

    #[tokio::test]
    async fn test_transport_fault_uses_error_reply() {
        let provider = BoxLlmProvider::new(ScriptedProvider::failing());
        let mut session = session_with_draft("Hi");

        let reply = session.send(&provider).await.unwrap();
        assert_eq!(reply.text, "Error: Unable to fetch response.");
        assert_eq!(reply.kind, MessageKind::Error);
        assert!(!session.is_loading());
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_request_carries_full_history() {
        let provider = ScriptedProvider::replying("reply");
        let seen = provider.seen.clone();
        let provider = BoxLlmProvider::new(provider);
        let mut session = ChatSession::new("openai/gpt-3.5-turbo");

        session.set_draft("first");
        session.send(&provider).await;
        session.set_draft("second");
        session.send(&provider).await;

        let requests = seen.lock().unwrap();
        assert_eq!(requests.len(), 2);
        let last = &requests[1];
        assert_eq!(last.model, "openai/gpt-3.5-turbo");
        let roles: Vec<MessageRole> = last.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
        );
        assert_eq!(last.messages[2].content, "second");
    }
}
