//! LlmProvider trait definition.
//!
//! This is the core abstraction that completion backends implement.
//! Uses RPITIT for `complete`; `BoxLlmProvider` adds dynamic dispatch.

use confab_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion backends (hosted HTTP endpoints, test doubles).
///
/// Implementations live in confab-infra (e.g., `CompletionsClient`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Send a completion request and receive the extracted reply.
    ///
    /// A reply without content is `Ok` with `content: None`; only transport
    /// and parse faults are `Err`.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
