//! Business logic and provider port definitions for Confab.
//!
//! This crate defines the transcript, the request lifecycle of a chat
//! session, and the `LlmProvider` port that the infrastructure layer
//! implements. It depends only on `confab-types` -- never on
//! `confab-infra` or any HTTP/IO crate.

pub mod chat;
pub mod llm;
pub mod markdown;
