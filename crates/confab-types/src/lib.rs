//! Shared domain types for Confab.
//!
//! This crate contains the domain types used across the workspace:
//! transcript messages, completion wire types, configuration, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
