//! Interactive CLI chat experience for Confab.
//!
//! This module implements the terminal surface over a `ChatSession`:
//! header, thinking spinner, markdown rendering with highlighted code
//! blocks, slash commands and clipboard copy. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
pub mod surface;
