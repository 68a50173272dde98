//! Infrastructure layer for Confab.
//!
//! Contains implementations of the ports defined in `confab-core`: the
//! HTTP completions client, the `config.toml` loader, environment
//! credential resolution, and an OSC 52 terminal clipboard.

pub mod clipboard;
pub mod config;
pub mod llm;
pub mod secret;
