//! Credential resolution.
//!
//! - `env`: Environment variable lookup (the only credential source)
//!
//! The bearer credential is never read from the config file or compiled
//! into the binary; the config only names the variable that holds it.

pub mod env;

pub use env::{resolve_api_key, OVERRIDE_VAR};
