//! Chat transcript and request lifecycle.
//!
//! `Transcript` is the append-only conversation history; `ChatSession`
//! owns it together with the draft and the loading flag and drives one
//! request/response cycle at a time.

pub mod session;
pub mod transcript;
