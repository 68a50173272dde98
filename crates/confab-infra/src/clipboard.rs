//! Terminal clipboard via the OSC 52 escape sequence.
//!
//! Most modern terminals (and tmux with `set-clipboard on`) accept
//! `ESC ] 52 ; c ; <base64> BEL` and place the payload on the system
//! clipboard, including over SSH.

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use confab_core::markdown::Clipboard;

/// Build the OSC 52 sequence that copies `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

/// Clipboard that writes OSC 52 sequences to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(osc52_sequence(text).as_bytes())?;
        stdout.flush()
    }
}
