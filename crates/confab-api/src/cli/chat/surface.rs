//! Incremental transcript printing.
//!
//! The terminal scrolls on its own, so keeping the newest message in view
//! means printing only what was appended since the last render.

use confab_core::chat::transcript::Transcript;
use confab_types::chat::ChatMessage;

use super::renderer::ChatRenderer;

/// Tracks how many transcript messages have been printed.
#[derive(Debug, Default)]
pub struct TranscriptView {
    rendered: usize,
}

impl TranscriptView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> usize {
        self.rendered
    }

    /// Messages not yet printed; advances the cursor past them.
    pub fn take_unseen<'t>(&mut self, transcript: &'t Transcript) -> &'t [ChatMessage] {
        let unseen = transcript.since(self.rendered);
        self.rendered = transcript.len();
        unseen
    }

    /// Render every unseen message, in order.
    pub fn render_unseen(
        &mut self,
        transcript: &Transcript,
        renderer: &ChatRenderer,
        bot_name: &str,
        copy_label: &str,
    ) -> String {
        self.take_unseen(transcript)
            .iter()
            .map(|m| renderer.render_message(m, bot_name, copy_label))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
