//! One-shot `confab ask` command.
//!
//! Sends a single user message through a fresh session and prints the
//! bot message it produced (reply, fallback, or error text).

use anyhow::Result;

use confab_core::chat::session::ChatSession;
use confab_types::chat::ChatMessage;

use crate::state::AppState;

use super::chat::loop_runner::thinking_spinner;
use super::chat::renderer::ChatRenderer;

/// Send `text` and print the bot message.
pub async fn ask(state: &AppState, text: &str, json: bool, quiet: bool) -> Result<()> {
    let provider = state.provider()?;
    let mut session = ChatSession::new(state.config.model.clone());
    session.set_draft(text);

    let spinner = (!json && !quiet).then(thinking_spinner);
    let reply = session.send(&provider).await.cloned();
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let Some(reply) = reply else {
        anyhow::bail!("nothing to send: the message is blank");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&reply_json(&reply, session.model()))?);
    } else if quiet {
        println!("{}", reply.text);
    } else {
        let renderer = ChatRenderer::new(Some(crossterm::style::Color::Cyan));
        println!();
        println!("{}", renderer.render_message(&reply, &state.config.bot_name, "Copy"));
    }

    Ok(())
}

fn reply_json(reply: &ChatMessage, model: &str) -> serde_json::Value {
    serde_json::json!({
        "text": reply.text,
        "kind": reply.kind,
        "model": model,
    })
}
