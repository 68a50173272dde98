//! Main chat loop orchestration.
//!
//! Coordinates the conversation lifecycle: provider setup, header, input
//! loop, one request per turn behind a thinking spinner, slash commands
//! and clipboard copy.

use std::time::Duration;

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use confab_core::chat::session::ChatSession;
use confab_core::chat::transcript::Transcript;
use confab_core::markdown::{Clipboard, CodeBlock, CopyFeedback, extract_code_blocks};
use confab_infra::clipboard::Osc52Clipboard;
use confab_types::chat::Sender;

use crate::state::AppState;

use super::banner::print_header;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;
use super::surface::TranscriptView;

const PREVIEW_CHARS: usize = 60;

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let config = &state.config;
    let provider = state.provider()?;

    print_header(&config.title, provider.name(), &config.model, &config.endpoint);

    let renderer = ChatRenderer::new(Some(crossterm::style::Color::Cyan));
    let mut session = ChatSession::new(config.model.clone());
    let mut view = TranscriptView::new();
    let feedback = CopyFeedback::new();

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
            }
            InputEvent::Message(text) => {
                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::History => print_history(session.transcript(), &config.bot_name),
                        ChatCommand::Copy(n) => {
                            copy_code_block(session.transcript(), n, &feedback, &Osc52Clipboard)
                        }
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                        }
                    }
                    continue;
                }

                session.set_draft(text);
                // Blank drafts are ignored.
                let Some(turn) = session.begin_send() else {
                    continue;
                };
                print!(
                    "{}",
                    view.render_unseen(session.transcript(), &renderer, &config.bot_name, feedback.label())
                );

                let spinner = thinking_spinner();
                let outcome = provider.complete(turn.request()).await;
                spinner.finish_and_clear();

                session.resolve(turn, outcome);
                println!();
                println!(
                    "{}",
                    view.render_unseen(session.transcript(), &renderer, &config.bot_name, feedback.label())
                );
            }
        }
    }

    Ok(())
}

/// Spinner shown while a request is in flight.
pub fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Code blocks of the newest message that has any, user or bot.
fn newest_code_blocks(transcript: &Transcript) -> Option<Vec<CodeBlock>> {
    transcript
        .messages()
        .iter()
        .rev()
        .map(|m| extract_code_blocks(&m.text))
        .find(|blocks| !blocks.is_empty())
}

/// Copy the n-th code block of the newest message with code.
fn copy_code_block(
    transcript: &Transcript,
    n: usize,
    feedback: &CopyFeedback,
    clipboard: &dyn Clipboard,
) {
    let Some(blocks) = newest_code_blocks(transcript) else {
        println!("\n  {} No code blocks to copy yet.\n", style("i").blue().bold());
        return;
    };

    let Some(block) = n.checked_sub(1).and_then(|i| blocks.get(i)) else {
        println!(
            "\n  {} The newest message with code has {} code block(s).\n",
            style("i").blue().bold(),
            blocks.len()
        );
        return;
    };

    match feedback.copy(clipboard, block) {
        Ok(()) => println!(
            "\n  {} [{n}] {} {}\n",
            style("*").cyan().bold(),
            block.language,
            style(feedback.label()).green()
        ),
        Err(e) => println!("\n  {} Copy failed: {e}\n", style("!").red().bold()),
    }
}

/// Print the transcript as a table.
fn print_history(transcript: &Transcript, bot_name: &str) {
    if transcript.is_empty() {
        println!("\n  {} No messages yet.\n", style("i").blue().bold());
        return;
    }
    println!();
    println!("{}", history_table(transcript, bot_name));
    println!();
}

fn history_table(transcript: &Transcript, bot_name: &str) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("From").fg(Color::White),
        Cell::new("Message").fg(Color::White),
    ]);

    for (i, message) in transcript.iter().enumerate() {
        let (from, color) = match message.sender {
            Sender::User => ("You", Color::Green),
            Sender::Bot => (bot_name, Color::Cyan),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(from).fg(color),
            Cell::new(preview(&message.text, PREVIEW_CHARS)).fg(Color::DarkGrey),
        ]);
    }

    table
}

/// First line of `text`, cut to `max` characters.
fn preview(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > max {
        let cut: String = line.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use confab_types::chat::ChatMessage;

    #[derive(Default)]
    struct RecordingClipboard {
        written: Mutex<Vec<String>>,
    }

    impl Clipboard for RecordingClipboard {
        fn write_text(&self, text: &str) -> std::io::Result<()> {
            self.written.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("Hello", 60), "Hello");
    }

    #[test]
    fn test_preview_cuts_on_char_boundaries() {
        let text = "é".repeat(100);
        let p = preview(&text, 10);
        assert_eq!(p, format!("{}...", "é".repeat(7)));
    }

    #[test]
    fn test_preview_first_line_only() {
        assert_eq!(preview("line one\nline two", 60), "line one");
        assert_eq!(preview("", 60), "");
    }

    #[test]
    fn test_history_table_lists_messages_in_order() {
        let mut t = Transcript::new();
        t.push(ChatMessage::user("Hi"));
        t.push(ChatMessage::bot("Hello"));

        let rendered = console::strip_ansi_codes(&history_table(&t, "Om").to_string()).to_string();
        let you = rendered.find("You").unwrap();
        let om = rendered.find("Om").unwrap();
        assert!(you < om);
        assert!(rendered.contains("Hello"));
    }

    #[tokio::test]
    async fn test_copy_without_code_leaves_feedback_unset() {
        let mut t = Transcript::new();
        t.push(ChatMessage::user("Hi"));
        t.push(ChatMessage::bot("Hello"));
        let clipboard = RecordingClipboard::default();
        let feedback = CopyFeedback::new();

        copy_code_block(&t, 1, &feedback, &clipboard);
        assert!(!feedback.is_copied());
        assert!(clipboard.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_copy_out_of_range_leaves_feedback_unset() {
        let mut t = Transcript::new();
        t.push(ChatMessage::bot("```rust\nfn main() {}\n```"));
        let clipboard = RecordingClipboard::default();
        let feedback = CopyFeedback::new();

        copy_code_block(&t, 2, &feedback, &clipboard);
        assert!(!feedback.is_copied());
        assert!(clipboard.written.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_picks_newest_message_with_code() {
        let mut t = Transcript::new();
        t.push(ChatMessage::bot("```sh\nold\n```"));
        t.push(ChatMessage::user("Check this:\n~~~py\nprint(1)\n~~~\nand\n```py\nprint(2)\n```"));
        t.push(ChatMessage::bot("Looks fine."));
        let clipboard = RecordingClipboard::default();
        let feedback = CopyFeedback::new();

        copy_code_block(&t, 2, &feedback, &clipboard);
        assert!(feedback.is_copied());
        assert_eq!(*clipboard.written.lock().unwrap(), vec!["print(2)".to_string()]);
    }
}
