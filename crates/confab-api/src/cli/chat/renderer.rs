//! Terminal rendering of transcript messages.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for fenced
//! code blocks. Each code block gets a numbered header with its language
//! so it can be copied with `/copy <n>`.

use console::{measure_text_width, strip_ansi_codes, style};
use crossterm::style::Color;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};
use termimad::MadSkin;

use confab_core::markdown::{CodeBlock, Segment, split_segments};
use confab_types::chat::{ChatMessage, MessageKind, Sender};

const THEME: &str = "base16-ocean.dark";
const INDENT: &str = "  ";
const MIN_WIDTH: usize = 20;
const MAX_WIDTH: usize = 120;

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    width: usize,
}

impl ChatRenderer {
    /// Create a renderer sized to the current terminal.
    pub fn new(accent_color: Option<Color>) -> Self {
        let (_, cols) = console::Term::stdout().size();
        Self::with_width(accent_color, cols as usize)
    }

    /// Create a renderer for a fixed column count.
    pub fn with_width(accent_color: Option<Color>, width: usize) -> Self {
        let mut skin = MadSkin::default_dark();

        // Apply accent color to headers and bold text if provided
        if let Some(color) = accent_color {
            let tc = Self::crossterm_to_termimad(color);
            skin.bold.set_fg(tc);
            skin.headers[0].set_fg(tc);
            skin.headers[1].set_fg(tc);
        }

        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            width: width.clamp(MIN_WIDTH, MAX_WIDTH),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Render one transcript message with its sender label.
    ///
    /// `copy_label` is shown in each code block header.
    pub fn render_message(&self, message: &ChatMessage, bot_name: &str, copy_label: &str) -> String {
        match (message.sender, message.kind) {
            (Sender::User, _) => self.render_user(&message.text, copy_label),
            (Sender::Bot, MessageKind::Reply) => format!(
                "{INDENT}{}\n{}",
                style(bot_name).cyan().bold(),
                self.render_markdown(&message.text, copy_label)
            ),
            (Sender::Bot, MessageKind::Fallback) => format!(
                "{INDENT}{}\n{INDENT}{}\n",
                style(bot_name).cyan().bold(),
                style(&message.text).yellow().italic()
            ),
            (Sender::Bot, MessageKind::Error) => format!(
                "{INDENT}{}\n{INDENT}{} {}\n",
                style(bot_name).cyan().bold(),
                style("!").red().bold(),
                style(&message.text).red()
            ),
        }
    }

    /// User text as markdown: prose lines right-aligned under a
    /// right-aligned `You` label, code blocks highlighted like bot code.
    fn render_user(&self, text: &str, copy_label: &str) -> String {
        let label = style("You").green().bold().to_string();
        let mut output = self.right_aligned(&label);
        let mut block_number = 0;

        for segment in split_segments(text) {
            match segment {
                Segment::Prose(prose) => {
                    let rendered = self
                        .skin
                        .text(&prose, Some(self.width - INDENT.len()))
                        .to_string();
                    for line in rendered.lines() {
                        output.push_str(&self.right_aligned(line));
                    }
                }
                Segment::Code(block) => {
                    block_number += 1;
                    output.push_str(&self.render_code_block(block_number, &block, copy_label));
                }
            }
        }
        output
    }

    /// Pad `styled` so its visible text ends `INDENT` before the edge.
    ///
    /// Trailing blanks are ignored when measuring; lines too wide to align
    /// are left-indented instead.
    fn right_aligned(&self, styled: &str) -> String {
        let visible = measure_text_width(strip_ansi_codes(styled).trim_end());
        if visible + INDENT.len() >= self.width {
            return format!("{INDENT}{styled}\n");
        }
        let pad = self.width - visible - INDENT.len();
        format!("{}{styled}\n", " ".repeat(pad))
    }

    /// Render markdown with syntax-highlighted, numbered code blocks.
    pub fn render_markdown(&self, markdown: &str, copy_label: &str) -> String {
        let mut output = String::new();
        let mut block_number = 0;

        for segment in split_segments(markdown) {
            match segment {
                Segment::Prose(text) => {
                    let rendered = self.skin.text(&text, Some(self.width));
                    output.push_str(&rendered.to_string());
                }
                Segment::Code(block) => {
                    block_number += 1;
                    output.push_str(&self.render_code_block(block_number, &block, copy_label));
                }
            }
        }

        output
    }

    /// Header line plus highlighted code.
    fn render_code_block(&self, number: usize, block: &CodeBlock, copy_label: &str) -> String {
        let mut output = format!(
            "{INDENT}{} {} {}\n",
            style(format!("--- [{number}] {} ---", block.language)).dim(),
            style(copy_label).cyan(),
            style(format!("/copy {number}")).dim()
        );

        let Some(theme) = self.theme() else {
            for line in block.code.lines() {
                output.push_str(&format!("{INDENT}{line}\n"));
            }
            return output;
        };

        let syntax = self
            .syntax_set
            .find_syntax_by_token(&block.language)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut h = HighlightLines::new(syntax, theme);

        for line in LinesWithEndings::from(&block.code) {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!(
                "{INDENT}{}\x1b[0m\n",
                escaped.trim_end_matches('\n')
            ));
        }

        output
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(THEME)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Convert a crossterm Color to termimad Color.
    fn crossterm_to_termimad(color: Color) -> termimad::crossterm::style::Color {
        match color {
            Color::Cyan => termimad::crossterm::style::Color::Cyan,
            Color::Green => termimad::crossterm::style::Color::Green,
            Color::Yellow => termimad::crossterm::style::Color::Yellow,
            Color::Magenta => termimad::crossterm::style::Color::Magenta,
            Color::Blue => termimad::crossterm::style::Color::Blue,
            Color::Red => termimad::crossterm::style::Color::Red,
            Color::Rgb { r, g, b } => termimad::crossterm::style::Color::Rgb { r, g, b },
            _ => termimad::crossterm::style::Color::Cyan,
        }
    }
}
