//! Fenced code blocks inside bot replies.
//!
//! Splits markdown into prose and fenced code, resolves the declared
//! language of each block, and tracks the transient "copied"
//! acknowledgement shown after a block is copied to the clipboard.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// Language used when a block declares none.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// How long the copy acknowledgement stays visible.
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

const MIN_FENCE_LEN: usize = 3;
const CLASS_PREFIX: &str = "language-";

/// A fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: String,
    pub code: String,
}

/// A run of markdown: either prose or one fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Prose(String),
    Code(CodeBlock),
}

/// Language named by a class-style tag (`language-rust` -> `rust`).
///
/// Missing or empty tags resolve to [`DEFAULT_LANGUAGE`].
pub fn language_from_class(class: Option<&str>) -> &str {
    match class.map(|c| c.strip_prefix(CLASS_PREFIX).unwrap_or(c).trim()) {
        Some(lang) if !lang.is_empty() => lang,
        _ => DEFAULT_LANGUAGE,
    }
}

/// Language named by a fence info string (the text after the backticks).
///
/// Only the first word counts; `language-` prefixes are accepted too.
pub fn language_from_fence(info: &str) -> &str {
    language_from_class(info.split_whitespace().next())
}

/// A fence line: marker character, run length and info string.
struct Fence<'a> {
    marker: char,
    len: usize,
    info: &'a str,
}

/// Parse a line as a code fence (three or more backticks or tildes).
///
/// A backtick fence's info string may not contain backticks, so a line
/// that opens and closes inline code on its own stays prose.
fn parse_fence(line: &str) -> Option<Fence<'_>> {
    let trimmed = line.trim_start();
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|c| *c == marker).count();
    if len < MIN_FENCE_LEN {
        return None;
    }
    // Fence markers are ASCII, so `len` is also a byte offset.
    let info = &trimmed[len..];
    if marker == '`' && info.contains('`') {
        return None;
    }
    Some(Fence { marker, len, info })
}

/// The block being collected: its opening fence and language.
struct OpenBlock {
    marker: char,
    len: usize,
    language: String,
}

impl OpenBlock {
    /// Same marker, at least as long, nothing after it.
    fn is_closed_by(&self, fence: &Fence<'_>) -> bool {
        fence.marker == self.marker && fence.len >= self.len && fence.info.trim().is_empty()
    }
}

/// Split markdown into prose and fenced code, in document order.
///
/// Backtick and tilde fences are recognised. A block closes only on a
/// fence of the same character that is at least as long as the opening
/// one, so a longer outer fence can wrap markdown that contains fences.
/// An unterminated trailing fence still yields its block.
pub fn split_segments(markdown: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut prose: Vec<&str> = Vec::new();
    let mut code: Vec<&str> = Vec::new();
    let mut open: Option<OpenBlock> = None;

    for line in markdown.lines() {
        let fence = parse_fence(line);
        let closes = open
            .as_ref()
            .zip(fence.as_ref())
            .is_some_and(|(block, fence)| block.is_closed_by(fence));

        match (open.is_some(), fence) {
            (false, Some(fence)) => {
                if !prose.is_empty() {
                    segments.push(Segment::Prose(prose.join("\n")));
                    prose.clear();
                }
                open = Some(OpenBlock {
                    marker: fence.marker,
                    len: fence.len,
                    language: language_from_fence(fence.info).to_string(),
                });
            }
            (true, Some(_)) if closes => {
                if let Some(block) = open.take() {
                    segments.push(Segment::Code(CodeBlock {
                        language: block.language,
                        code: code.join("\n"),
                    }));
                }
                code.clear();
            }
            (true, _) => code.push(line),
            (false, None) => prose.push(line),
        }
    }

    if let Some(block) = open {
        segments.push(Segment::Code(CodeBlock {
            language: block.language,
            code: code.join("\n"),
        }));
    } else if !prose.is_empty() {
        segments.push(Segment::Prose(prose.join("\n")));
    }

    segments
}

/// Fenced code blocks of `markdown`, in document order.
pub fn extract_code_blocks(markdown: &str) -> Vec<CodeBlock> {
    split_segments(markdown)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Code(block) => Some(block),
            Segment::Prose(_) => None,
        })
        .collect()
}

/// Destination for copied text.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> std::io::Result<()>;
}

/// Transient "copied" flag: true after a copy, false again after
/// [`COPY_ACK_DURATION`].
///
/// Clones share the same flag. A second acknowledgement inside the window
/// restarts it. Must be used inside a tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct CopyFeedback {
    state: Arc<FeedbackState>,
}

#[derive(Debug, Default)]
struct FeedbackState {
    copied: AtomicBool,
    generation: AtomicU64,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_copied(&self) -> bool {
        self.state.copied.load(Ordering::SeqCst)
    }

    /// Button label for the current state.
    pub fn label(&self) -> &'static str {
        if self.is_copied() { "Copied!" } else { "Copy" }
    }

    /// Flip the flag on and schedule its reset.
    pub fn acknowledge(&self) {
        let generation = self.state.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.copied.store(true, Ordering::SeqCst);

        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep(COPY_ACK_DURATION).await;
            // A newer acknowledgement owns the flag now.
            if state.generation.load(Ordering::SeqCst) == generation {
                state.copied.store(false, Ordering::SeqCst);
            }
        });
    }

    /// Copy `block` through `clipboard`, acknowledging only on success.
    pub fn copy(&self, clipboard: &dyn Clipboard, block: &CodeBlock) -> std::io::Result<()> {
        clipboard.write_text(&block.code)?;
        self.acknowledge();
        Ok(())
    }
}
