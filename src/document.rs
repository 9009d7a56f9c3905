//! Text document seam and the in-memory buffer behind it.
//!
//! Positions are zero-based; `character` counts Unicode scalar values, not bytes
//! or UTF-16 code units.

use crate::host::HostError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }

    /// Where the caret ends up after `text` is inserted at this position
    pub fn after_insert(self, text: &str) -> Position {
        match text.rfind('\n') {
            Some(last_newline) => Position {
                line: self.line + text.matches('\n').count(),
                character: text[last_newline + 1..].chars().count(),
            },
            None => Position {
                line: self.line,
                character: self.character + text.chars().count(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    /// An empty selection, i.e. a plain cursor
    pub fn caret(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Editable view of the active document
#[async_trait]
pub trait DocumentEditor: Send + Sync {
    async fn selection(&self) -> Selection;

    async fn line_count(&self) -> usize;

    /// Text of line `index` without its line terminator
    async fn line(&self, index: usize) -> Option<String>;

    /// Insert `text` at `at`
    async fn insert(&self, at: Position, text: &str) -> Result<(), HostError>;

    async fn set_selection(&self, selection: Selection);
}

/// Width of the leading whitespace of `line`, or `None` for a blank line
pub fn leading_whitespace_width(line: &str) -> Option<usize> {
    line.chars().position(|c| !c.is_whitespace())
}

/// Indentation to use for code inserted at the cursor.
///
/// Scans from the selection's start line upward and reuses the indentation of the
/// first non-blank line; 0 when every line up to the top is blank.
pub async fn guess_indentation(editor: &dyn DocumentEditor) -> usize {
    let line_count = editor.line_count().await;
    if line_count == 0 {
        return 0;
    }
    let from = editor.selection().await.start.line.min(line_count - 1);
    for index in (0..=from).rev() {
        if let Some(width) = editor
            .line(index)
            .await
            .and_then(|line| leading_whitespace_width(&line))
        {
            return width;
        }
    }
    0
}

/// Line terminator of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// CRLF when the first line break of `text` is `\r\n`
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(i) if text[..i].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Split on `\n`, dropping a `\r` left in front of it
fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

#[derive(Debug)]
struct BufferState {
    lines: Vec<String>,
    line_ending: LineEnding,
    selection: Selection,
}

/// In-memory document with a single selection.
///
/// Lines are stored without terminators and rejoined with the line ending detected
/// when the buffer was created; inserted `\n` breaks follow that ending.
#[derive(Debug)]
pub struct TextBuffer {
    state: RwLock<BufferState>,
}

impl TextBuffer {
    pub fn new(text: &str) -> Self {
        Self::with_cursor(text, Position::default())
    }

    /// Buffer with the cursor placed at `cursor`
    pub fn with_cursor(text: &str, cursor: Position) -> Self {
        Self {
            state: RwLock::new(BufferState {
                lines: split_lines(text),
                line_ending: LineEnding::detect(text),
                selection: Selection::caret(cursor),
            }),
        }
    }

    pub async fn text(&self) -> String {
        let state = self.state.read().await;
        state.lines.join(state.line_ending.as_str())
    }

    pub async fn line_ending(&self) -> LineEnding {
        self.state.read().await.line_ending
    }
}

#[async_trait]
impl DocumentEditor for TextBuffer {
    async fn selection(&self) -> Selection {
        self.state.read().await.selection
    }

    async fn line_count(&self) -> usize {
        self.state.read().await.lines.len()
    }

    async fn line(&self, index: usize) -> Option<String> {
        self.state.read().await.lines.get(index).cloned()
    }

    async fn insert(&self, at: Position, text: &str) -> Result<(), HostError> {
        let mut state = self.state.write().await;
        let line_count = state.lines.len();
        let Some(line) = state.lines.get(at.line) else {
            return Err(HostError::EditFailed(format!(
                "line {} is past the end of the document ({line_count} lines)",
                at.line
            )));
        };
        let Some(split) = char_to_byte(line, at.character) else {
            return Err(HostError::EditFailed(format!(
                "character {} is past the end of line {}",
                at.character, at.line
            )));
        };

        let merged = format!("{}{text}{}", &line[..split], &line[split..]);
        let replacement = split_lines(&merged);
        state.lines.splice(at.line..=at.line, replacement);
        Ok(())
    }

    async fn set_selection(&self, selection: Selection) {
        self.state.write().await.selection = selection;
    }
}

fn char_to_byte(line: &str, character: usize) -> Option<usize> {
    if character == line.chars().count() {
        return Some(line.len());
    }
    line.char_indices().nth(character).map(|(byte, _)| byte)
}
