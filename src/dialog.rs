//! Interactive assertion dialog
//!
//! One call to [`InspectAssertDialog::run`] walks the user through a single
//! round-trip:
//!
//! 1. pick an assertion kind (dismissing ends the dialog with no effect)
//! 2. enter a value, only for kinds that need one (dismissing means an empty value)
//! 3. generate the snippet
//! 4. copy it to the clipboard and, when a document is attached, insert it on a new
//!    line below the cursor using the indentation of the nearest non-blank line
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use inspect_assert::dialog::InspectAssertDialog;
//! use inspect_assert::document::{DocumentEditor, Position, TextBuffer};
//! use inspect_assert::host::DialogHost;
//! use inspect_assert::request_host::RequestHost;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let host: Arc<dyn DialogHost> =
//!         Arc::new(RequestHost::new(Some("toBeVisible".to_string()), None));
//!     let buffer: Arc<dyn DocumentEditor> =
//!         Arc::new(TextBuffer::with_cursor("  await page.goto('/');", Position::new(0, 23)));
//!     let dialog = InspectAssertDialog::new(host, Some(buffer));
//!     let outcome = dialog.run("getByRole('button')").await.unwrap();
//!     println!("{outcome:?}");
//! }
//! ```

use crate::catalog::{AssertCategory, AssertionKind, descriptors};
use crate::config::GeneratorConfig;
use crate::constants::{
    CATEGORY_PICK_PLACEHOLDER, CATEGORY_PICK_TITLE, INPUT_PROMPT, INPUT_TITLE_TEMPLATE,
    PICK_PLACEHOLDER, PICK_TITLE_TEMPLATE, with_selector,
};
use crate::document::{DocumentEditor, Position, Selection, guess_indentation};
use crate::host::{DialogHost, HostError, InputOptions, PickItem, PickOptions};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Errors that abort a dialog after the user committed to a choice
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error(transparent)]
    Host(#[from] HostError),
}

/// How a dialog run ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DialogOutcome {
    /// The pick list was dismissed; nothing was generated
    Cancelled,
    /// Code reached the clipboard only
    Copied { kind: AssertionKind, code: String },
    /// Code reached the clipboard and the document
    Inserted {
        kind: AssertionKind,
        code: String,
        cursor: Position,
    },
}

impl DialogOutcome {
    pub fn code(&self) -> Option<&str> {
        match self {
            DialogOutcome::Cancelled => None,
            DialogOutcome::Copied { code, .. } | DialogOutcome::Inserted { code, .. } => {
                Some(code)
            }
        }
    }

    pub fn kind(&self) -> Option<AssertionKind> {
        match self {
            DialogOutcome::Cancelled => None,
            DialogOutcome::Copied { kind, .. } | DialogOutcome::Inserted { kind, .. } => {
                Some(*kind)
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, DialogOutcome::Cancelled)
    }
}

/// State of one dialog run
#[derive(Debug, Clone)]
pub struct PickSession {
    pub id: Uuid,
    pub selector: String,
    pub value: String,
}

impl PickSession {
    fn new(selector: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            selector: selector.to_string(),
            value: String::new(),
        }
    }
}

pub struct InspectAssertDialog {
    host: Arc<dyn DialogHost>,
    editor: Option<Arc<dyn DocumentEditor>>,
    config: GeneratorConfig,
}

impl InspectAssertDialog {
    pub fn new(host: Arc<dyn DialogHost>, editor: Option<Arc<dyn DocumentEditor>>) -> Self {
        Self::with_config(host, editor, GeneratorConfig::default())
    }

    pub fn with_config(
        host: Arc<dyn DialogHost>,
        editor: Option<Arc<dyn DocumentEditor>>,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            host,
            editor,
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the full pick → value → generate → emit sequence for `selector`
    pub async fn run(&self, selector: &str) -> Result<DialogOutcome, DialogError> {
        let mut session = PickSession::new(selector);
        info!("[{}] Assertion dialog started for {selector}", session.id);

        let items: Vec<PickItem> = descriptors()
            .iter()
            .map(|d| PickItem::new(d.label, d.description))
            .collect();
        let picked = self
            .host
            .show_pick_list(
                &items,
                PickOptions {
                    title: with_selector(PICK_TITLE_TEMPLATE, selector),
                    placeholder: PICK_PLACEHOLDER.to_string(),
                },
            )
            .await?;

        let Some(kind) = picked.and_then(|index| descriptors().get(index)).map(|d| d.kind) else {
            info!("[{}] Assertion dialog cancelled at kind selection", session.id);
            return Ok(DialogOutcome::Cancelled);
        };
        debug!("[{}] Picked {kind}", session.id);

        let descriptor = kind.descriptor();
        if descriptor.needs_value {
            let entered = self
                .host
                .show_input_box(InputOptions {
                    title: descriptor
                        .value_title
                        .map(str::to_string)
                        .unwrap_or_else(|| with_selector(INPUT_TITLE_TEMPLATE, selector)),
                    value: descriptor.default_value.map(str::to_string),
                    prompt: INPUT_PROMPT.to_string(),
                })
                .await?;
            if entered.is_none() {
                // Dismissing the value prompt still inserts, with an empty value.
                debug!("[{}] Value prompt dismissed, using empty value", session.id);
            }
            session.value = entered.unwrap_or_default();
        }

        let code = kind.generate(selector, Some(session.value.as_str()), &self.config);
        self.emit(&session, kind, code).await
    }

    async fn emit(
        &self,
        session: &PickSession,
        kind: AssertionKind,
        code: String,
    ) -> Result<DialogOutcome, DialogError> {
        self.host.write_clipboard(&code).await?;
        debug!("[{}] Copied {} bytes to clipboard", session.id, code.len());

        let Some(editor) = &self.editor else {
            info!("[{}] No document attached, {kind} copied only", session.id);
            return Ok(DialogOutcome::Copied { kind, code });
        };

        match insert_below_cursor(editor.as_ref(), &code).await {
            Ok(cursor) => {
                info!(
                    "[{}] Inserted {kind}, cursor now at {}:{}",
                    session.id, cursor.line, cursor.character
                );
                Ok(DialogOutcome::Inserted { kind, code, cursor })
            }
            Err(e) => {
                warn!(
                    "[{}] {} Insert skipped, code stays on the clipboard: {e}",
                    session.id,
                    e.error_code()
                );
                Ok(DialogOutcome::Copied { kind, code })
            }
        }
    }

    /// Ask which family of assertion to build; `None` when dismissed
    pub async fn pick_category(&self) -> Result<Option<AssertCategory>, DialogError> {
        let items: Vec<PickItem> = AssertCategory::ALL
            .iter()
            .map(|c| PickItem::new(c.label(), c.description()))
            .collect();
        let picked = self
            .host
            .show_pick_list(
                &items,
                PickOptions {
                    title: CATEGORY_PICK_TITLE.to_string(),
                    placeholder: CATEGORY_PICK_PLACEHOLDER.to_string(),
                },
            )
            .await?;
        let category = picked.and_then(|index| AssertCategory::ALL.get(index).copied());
        debug!("Category pick resolved to {category:?}");
        Ok(category)
    }
}

/// Prefix the first line of `code` with `width` spaces, and every later line that
/// starts at column 0. Blank lines and lines carrying their own indentation are kept.
pub fn indent_lines(code: &str, width: usize) -> String {
    let prefix = " ".repeat(width);
    code.split('\n')
        .enumerate()
        .map(|(index, line)| {
            let flush = line.chars().next().is_some_and(|c| !c.is_whitespace());
            if index == 0 || flush {
                format!("{prefix}{line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Insert `code` on its own line after the selection end and park the caret after it.
/// Returns the new caret position.
pub async fn insert_below_cursor(
    editor: &dyn DocumentEditor,
    code: &str,
) -> Result<Position, HostError> {
    let indentation = guess_indentation(editor).await;
    let at = editor.selection().await.end;
    let text = format!("\n{}\n", indent_lines(code, indentation));
    editor.insert(at, &text).await?;
    let cursor = at.after_insert(&text);
    editor.set_selection(Selection::caret(cursor)).await;
    Ok(cursor)
}
