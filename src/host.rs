//! Host editor seam
//!
//! The dialog never talks to a concrete editor. Every human-facing prompt and the
//! clipboard go through [`DialogHost`], so the same controller drives a VS Code
//! bridge, an MCP request, or a scripted test host.
//!
//! ## Key Components
//!
//! - [`PickItem`], [`PickOptions`], [`InputOptions`]: prompt payloads
//! - [`DialogHost`]: async trait implemented by hosts
//! - [`HostError`]: faults raised by a host (never user cancellation)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One row of a pick list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickItem {
    pub label: String,
    pub description: Option<String>,
}

impl PickItem {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: Some(description.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickOptions {
    pub title: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputOptions {
    pub title: String,
    /// Initial content of the input box
    pub value: Option<String>,
    pub prompt: String,
}

/// Trait for the interactive surface of a host editor.
///
/// `Ok(None)` from a prompt means the user dismissed it. `Err` is reserved for the
/// host itself failing.
#[async_trait]
pub trait DialogHost: Send + Sync {
    /// Show a pick list and return the index of the chosen item
    async fn show_pick_list(
        &self,
        items: &[PickItem],
        options: PickOptions,
    ) -> Result<Option<usize>, HostError>;

    /// Show a single-line input box and return the submitted text
    async fn show_input_box(&self, options: InputOptions) -> Result<Option<String>, HostError>;

    /// Replace the clipboard content
    async fn write_clipboard(&self, text: &str) -> Result<(), HostError>;
}

/// Errors raised by host collaborators
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("Pick list failed: {0}")]
    PickFailed(String),
    #[error("Input box failed: {0}")]
    InputFailed(String),
    #[error("Clipboard write failed: {0}")]
    ClipboardFailed(String),
    #[error("Document edit failed: {0}")]
    EditFailed(String),
    #[error("Host is not available")]
    Unavailable,
}

impl HostError {
    /// Stable code for logs and tool responses
    pub fn error_code(&self) -> &'static str {
        match self {
            HostError::PickFailed(_) => "PICK_FAILED",
            HostError::InputFailed(_) => "INPUT_FAILED",
            HostError::ClipboardFailed(_) => "CLIPBOARD_FAILED",
            HostError::EditFailed(_) => "EDIT_FAILED",
            HostError::Unavailable => "UNAVAILABLE",
        }
    }

    pub fn message_detail(&self) -> Option<&str> {
        match self {
            HostError::PickFailed(msg)
            | HostError::InputFailed(msg)
            | HostError::ClipboardFailed(msg)
            | HostError::EditFailed(msg) => Some(msg),
            HostError::Unavailable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            HostError::ClipboardFailed("locked".into()).error_code(),
            "CLIPBOARD_FAILED"
        );
        assert_eq!(HostError::Unavailable.error_code(), "UNAVAILABLE");
    }

    #[test]
    fn test_message_detail() {
        assert_eq!(
            HostError::EditFailed("read-only".into()).message_detail(),
            Some("read-only")
        );
        assert_eq!(HostError::Unavailable.message_detail(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            HostError::PickFailed("closed".into()).to_string(),
            "Pick list failed: closed"
        );
    }
}
