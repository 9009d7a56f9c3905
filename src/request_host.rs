//! Host whose answers arrive with the request
//!
//! MCP clients cannot hold a modal open while the dialog runs, so they send the
//! user's choices up front: the label to pick and the value to type. A missing answer
//! behaves like the user dismissing that prompt. Every prompt shown is recorded, and
//! clipboard writes are captured so they can be returned to the caller.

use crate::host::{DialogHost, HostError, InputOptions, PickItem, PickOptions};
use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// One interaction the host performed, in order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    PickShown { title: String, labels: Vec<String> },
    InputShown { title: String, value: Option<String> },
    ClipboardWritten { text: String },
}

pub struct RequestHost {
    pick: Option<String>,
    input: Option<String>,
    system_clipboard: bool,
    events: Mutex<Vec<HostEvent>>,
    clipboard: Mutex<Option<String>>,
}

impl RequestHost {
    /// `pick` is the label to choose, `input` the text to submit
    pub fn new(pick: Option<String>, input: Option<String>) -> Self {
        Self {
            pick,
            input,
            system_clipboard: false,
            events: Mutex::new(Vec::new()),
            clipboard: Mutex::new(None),
        }
    }

    /// Also copy clipboard writes to the OS clipboard
    pub fn with_system_clipboard(mut self, enabled: bool) -> Self {
        self.system_clipboard = enabled;
        self
    }

    pub async fn events(&self) -> Vec<HostEvent> {
        self.events.lock().await.clone()
    }

    /// Last text written to the clipboard
    pub async fn clipboard(&self) -> Option<String> {
        self.clipboard.lock().await.clone()
    }

    async fn record(&self, event: HostEvent) {
        self.events.lock().await.push(event);
    }
}

#[async_trait]
impl DialogHost for RequestHost {
    async fn show_pick_list(
        &self,
        items: &[PickItem],
        options: PickOptions,
    ) -> Result<Option<usize>, HostError> {
        self.record(HostEvent::PickShown {
            title: options.title,
            labels: items.iter().map(|item| item.label.clone()).collect(),
        })
        .await;

        let Some(label) = &self.pick else {
            debug!("No pick supplied, treating as dismissed");
            return Ok(None);
        };
        items
            .iter()
            .position(|item| &item.label == label)
            .map(Some)
            .ok_or_else(|| HostError::PickFailed(format!("no item labelled {label:?}")))
    }

    async fn show_input_box(&self, options: InputOptions) -> Result<Option<String>, HostError> {
        self.record(HostEvent::InputShown {
            title: options.title,
            value: options.value,
        })
        .await;
        Ok(self.input.clone())
    }

    async fn write_clipboard(&self, text: &str) -> Result<(), HostError> {
        self.record(HostEvent::ClipboardWritten {
            text: text.to_string(),
        })
        .await;
        *self.clipboard.lock().await = Some(text.to_string());

        if self.system_clipboard {
            mirror_to_system_clipboard(text.to_string()).await;
        }
        Ok(())
    }
}

/// Best-effort copy to the OS clipboard. Headless and SSH sessions have none, so
/// failures are logged rather than returned.
async fn mirror_to_system_clipboard(text: String) {
    let result = tokio::task::spawn_blocking(move || {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)
    })
    .await;

    match result {
        Ok(Ok(())) => debug!("Mirrored snippet to system clipboard"),
        Ok(Err(e)) => warn!("System clipboard not available: {e}"),
        Err(e) => warn!("System clipboard task failed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<PickItem> {
        vec![PickItem::new("a", "first"), PickItem::new("b", "second")]
    }

    fn options() -> PickOptions {
        PickOptions {
            title: "t".to_string(),
            placeholder: "p".to_string(),
        }
    }

    #[tokio::test]
    async fn test_pick_by_label() {
        let host = RequestHost::new(Some("b".to_string()), None);
        assert_eq!(host.show_pick_list(&items(), options()).await, Ok(Some(1)));
    }

    #[tokio::test]
    async fn test_missing_pick_is_dismissal() {
        let host = RequestHost::new(None, None);
        assert_eq!(host.show_pick_list(&items(), options()).await, Ok(None));
    }

    #[tokio::test]
    async fn test_unknown_label_fails() {
        let host = RequestHost::new(Some("zzz".to_string()), None);
        let err = host.show_pick_list(&items(), options()).await.unwrap_err();
        assert_eq!(err.error_code(), "PICK_FAILED");
    }

    #[tokio::test]
    async fn test_events_and_clipboard_recorded() {
        let host = RequestHost::new(None, Some("typed".to_string()));
        let typed = host
            .show_input_box(InputOptions {
                title: "Value".to_string(),
                value: Some("seed".to_string()),
                prompt: "Please input something".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(typed.as_deref(), Some("typed"));
        host.write_clipboard("code").await.unwrap();

        assert_eq!(host.clipboard().await.as_deref(), Some("code"));
        assert_eq!(
            host.events().await,
            vec![
                HostEvent::InputShown {
                    title: "Value".to_string(),
                    value: Some("seed".to_string()),
                },
                HostEvent::ClipboardWritten {
                    text: "code".to_string(),
                },
            ]
        );
    }
}
