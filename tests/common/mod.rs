#![allow(dead_code)]

use async_trait::async_trait;
use inspect_assert::document::{DocumentEditor, Position, Selection, TextBuffer};
use inspect_assert::host::{DialogHost, HostError, InputOptions, PickItem, PickOptions};
use inspect_assert::request_host::RequestHost;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Request host answering `pick` and `input` as the user would
pub fn host(pick: Option<&str>, input: Option<&str>) -> Arc<RequestHost> {
    Arc::new(RequestHost::new(
        pick.map(str::to_string),
        input.map(str::to_string),
    ))
}

pub fn buffer(text: &str, line: usize, character: usize) -> Arc<TextBuffer> {
    Arc::new(TextBuffer::with_cursor(text, Position::new(line, character)))
}

/// Host whose clipboard always fails
pub struct BrokenClipboardHost {
    pub inner: RequestHost,
}

#[async_trait]
impl DialogHost for BrokenClipboardHost {
    async fn show_pick_list(
        &self,
        items: &[PickItem],
        options: PickOptions,
    ) -> Result<Option<usize>, HostError> {
        self.inner.show_pick_list(items, options).await
    }

    async fn show_input_box(&self, options: InputOptions) -> Result<Option<String>, HostError> {
        self.inner.show_input_box(options).await
    }

    async fn write_clipboard(&self, _text: &str) -> Result<(), HostError> {
        Err(HostError::ClipboardFailed("clipboard locked".to_string()))
    }
}

/// Document that counts edit attempts and rejects every one of them
#[derive(Default)]
pub struct ReadOnlyDocument {
    pub inserts: AtomicUsize,
}

impl ReadOnlyDocument {
    pub fn insert_attempts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentEditor for ReadOnlyDocument {
    async fn selection(&self) -> Selection {
        Selection::default()
    }

    async fn line_count(&self) -> usize {
        1
    }

    async fn line(&self, index: usize) -> Option<String> {
        (index == 0).then(|| "  const x = 1;".to_string())
    }

    async fn insert(&self, _at: Position, _text: &str) -> Result<(), HostError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Err(HostError::EditFailed("document is read-only".to_string()))
    }

    async fn set_selection(&self, _selection: Selection) {}
}
