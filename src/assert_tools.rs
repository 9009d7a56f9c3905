use crate::catalog::{AssertCategory, AssertionDescriptor, AssertionKind, descriptors};
use crate::config::GeneratorConfig;
use crate::dialog::{DialogOutcome, InspectAssertDialog};
use crate::document::{DocumentEditor, Position, TextBuffer};
use crate::host::DialogHost;
use crate::request_host::RequestHost;
use rmcp::{
    ErrorData, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct GenerateRequest {
    /// Locator expression relative to `page`, e.g. getByRole('button', { name: 'Save' })
    pub selector: String,
    /// Assertion label as listed by list_assertions, e.g. toContain
    pub assertion: String,
    /// Assertion value; ignored by assertions that take none
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct InsertRequest {
    /// Locator expression relative to `page`
    pub selector: String,
    /// Label the user picked. Omit when the user dismissed the pick list
    pub assertion: Option<String>,
    /// Text the user entered. Omit when the user dismissed the input box
    pub value: Option<String>,
    /// Full text of the active document. Omit when no editor is open
    pub document: Option<String>,
    /// Zero-based cursor line in `document` (default 0)
    pub cursor_line: Option<usize>,
    /// Zero-based cursor column in `document`, counted in Unicode scalar values
    /// (not UTF-16 code units or bytes) (default 0)
    pub cursor_character: Option<usize>,
}

#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct CategoryRequest {
    /// Category label the user picked. Omit when the user dismissed the pick list
    pub category: Option<String>,
}

/// Result of one insert_assertion call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertResponse {
    /// cancelled, copied or inserted
    pub status: &'static str,
    pub assertion: Option<&'static str>,
    pub code: Option<String>,
    pub clipboard: Option<String>,
    /// Document text after the edit, when a document was supplied
    pub document: Option<String>,
    pub cursor: Option<Position>,
}

#[derive(Clone, Debug)]
pub struct InspectAssert {
    tool_router: ToolRouter<InspectAssert>,
    config: GeneratorConfig,
    system_clipboard: bool,
}

impl Default for InspectAssert {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

#[tool_router]
impl InspectAssert {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            config,
            system_clipboard: false,
        }
    }

    /// Mirror every clipboard write to the OS clipboard
    pub fn with_system_clipboard(mut self, enabled: bool) -> Self {
        self.system_clipboard = enabled;
        self
    }

    #[tool(
        description = "List the available Playwright assertion kinds in pick-list order, with whether each needs a value."
    )]
    pub async fn list_assertions(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text(to_json(
            descriptors(),
        )?)]))
    }

    #[tool(description = "List the assertion categories offered before choosing a flow.")]
    pub async fn list_categories(&self) -> Result<CallToolResult, ErrorData> {
        let categories: Vec<serde_json::Value> = AssertCategory::ALL
            .iter()
            .map(|c| serde_json::json!({ "label": c.label(), "description": c.description() }))
            .collect();
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &categories,
        )?)]))
    }

    #[tool(
        description = "Generate the Playwright code for one assertion against a locator. Does not touch any document."
    )]
    pub async fn generate_assertion(
        &self,
        Parameters(req): Parameters<GenerateRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let code = self.generate(&req)?;
        Ok(CallToolResult::success(vec![Content::text(code)]))
    }

    #[tool(
        description = "Run the assertion dialog with the user's answers: generate the code, copy it to the clipboard and insert it on a new line below the cursor of the supplied document, indented like the nearest non-blank line above. Returns JSON with status, code, clipboard, document and cursor."
    )]
    pub async fn insert_assertion(
        &self,
        Parameters(req): Parameters<InsertRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = self.insert(req).await?;
        Ok(CallToolResult::success(vec![Content::text(to_json(
            &response,
        )?)]))
    }

    #[tool(description = "Resolve the assertion category pick. Returns the category label or 'cancelled'.")]
    pub async fn pick_category(
        &self,
        Parameters(req): Parameters<CategoryRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let category = self.category(req).await?;
        let text = category.map(|c| c.label()).unwrap_or("cancelled");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

impl InspectAssert {
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Code for one assertion, without any dialog
    pub fn generate(&self, req: &GenerateRequest) -> Result<String, ErrorData> {
        let kind = resolve_kind(&req.assertion)?;
        debug!("Generating {kind} for {}", req.selector);
        Ok(kind.generate(&req.selector, req.value.as_deref(), &self.config))
    }

    /// Drive the dialog against an optional in-memory document
    pub async fn insert(&self, req: InsertRequest) -> Result<InsertResponse, ErrorData> {
        if let Some(label) = &req.assertion {
            resolve_kind(label)?;
        }

        let host = Arc::new(
            RequestHost::new(req.assertion.clone(), req.value.clone())
                .with_system_clipboard(self.system_clipboard),
        );
        let buffer = req.document.as_deref().map(|text| {
            let cursor = Position::new(
                req.cursor_line.unwrap_or(0),
                req.cursor_character.unwrap_or(0),
            );
            Arc::new(TextBuffer::with_cursor(text, cursor))
        });

        let dialog_host: Arc<dyn DialogHost> = host.clone();
        let editor = buffer
            .clone()
            .map(|b| -> Arc<dyn DocumentEditor> { b });
        let dialog = InspectAssertDialog::with_config(dialog_host, editor, self.config.clone());

        let outcome = dialog.run(&req.selector).await.map_err(|e| {
            error!("insert_assertion failed: {e}");
            ErrorData::internal_error(e.to_string(), None)
        })?;

        let document = match &buffer {
            Some(buffer) => Some(buffer.text().await),
            None => None,
        };
        let status = match &outcome {
            DialogOutcome::Cancelled => "cancelled",
            DialogOutcome::Copied { .. } => "copied",
            DialogOutcome::Inserted { .. } => "inserted",
        };
        let cursor = match &outcome {
            DialogOutcome::Inserted { cursor, .. } => Some(*cursor),
            _ => None,
        };

        Ok(InsertResponse {
            status,
            assertion: outcome.kind().map(AssertionKind::label),
            code: outcome.code().map(str::to_string),
            clipboard: host.clipboard().await,
            document,
            cursor,
        })
    }

    pub async fn category(&self, req: CategoryRequest) -> Result<Option<AssertCategory>, ErrorData> {
        if let Some(label) = &req.category
            && AssertCategory::from_label(label).is_none()
        {
            return Err(ErrorData::invalid_params(
                format!("Unknown category: {label}"),
                None,
            ));
        }
        let host: Arc<dyn DialogHost> = Arc::new(RequestHost::new(req.category, None));
        let dialog = InspectAssertDialog::with_config(host, None, self.config.clone());
        dialog
            .pick_category()
            .await
            .map_err(|e| ErrorData::internal_error(e.to_string(), None))
    }
}

fn resolve_kind(label: &str) -> Result<AssertionKind, ErrorData> {
    AssertionKind::from_label(label).ok_or_else(|| {
        let known: Vec<&str> = descriptors().iter().map(|d: &AssertionDescriptor| d.label).collect();
        ErrorData::invalid_params(
            format!("Unknown assertion: {label}. Expected one of: {}", known.join(", ")),
            None,
        )
    })
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ErrorData> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::internal_error(format!("Failed to serialize response: {e}"), None))
}

#[tool_handler]
impl ServerHandler for InspectAssert {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("Playwright assertion snippets for a picked locator.\n\n1) Call list_assertions to show the user the assertion kinds in order.\n2) If the picked kind needs a value, ask the user for it.\n3) Call insert_assertion with the user's answers and the active document; omit `assertion` if the user dismissed the list, omit `value` if they dismissed the input box.\n4) Use generate_assertion when only the code is needed.".to_string()),
        }
    }
}
