//! Playwright assertion snippets for a picked locator
//!
//! The user picks an assertion kind, optionally types a value, and the generated
//! code is copied to the clipboard and inserted below the cursor. The editor is
//! reached only through the [`host::DialogHost`] and [`document::DocumentEditor`]
//! traits; [`assert_tools::InspectAssert`] exposes the same flow as MCP tools.

pub mod assert_tools;
pub mod catalog;
pub mod codegen;
pub mod config;
pub mod constants;
pub mod dialog;
pub mod document;
pub mod host;
pub mod logging;
pub mod request_host;

pub use catalog::{AssertCategory, AssertionDescriptor, AssertionKind};
pub use config::GeneratorConfig;
pub use dialog::{DialogError, DialogOutcome, InspectAssertDialog};
