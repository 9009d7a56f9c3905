//! Assertion catalog
//!
//! The ordered table of assertion kinds offered in the pick list. Order is what the
//! user sees, so [`CATALOG`] is declared in display order and [`AssertionKind::ALL`]
//! follows it.

use crate::codegen;
use crate::config::GeneratorConfig;
use crate::constants::DEFAULT_SNAPSHOT_NAME;
use serde::Serialize;
use std::fmt;

/// One selectable assertion kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionKind {
    ContainsText,
    NotContainsText,
    HasSelectedLabel,
    Visible,
    Editable,
    Checked,
    NotChecked,
    HasValue,
    Screenshot,
}

/// Static description of an assertion kind as shown in the pick list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionDescriptor {
    pub kind: AssertionKind,
    /// Display text and match key, unique across the catalog
    pub label: &'static str,
    pub description: &'static str,
    /// Whether the value input box is shown after picking
    pub needs_value: bool,
    /// Title of the value input box, overriding the generic one
    pub value_title: Option<&'static str>,
    /// Initial content of the value input box
    pub default_value: Option<&'static str>,
}

const fn descriptor(
    kind: AssertionKind,
    label: &'static str,
    description: &'static str,
    needs_value: bool,
) -> AssertionDescriptor {
    AssertionDescriptor {
        kind,
        label,
        description,
        needs_value,
        value_title: None,
        default_value: None,
    }
}

pub static CATALOG: [AssertionDescriptor; 9] = [
    descriptor(
        AssertionKind::ContainsText,
        "toContain",
        "Check if an item contains a text",
        true,
    ),
    descriptor(
        AssertionKind::NotContainsText,
        "not.toContain",
        "Check if an item do not contains a text",
        true,
    ),
    descriptor(
        AssertionKind::HasSelectedLabel,
        "toHaveSelectedLabel",
        "only for ant-design, Check if the selected dropdown options contain label",
        true,
    ),
    descriptor(
        AssertionKind::Visible,
        "toBeVisible",
        "Check if an item is visible",
        false,
    ),
    descriptor(
        AssertionKind::Editable,
        "toBeEditable",
        "Check if an item editable",
        false,
    ),
    descriptor(
        AssertionKind::Checked,
        "toBeChecked",
        "Check if an item is checked",
        false,
    ),
    descriptor(
        AssertionKind::NotChecked,
        "not.toBeChecked",
        "Check if an item is not checked",
        false,
    ),
    descriptor(
        AssertionKind::HasValue,
        "toHaveValue",
        "Check if an input has the given value",
        true,
    ),
    AssertionDescriptor {
        kind: AssertionKind::Screenshot,
        label: "toHaveScreenshot",
        description: "Compare an item against a stored reference screenshot",
        needs_value: true,
        value_title: Some("Please input a snapshot name"),
        default_value: Some(DEFAULT_SNAPSHOT_NAME),
    },
];

impl AssertionKind {
    /// Every kind, in pick-list order
    pub const ALL: [AssertionKind; 9] = [
        AssertionKind::ContainsText,
        AssertionKind::NotContainsText,
        AssertionKind::HasSelectedLabel,
        AssertionKind::Visible,
        AssertionKind::Editable,
        AssertionKind::Checked,
        AssertionKind::NotChecked,
        AssertionKind::HasValue,
        AssertionKind::Screenshot,
    ];

    pub fn descriptor(self) -> &'static AssertionDescriptor {
        // CATALOG is declared in the same order as ALL
        &CATALOG[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    pub fn needs_value(self) -> bool {
        self.descriptor().needs_value
    }

    /// Resolve a pick-list label back to its kind
    pub fn from_label(label: &str) -> Option<Self> {
        CATALOG.iter().find(|d| d.label == label).map(|d| d.kind)
    }

    /// Render this assertion against `selector`.
    ///
    /// Kinds that take no value ignore `value` entirely. Kinds that take one treat a
    /// missing value as the empty string.
    pub fn generate(self, selector: &str, value: Option<&str>, config: &GeneratorConfig) -> String {
        let value = value.unwrap_or("");
        match self {
            AssertionKind::ContainsText => codegen::contains_text(selector, value, false),
            AssertionKind::NotContainsText => codegen::contains_text(selector, value, true),
            AssertionKind::HasSelectedLabel => {
                codegen::selected_label_contains(selector, value, config)
            }
            AssertionKind::Visible => codegen::element_state(selector, "toBeVisible"),
            AssertionKind::Editable => codegen::element_state(selector, "toBeEditable"),
            AssertionKind::Checked => codegen::element_state(selector, "toBeChecked"),
            AssertionKind::NotChecked => codegen::element_state(selector, "not.toBeChecked"),
            AssertionKind::HasValue => codegen::input_value(selector, value),
            AssertionKind::Screenshot => codegen::screenshot(selector, value, config),
        }
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl AssertionDescriptor {
    /// Render with the default generator settings
    pub fn generate(&self, selector: &str, value: Option<&str>) -> String {
        self.kind
            .generate(selector, value, &GeneratorConfig::default())
    }
}

/// The catalog in display order
pub fn descriptors() -> &'static [AssertionDescriptor] {
    &CATALOG
}

/// Categories offered by the secondary pick, each leading to a different downstream flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertCategory {
    Title,
    Basic,
    Locator,
}

impl AssertCategory {
    pub const ALL: [AssertCategory; 3] = [
        AssertCategory::Title,
        AssertCategory::Basic,
        AssertCategory::Locator,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AssertCategory::Title => "Title assertion",
            AssertCategory::Basic => "Basic assertion",
            AssertCategory::Locator => "Locator assertion",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AssertCategory::Title => "Assert on the page title",
            AssertCategory::Basic => "Assert on a plain value",
            AssertCategory::Locator => "Assert on the picked element",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_matches_catalog_order() {
        for (index, kind) in AssertionKind::ALL.iter().enumerate() {
            assert_eq!(CATALOG[index].kind, *kind);
            assert_eq!(kind.descriptor().kind, *kind);
        }
    }

    #[test]
    fn test_labels_are_unique() {
        let labels: HashSet<&str> = CATALOG.iter().map(|d| d.label).collect();
        assert_eq!(labels.len(), CATALOG.len());
    }

    #[test]
    fn test_from_label_round_trips() {
        for kind in AssertionKind::ALL {
            assert_eq!(AssertionKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(AssertionKind::from_label("toBeHidden"), None);
    }

    #[test]
    fn test_value_free_kinds_ignore_value() {
        let config = GeneratorConfig::default();
        for kind in AssertionKind::ALL.into_iter().filter(|k| !k.needs_value()) {
            let bare = kind.generate("getByText('x')", None, &config);
            let with_value = kind.generate("getByText('x')", Some("ignored"), &config);
            assert_eq!(bare, with_value, "{kind} should not depend on the value");
            assert!(!bare.contains("ignored"));
        }
    }

    #[test]
    fn test_missing_value_is_empty_literal() {
        let code = AssertionKind::ContainsText.generate(
            "locator('h1')",
            None,
            &GeneratorConfig::default(),
        );
        assert_eq!(code, r#"await expect(page.locator('h1')).toContainText("");"#);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(
            AssertCategory::from_label("Locator assertion"),
            Some(AssertCategory::Locator)
        );
        assert_eq!(AssertCategory::from_label("Other"), None);
    }
}
