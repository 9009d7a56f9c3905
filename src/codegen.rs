//! Pure Playwright snippet generators, one per assertion shape.

use crate::config::GeneratorConfig;
use crate::constants::{
    ANT_DROPDOWN_SELECTOR, ANT_SELECTED_OPTION_SELECTOR, LABEL_SEPARATORS, SCREENSHOT_TEMPLATE,
    SELECTED_LABEL_TEMPLATE,
};
use tracing::debug;

/// Quote `value` as a JSON string, which is also a valid JS string literal.
pub fn json_quote(value: &str) -> String {
    serde_json::Value::String(value.to_owned()).to_string()
}

/// Escape `value` for the inside of a single-quoted JS string literal.
pub fn single_quote_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Split an expected-labels value the same way the generated select check does:
/// on ASCII or full-width commas, each token trimmed.
pub fn expected_label_tokens(value: &str) -> Vec<String> {
    value
        .split(LABEL_SEPARATORS)
        .map(|token| token.trim().to_string())
        .collect()
}

pub fn contains_text(selector: &str, value: &str, negated: bool) -> String {
    let matcher = if negated {
        "not.toContainText"
    } else {
        "toContainText"
    };
    format!(
        "await expect(page.{selector}).{matcher}({});",
        json_quote(value)
    )
}

/// State assertions resolve the locator first; `matcher` may carry a `not.` prefix.
pub fn element_state(selector: &str, matcher: &str) -> String {
    format!("await expect(await page.{selector}).{matcher}();")
}

pub fn input_value(selector: &str, value: &str) -> String {
    format!(
        "await expect(page.{selector}).toHaveValue({});",
        json_quote(value)
    )
}

pub fn screenshot(selector: &str, snapshot_name: &str, config: &GeneratorConfig) -> String {
    let file_name = format!("{snapshot_name}.png");
    SCREENSHOT_TEMPLATE
        .replace("{file_literal}", &json_quote(&file_name))
        .replace("{file_name}", &file_name)
        .replace("{ratio}", &config.max_diff_pixel_ratio.to_string())
        .replace("{selector}", selector)
}

pub fn selected_label_contains(selector: &str, value: &str, config: &GeneratorConfig) -> String {
    debug!(
        "Expected select labels for {selector}: {:?}",
        expected_label_tokens(value)
    );
    SELECTED_LABEL_TEMPLATE
        .replace("{settle_ms}", &config.dropdown_settle_ms.to_string())
        .replace("{timeout_ms}", &config.dropdown_timeout_ms.to_string())
        .replace("{dropdown}", ANT_DROPDOWN_SELECTOR)
        .replace("{option}", ANT_SELECTED_OPTION_SELECTOR)
        .replace("{selector}", selector)
        .replace("{value}", &single_quote_escape(value))
}
